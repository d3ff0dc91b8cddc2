//! Demo driver: generate a vegetation field over an FBM height field and
//! run a few classification ticks with a moving camera.

use glam::Vec3;

use verdure::core::logging;
use verdure::generation::GenerationConfig;
use verdure::lod::{CameraState, LodBucket};
use verdure::system::VegetationSystem;
use verdure::terrain::FbmHeightField;

fn main() -> verdure::core::types::Result<()> {
    logging::init();

    let config = GenerationConfig {
        domain_width: 256,
        domain_height: 256,
        chunk_size: 32,
        ..Default::default()
    };

    let mut system = VegetationSystem::new(config)?;
    system.bind_sampler(Box::new(FbmHeightField::grassland(12345)));

    let stats = system.generate()?.stats.clone();
    log::info!(
        "built {} chunks, {} blades, {} vertices ({} points rejected by noise, {} by surface)",
        stats.chunks_built,
        stats.instances_emitted,
        stats.total_vertices,
        stats.points_rejected_noise,
        stats.points_rejected_weight,
    );

    // Walk a camera across the field and watch buckets shift
    for step in 0..5 {
        let camera = CameraState {
            position: Vec3::new(step as f32 * 64.0, 8.0, 128.0),
        };
        system.tick(Some(&camera), |_| true, 0.016);

        if let Some(set) = system.chunks() {
            let mut buckets = [0usize; 4];
            for chunk in &set.chunks {
                let slot = match chunk.bucket {
                    LodBucket::Lod0 => 0,
                    LodBucket::Lod1 => 1,
                    LodBucket::Lod2 => 2,
                    LodBucket::Culled => 3,
                };
                buckets[slot] += 1;
            }
            log::info!(
                "tick {}: lod0={} lod1={} lod2={} culled={} wind_t={:.2}",
                step, buckets[0], buckets[1], buckets[2], buckets[3],
                system.wind().time(),
            );
        }
    }

    Ok(())
}

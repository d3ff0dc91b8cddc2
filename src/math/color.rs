//! RGB/HSV color conversion for per-blade tinting.
//!
//! Blades are tinted in HSV space: hue/saturation/value are jittered once per
//! placement, then converted back to RGB per vertex after brightness shaping.

/// Convert an RGB color (all channels in [0, 1]) to HSV.
///
/// Hue is returned in [0, 1) rather than degrees.
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        (((g - b) / delta).rem_euclid(6.0)) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    let s = if max <= f32::EPSILON { 0.0 } else { delta / max };

    [h, s, max]
}

/// Convert an HSV color (hue in [0, 1), s/v in [0, 1]) to RGB.
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    let h = h.rem_euclid(1.0) * 6.0;
    let i = h.floor();
    let f = h - i;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match i as u32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_primaries_round_trip() {
        for rgb in [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 1.0],
            [1.0, 0.0, 1.0],
        ] {
            assert_close(hsv_to_rgb(rgb_to_hsv(rgb)), rgb);
        }
    }

    #[test]
    fn test_grayscale() {
        let hsv = rgb_to_hsv([0.5, 0.5, 0.5]);
        assert_eq!(hsv[1], 0.0);
        assert_eq!(hsv[2], 0.5);
        assert_close(hsv_to_rgb(hsv), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_grass_green() {
        // Typical grass base color should land in the green hue band
        let hsv = rgb_to_hsv([0.20, 0.48, 0.10]);
        assert!(hsv[0] > 1.0 / 6.0 && hsv[0] < 3.0 / 6.0);
        assert_close(hsv_to_rgb(hsv), [0.20, 0.48, 0.10]);
    }

    #[test]
    fn test_hue_wraps() {
        let a = hsv_to_rgb([0.0, 1.0, 1.0]);
        let b = hsv_to_rgb([1.0, 1.0, 1.0]);
        let c = hsv_to_rgb([-1.0, 1.0, 1.0]);
        assert_close(a, b);
        assert_close(a, c);
    }
}

//! Color utility functions for point colouring.

/// Marker colour for points without a cluster label
pub const DEFAULT_POINT_COLOR: [u8; 3] = [31, 119, 180];

/// Hue step between consecutive categories, in degrees (golden angle)
const CATEGORY_HUE_STEP: f32 = 137.507_77;

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (0-360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

fn to_rgb8((r, g, b): (f32, f32, f32)) -> [u8; 3] {
    let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(r), q(g), q(b)]
}

/// Distinct colour for the `index`-th category.
///
/// Hues advance by the golden angle so neighbouring indices stay far apart on
/// the colour wheel however many categories there are.
pub fn category_color(index: usize) -> [u8; 3] {
    let hue = (index as f32 * CATEGORY_HUE_STEP) % 360.0;
    to_rgb8(hsv_to_rgb(hue, 0.65, 0.9))
}

/// Colour on a blue (0.0) to red (1.0) ramp.
pub fn ramp_color(t: f32) -> [u8; 3] {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    to_rgb8(hsv_to_rgb(240.0 * (1.0 - t), 0.8, 0.9))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_rgb_red() {
        let (r, g, b) = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((r - 1.0).abs() < 0.01);
        assert!(g.abs() < 0.01);
        assert!(b.abs() < 0.01);
    }

    #[test]
    fn test_hsv_to_rgb_blue() {
        let (r, g, b) = hsv_to_rgb(240.0, 1.0, 1.0);
        assert!(r.abs() < 0.01);
        assert!(g.abs() < 0.01);
        assert!((b - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_category_colors_are_distinct() {
        let colors: Vec<_> = (0..12).map(category_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_ramp_endpoints() {
        let low = ramp_color(0.0);
        let high = ramp_color(1.0);
        assert!(low[2] > low[0], "low end should be blue: {:?}", low);
        assert!(high[0] > high[2], "high end should be red: {:?}", high);
        assert_eq!(ramp_color(f32::NAN), low);
        assert_eq!(ramp_color(7.0), high);
    }
}

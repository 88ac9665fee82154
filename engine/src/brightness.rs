use crate::model::{Brightness, Rgb};

/// Luminance cutoff below which a scheme counts as dark.
pub const DEFAULT_BRIGHTNESS_THRESHOLD: f64 = 100.0;

/// ITU-R BT.709 relative luminance on 0-255 channels.
pub fn luminance(rgb: Rgb) -> f64 {
    0.2126 * f64::from(rgb.r) + 0.7152 * f64::from(rgb.g) + 0.0722 * f64::from(rgb.b)
}

/// Buckets a background color. The boundary itself is `Light`.
pub fn classify(rgb: Rgb, threshold: f64) -> Brightness {
    if luminance(rgb) < threshold {
        Brightness::Dark
    } else {
        Brightness::Light
    }
}

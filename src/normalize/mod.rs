//! Pure conversions from raw node style fields into canonical token values.
//!
//! - [`color`] - hex handling, semantic lookup and perceptual buckets
//! - [`typography`] - font weights, line heights and size bands
//! - [`spacing`] - the canonical step scale and sibling gap geometry
//! - [`effects`] - shadow and blur values

pub mod color;
pub mod effects;
pub mod spacing;
pub mod typography;

pub use color::{categorize_color, normalize_hex, PerceptualColor};
pub use effects::{normalize_effect, EffectToken};
pub use spacing::{build_spacing_scale, Axis, SpacingScale};
pub use typography::{normalize_font_weight, SizeBand, TextProperties};

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Render a pixel value without a trailing `.0` (`24`, `12.5`).
pub fn format_number(value: f64) -> String {
    let rounded = round_to(value, 2);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(format_number(24.0), "24");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(1.0 / 3.0), "0.33");
    }
}

//! Shadow and blur normalization.

use super::format_number;
use crate::figma::{Effect, EffectType};

/// A recognised visual effect.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectToken {
    /// CSS `box-shadow` style value.
    Shadow(String),
    /// Blur radius in pixels.
    Blur(f64),
}

/// Normalize one effect. Hidden effects and unknown kinds yield `None`.
pub fn normalize_effect(effect: &Effect) -> Option<EffectToken> {
    if effect.visible == Some(false) {
        return None;
    }
    match effect.effect_type {
        EffectType::DropShadow => Some(EffectToken::Shadow(shadow_value(effect, false))),
        EffectType::InnerShadow => Some(EffectToken::Shadow(shadow_value(effect, true))),
        EffectType::LayerBlur | EffectType::BackgroundBlur => {
            Some(EffectToken::Blur(effect.radius.unwrap_or(0.0)))
        }
        EffectType::Other(_) => None,
    }
}

/// `"{x}px {y}px {radius}px {spread}px {hex}"`, `inset`-prefixed for inner shadows.
pub fn shadow_value(effect: &Effect, inset: bool) -> String {
    let offset = effect.offset.unwrap_or_default();
    let color = effect
        .color
        .map(|c| c.to_hex())
        .unwrap_or_else(|| "#000000".to_string());
    format!(
        "{}{}px {}px {}px {}px {}",
        if inset { "inset " } else { "" },
        format_number(offset.x),
        format_number(offset.y),
        format_number(effect.radius.unwrap_or(0.0)),
        format_number(effect.spread.unwrap_or(0.0)),
        color
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::FigmaColor;

    #[test]
    fn drop_shadow_renders_css_value() {
        let effect = Effect::drop_shadow(0.0, 4.0, 12.5, FigmaColor::rgb(0.0, 0.0, 0.0));
        assert_eq!(
            normalize_effect(&effect),
            Some(EffectToken::Shadow("0px 4px 12.5px 0px #000000".to_string()))
        );
    }

    #[test]
    fn inner_shadow_is_inset() {
        let mut effect = Effect::drop_shadow(1.0, 1.0, 2.0, FigmaColor::rgb(1.0, 1.0, 1.0));
        effect.effect_type = EffectType::InnerShadow;
        effect.spread = Some(3.0);
        assert_eq!(
            normalize_effect(&effect),
            Some(EffectToken::Shadow("inset 1px 1px 2px 3px #ffffff".to_string()))
        );
    }

    #[test]
    fn blurs_and_hidden_effects() {
        assert_eq!(
            normalize_effect(&Effect::layer_blur(8.0)),
            Some(EffectToken::Blur(8.0))
        );
        let mut hidden = Effect::layer_blur(8.0);
        hidden.visible = Some(false);
        assert_eq!(normalize_effect(&hidden), None);
        let other = Effect {
            effect_type: EffectType::Other("NOISE".to_string()),
            ..Default::default()
        };
        assert_eq!(normalize_effect(&other), None);
    }
}

//! Color normalization and perceptual classification.

use palette::Srgb;
use std::str::FromStr;

/// Known hex values and the semantic role they play. Matching is exact and
/// case-insensitive. Tuned to the design files this tool was first pointed at;
/// override it through the `[colors.semantic]` config table.
pub const SEMANTIC_COLORS: &[(&str, &str)] = &[
    ("#ff0000", "error"),
    ("#dc3545", "error"),
    ("#28a745", "success"),
    ("#28b446", "success"),
    ("#ffc107", "warning"),
    ("#fbbb00", "warning"),
    ("#007bff", "info"),
    ("#6257db", "primary"),
    ("#6c757d", "secondary"),
    ("#3b5999", "facebook"),
];

/// Name fragments that nominate a node's fills for a semantic role.
pub const SEMANTIC_NAME_HINTS: &[(&str, &str)] = &[
    ("primary", "primary"),
    ("secondary", "secondary"),
    ("success", "success"),
    ("warning", "warning"),
    ("error", "error"),
    ("danger", "error"),
    ("info", "info"),
];

/// Channels whose maximum pairwise difference stays below this are grey.
pub const DEFAULT_GRAY_THRESHOLD: u8 = 30;

/// Perceptual bucket of a single color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerceptualColor {
    White,
    Black,
    Gray(u16),
    Red,
    Orange,
    Yellow,
    Green,
    Lime,
    Blue,
    Cyan,
    Purple,
    Pink,
    Unknown,
}

impl PerceptualColor {
    pub fn name(&self) -> String {
        match self {
            PerceptualColor::White => "white".to_string(),
            PerceptualColor::Black => "black".to_string(),
            PerceptualColor::Gray(shade) => format!("gray-{shade}"),
            PerceptualColor::Red => "red".to_string(),
            PerceptualColor::Orange => "orange".to_string(),
            PerceptualColor::Yellow => "yellow".to_string(),
            PerceptualColor::Green => "green".to_string(),
            PerceptualColor::Lime => "lime".to_string(),
            PerceptualColor::Blue => "blue".to_string(),
            PerceptualColor::Cyan => "cyan".to_string(),
            PerceptualColor::Purple => "purple".to_string(),
            PerceptualColor::Pink => "pink".to_string(),
            PerceptualColor::Unknown => "unknown".to_string(),
        }
    }

    pub fn is_neutral(&self) -> bool {
        matches!(
            self,
            PerceptualColor::White | PerceptualColor::Black | PerceptualColor::Gray(_)
        )
    }
}

/// Parse `#rrggbb` (or `rrggbb`) into 8-bit channels.
pub fn parse_hex(hex: &str) -> Option<Srgb<u8>> {
    Srgb::<u8>::from_str(hex.trim()).ok()
}

/// Canonical lowercase `#rrggbb` form, or `None` for anything unparsable.
pub fn normalize_hex(hex: &str) -> Option<String> {
    parse_hex(hex).map(|c| format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue))
}

/// Average of the three channels, 0-255.
pub fn brightness(color: Srgb<u8>) -> f64 {
    (color.red as f64 + color.green as f64 + color.blue as f64) / 3.0
}

/// Bucket a color by brightness and channel dominance.
pub fn categorize_color(hex: &str, gray_threshold: u8) -> Option<PerceptualColor> {
    let color = parse_hex(hex)?;
    let (r, g, b) = (color.red as i32, color.green as i32, color.blue as i32);

    if (r, g, b) == (255, 255, 255) {
        return Some(PerceptualColor::White);
    }
    if (r, g, b) == (0, 0, 0) {
        return Some(PerceptualColor::Black);
    }

    let light = brightness(color);
    let max_diff = (r - g).abs().max((g - b).abs()).max((r - b).abs());

    if max_diff < gray_threshold as i32 {
        return Some(PerceptualColor::Gray(gray_shade(light)));
    }

    let category = if r > g && r > b {
        if g > 150 && b < 100 {
            if light > 150.0 {
                PerceptualColor::Yellow
            } else {
                PerceptualColor::Orange
            }
        } else if b > 100 {
            PerceptualColor::Purple
        } else {
            PerceptualColor::Red
        }
    } else if g > r && g > b {
        if r > 150 && light > 150.0 {
            PerceptualColor::Lime
        } else {
            PerceptualColor::Green
        }
    } else if b > r && b > g {
        if r > 150 {
            PerceptualColor::Pink
        } else if g > 150 {
            PerceptualColor::Cyan
        } else {
            PerceptualColor::Blue
        }
    } else {
        PerceptualColor::Unknown
    };

    Some(category)
}

fn gray_shade(light: f64) -> u16 {
    match light {
        l if l > 240.0 => 50,
        l if l > 200.0 => 100,
        l if l > 150.0 => 200,
        l if l > 100.0 => 300,
        l if l > 50.0 => 600,
        _ => 900,
    }
}

/// Index of the first `(fragment, role)` hint whose fragment appears in `name`.
pub fn semantic_hint(name: &str, hints: &[(String, String)]) -> Option<usize> {
    let lower = name.to_lowercase();
    hints
        .iter()
        .position(|(fragment, _)| lower.contains(fragment.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_white_and_black_are_named() {
        assert_eq!(
            categorize_color("#FFFFFF", DEFAULT_GRAY_THRESHOLD),
            Some(PerceptualColor::White)
        );
        assert_eq!(
            categorize_color("#000000", DEFAULT_GRAY_THRESHOLD),
            Some(PerceptualColor::Black)
        );
    }

    #[test]
    fn greys_are_banded_by_brightness() {
        let shade = |hex| match categorize_color(hex, DEFAULT_GRAY_THRESHOLD) {
            Some(PerceptualColor::Gray(s)) => s,
            other => panic!("expected grey for {hex}, got {other:?}"),
        };
        assert_eq!(shade("#f4f4f4"), 50);
        assert_eq!(shade("#ebebeb"), 100);
        assert_eq!(shade("#d8dee8"), 100);
        assert_eq!(shade("#a0a0a0"), 200);
        assert_eq!(shade("#808080"), 300);
        assert_eq!(shade("#404040"), 600);
        assert_eq!(shade("#101010"), 900);
    }

    #[test]
    fn hues_follow_channel_dominance() {
        let cat = |hex| categorize_color(hex, DEFAULT_GRAY_THRESHOLD).unwrap();
        assert_eq!(cat("#f14336"), PerceptualColor::Red);
        assert_eq!(cat("#ffd700"), PerceptualColor::Yellow);
        assert_eq!(cat("#c8a000"), PerceptualColor::Orange);
        assert_eq!(cat("#c83cc8"), PerceptualColor::Unknown);
        assert_eq!(cat("#b4327d"), PerceptualColor::Purple);
        assert_eq!(cat("#1eb43c"), PerceptualColor::Green);
        assert_eq!(cat("#aaff50"), PerceptualColor::Lime);
        assert_eq!(cat("#518ef8"), PerceptualColor::Blue);
        assert_eq!(cat("#a0a0ff"), PerceptualColor::Pink);
        assert_eq!(cat("#1ea0ff"), PerceptualColor::Cyan);
    }

    #[test]
    fn unparsable_hex_is_not_categorized() {
        assert_eq!(categorize_color("not-a-color", DEFAULT_GRAY_THRESHOLD), None);
        assert_eq!(normalize_hex("#ABCDEF").as_deref(), Some("#abcdef"));
        assert_eq!(normalize_hex("zzz"), None);
    }

    #[test]
    fn semantic_hint_uses_table_order() {
        let hints: Vec<(String, String)> = SEMANTIC_NAME_HINTS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let role = |name| semantic_hint(name, &hints).map(|i| hints[i].1.as_str());
        assert_eq!(role("Button/Danger"), Some("error"));
        assert_eq!(role("primary-info"), Some("primary"));
        assert_eq!(role("Card"), None);
    }
}

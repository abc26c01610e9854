//! Spacing normalization: the canonical step scale and the sibling geometry
//! helpers shared by token extraction and layout inference.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::figma::BoundingBox;

/// Canonical spacing steps in pixels.
pub const CANONICAL_SCALE: &[(&str, f64)] = &[
    ("xs", 4.0),
    ("sm", 8.0),
    ("md", 12.0),
    ("lg", 16.0),
    ("xl", 20.0),
    ("2xl", 24.0),
    ("3xl", 32.0),
    ("4xl", 40.0),
    ("5xl", 48.0),
    ("6xl", 64.0),
    ("7xl", 80.0),
    ("8xl", 96.0),
];

/// An observed value replaces a canonical step only when closer than this.
pub const DEFAULT_SPACING_TOLERANCE: f64 = 4.0;

/// Ordered step name → pixel mapping. Serializes as a JSON object in step order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpacingScale(Vec<(String, f64)>);

impl SpacingScale {
    pub fn get(&self, step: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(name, _)| name == step)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Step values in scale order.
    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|(_, value)| *value).collect()
    }
}

impl Serialize for SpacingScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SpacingScale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScaleVisitor;

        impl<'de> Visitor<'de> for ScaleVisitor {
            type Value = SpacingScale;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of spacing step names to pixel values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SpacingScale, A::Error> {
                let mut steps = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, f64>()? {
                    steps.push((name, value));
                }
                Ok(SpacingScale(steps))
            }
        }

        deserializer.deserialize_map(ScaleVisitor)
    }
}

impl FromIterator<(String, f64)> for SpacingScale {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        SpacingScale(iter.into_iter().collect())
    }
}

/// Build a complete scale: every step is present, taking the closest observed
/// value when it lies within `tolerance` of the canonical value. Ties between
/// two observations go to the smaller one.
pub fn build_spacing_scale(
    observed: &[f64],
    steps: &[(String, f64)],
    tolerance: f64,
) -> SpacingScale {
    let mut candidates: Vec<f64> = observed
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    candidates.sort_by(f64::total_cmp);
    candidates.dedup();

    steps
        .iter()
        .map(|(name, canonical)| {
            let closest = candidates.iter().copied().fold(None, |best: Option<f64>, v| {
                match best {
                    Some(b) if (b - canonical).abs() <= (v - canonical).abs() => Some(b),
                    _ => Some(v),
                }
            });
            let value = match closest {
                Some(v) if (v - canonical).abs() < tolerance => v,
                _ => *canonical,
            };
            (name.clone(), value)
        })
        .collect()
}

/// Canonical steps as owned pairs, the form config carries.
pub fn default_steps() -> Vec<(String, f64)> {
    CANONICAL_SCALE
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn direction(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }

    /// Leading edge of `bounds` along this axis.
    pub fn start(&self, bounds: &BoundingBox) -> f64 {
        match self {
            Axis::Horizontal => bounds.x,
            Axis::Vertical => bounds.y,
        }
    }

    pub fn extent(&self, bounds: &BoundingBox) -> f64 {
        match self {
            Axis::Horizontal => bounds.width,
            Axis::Vertical => bounds.height,
        }
    }

    pub fn cross(&self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Population variance; zero for fewer than two values.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

/// Axis along which the boxes' positions spread more. Ties are vertical.
pub fn dominant_axis(boxes: &[BoundingBox]) -> Axis {
    let xs: Vec<f64> = boxes.iter().map(|b| b.x).collect();
    let ys: Vec<f64> = boxes.iter().map(|b| b.y).collect();
    if variance(&xs) > variance(&ys) {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Positive gaps between consecutive boxes sorted along `axis`.
pub fn positive_gaps(boxes: &[BoundingBox], axis: Axis) -> Vec<f64> {
    let mut sorted: Vec<&BoundingBox> = boxes.iter().collect();
    sorted.sort_by(|a, b| axis.start(a).total_cmp(&axis.start(b)));
    sorted
        .windows(2)
        .map(|pair| axis.start(pair[1]) - (axis.start(pair[0]) + axis.extent(pair[0])))
        .filter(|gap| *gap > 0.0)
        .collect()
}

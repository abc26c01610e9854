//! Figma document input.
//!
//! This module provides:
//! - API types for parsing Figma JSON into a [`DesignNode`] tree
//! - [`load_figma_file`] / [`parse_figma_file`] - envelope-aware loading of
//!   file responses, cache entries and nodes responses

pub mod api_types;
pub mod loader;

#[cfg(test)]
mod tests;

pub use loader::{figma_file_from_value, load_figma_file, parse_figma_file};

pub use api_types::{
    BoundingBox, ColorStop, Constraints, Dimension, DesignNode, Effect, EffectType, FigmaColor,
    FigmaFile, FontWeightValue, NodeType, Paint, PaintType, TypeStyle, Vector2,
};

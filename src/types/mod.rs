//! Output data types for the three extraction artifacts.
//!
//! - [`tokens`] - `design_tokens`: colors, typography, spacing, effects
//! - [`components`] - `component_catalog`: fingerprinted components and variants
//! - [`layouts`] - `screen_layouts`: screens, child placement, grids

pub mod components;
pub mod layouts;
pub mod tokens;

pub use components::{
    ComponentCatalog, ComponentChild, ComponentProps, ComponentSpec, ComponentSummary,
    ComponentType, ComponentVariant, PaintProps,
};
pub use layouts::{
    ChildLayout, ChildStyle, ChildrenCounts, GridSystem, LayoutKind, LayoutPatterns, LayoutRule,
    LayoutSummary, Padding, Position, ScreenLayout, ScreenLayouts, ScreenSize, ScreenSizeSummary,
    Size,
};
pub use tokens::{
    ColorTokens, DesignTokens, EffectTokens, NamedValue, TokenSummary, TypographyToken,
    TypographyTokens,
};

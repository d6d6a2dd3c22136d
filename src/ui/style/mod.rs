//! Visual styling utilities.
//!
//! Themes are plain bundles of [`ratatui`] styles selected by name from the
//! configuration.

pub mod theme;

pub use theme::{Theme, ThemeDefinition, builtin_themes, by_name, default_theme, names};

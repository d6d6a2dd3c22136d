//! UI building blocks shared across rendering and state modules.

/// Download control and pager bar.
pub mod controls;
/// Prompt row with the query input and busy indicator.
pub mod prompt;
/// Results table rendering.
pub mod results_table;

pub use controls::{ControlsContext, render_controls};
pub use prompt::{PromptContext, render_prompt};
pub use results_table::render_results_table;

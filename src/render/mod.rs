//! Output rendering for synthesized commands.

pub mod json;
pub mod shell;

pub use json::render_json;
pub use shell::{quote, render_command, render_shell, render_unmatched};

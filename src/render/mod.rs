//! Rendering of analysis results.
//!
//! Text result cards for the terminal and a JSON document for scripting.

pub mod cards;
pub mod json;

pub use cards::{render_results, render_write_view};
pub use json::{generate_json_results, ResultsDocument};

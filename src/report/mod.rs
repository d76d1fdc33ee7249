//! Aggregate report computation and rendering.
mod aggregate;
mod format;
mod json;
mod text;


pub use aggregate::AggregateReport;
pub use format::format_count;
pub use json::render_json;
pub use text::{render_text, summary_line};

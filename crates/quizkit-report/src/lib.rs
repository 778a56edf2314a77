//! quizkit-report: HTML rendering for quiz listings and results.
//!
//! Produces self-contained pages with all CSS inlined, suitable for serving
//! as static files next to the quiz data.

pub mod html;

pub use html::{generate_index_html, generate_result_html, write_html};

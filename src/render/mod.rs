//! Chart rendering for batch reports.

pub mod html;

pub use html::render_html_report;

// PDF Layout System
// Implements: line classification, Helvetica-metric word wrap, paginated PDF assembly.
// CPU-bound assembly must run inside tokio::task::spawn_blocking.

pub mod document;
pub mod font_metrics;
pub mod pdf;

// Re-export the public API consumed by the export handlers.
pub use pdf::{render_pdf, PdfError};

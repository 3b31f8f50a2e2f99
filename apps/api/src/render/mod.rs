// Resume rendering: template substitution and the text / PDF exports built on it.

pub mod handlers;
pub mod templates;

pub use templates::{render_resume, TemplateChoice};

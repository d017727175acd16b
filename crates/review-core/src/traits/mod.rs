//! Rendering seams used when projecting views.

mod renderer;

pub use renderer::{LineRenderer, MarkdownRenderer, PlainText};

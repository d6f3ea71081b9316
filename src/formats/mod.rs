//! Hand-written body encoders and the shared term writer.

pub mod html;
pub mod nquads;
pub mod ntriples;
pub mod text;

pub use html::{HtmlBindingsEncoder, HtmlGraphEncoder};
pub use nquads::NQuadsGraphEncoder;
pub use ntriples::NodeWriter;
pub use text::TextBindingsEncoder;

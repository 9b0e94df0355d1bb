pub mod content;

pub use content::{Category, Content, ContentSchema};

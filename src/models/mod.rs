pub mod content;

pub use content::{CategoryCatalog, Content, ContentItem, ContentListing, ContentResponse};

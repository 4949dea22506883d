pub mod link_service;
pub mod page_service;
pub mod render_service;

pub use link_service::{LinkMode, LinkTransformer};
pub use page_service::PageStore;
pub use render_service::PageRenderer;

pub mod templates;

pub use templates::TemplateSet;

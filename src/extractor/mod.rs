pub mod factory;
pub mod r#trait;
pub mod types;

pub use factory::SourceFactory;
pub use r#trait::TextSource;

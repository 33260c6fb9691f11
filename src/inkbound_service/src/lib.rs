pub mod service;
pub mod tracing;

pub use service::ComicService;

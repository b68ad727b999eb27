pub mod service;

pub use service::MarkService;

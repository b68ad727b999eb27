pub mod service;

pub use service::ClassService;

pub mod export;
pub mod service;

pub use export::{ExportService, ExportTable};
pub use service::RankingService;

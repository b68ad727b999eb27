pub mod auth;
pub mod classes;
pub mod faculties;
pub mod marks;
pub mod ranking;
pub mod students;

pub use self::auth::AuthService;
pub use self::classes::ClassService;
pub use self::faculties::FacultyService;
pub use self::marks::MarkService;
pub use self::ranking::{ExportService, ExportTable, RankingService};
pub use self::students::StudentService;

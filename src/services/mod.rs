pub mod internships;
pub mod registry;
pub mod reports;
pub mod submissions;
pub mod system;
pub mod tasks;

pub use internships::InternshipService;
pub use registry::RegistryService;
pub use reports::ReportService;
pub use submissions::SubmissionService;
pub use system::SystemService;
pub use tasks::TaskService;

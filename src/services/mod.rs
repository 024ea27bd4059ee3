pub mod content;
pub mod resume;
pub mod watch_reporter;

pub use content::ContentService;
pub use resume::{ResumePoint, ResumeTracker};
pub use watch_reporter::WatchReporter;

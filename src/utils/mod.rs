pub mod errors;
pub mod format;

pub use errors::{PlayerError, PlayerResult};
pub use format::format_time;

pub mod streamhive;
pub mod traits;

pub use streamhive::StreamHiveApi;
pub use traits::{ContentApi, ContentQuery, WatchHistoryApi};

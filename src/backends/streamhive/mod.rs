mod api;

pub use api::StreamHiveApi;

// Playback-session core shared by the CLI and any front-end embedding it

pub mod backends;
pub mod config;
pub mod constants;
pub mod models;
pub mod player;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::{Config, PlayerSettings};
pub use player::{PlayerController, PlayerHandle, PlayerServices, PlayerSnapshot, PlayerState};
pub use utils::{PlayerError, PlayerResult};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Playback failed to start: {0}")]
    PlaybackStart(String),

    #[error("Fullscreen request failed: {0}")]
    Fullscreen(String),

    #[error("Unsupported playback rate: {0}")]
    InvalidPlaybackRate(f64),

    #[error("Invalid media source: {0}")]
    InvalidSource(String),

    #[error("No media loaded")]
    NotLoaded,

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Player controller disconnected")]
    ControllerDisconnected,
}

pub type PlayerResult<T> = std::result::Result<T, PlayerError>;

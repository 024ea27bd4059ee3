use async_trait::async_trait;
use tokio::sync::watch;

use super::types::{Orientation, PlaybackRate};
use crate::utils::PlayerResult;

/// The platform's native playback primitive.
///
/// Implementations report progress through the `MediaEvent` stream they were
/// created with; none of these calls wait for playback to actually change.
#[async_trait]
pub trait MediaElement: Send {
    async fn load(&mut self, url: &str) -> PlayerResult<()>;
    /// Resolves once the element accepted the play request, or fails
    /// when playback cannot start (decode, network, autoplay policy).
    async fn play(&mut self) -> PlayerResult<()>;
    fn pause(&mut self);
    fn set_position(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
    fn set_playback_rate(&mut self, rate: PlaybackRate);
    /// Releases the source; called once when the player is closed
    fn unload(&mut self);
}

/// Fullscreen capability for the player's root container.
///
/// The outcome of `request`/`exit` is not the fullscreen state; that arrives
/// through `changes`.
#[async_trait]
pub trait FullscreenController: Send + Sync {
    async fn request(&self) -> PlayerResult<()>;
    async fn exit(&self) -> PlayerResult<()>;
    fn changes(&self) -> watch::Receiver<bool>;
}

pub trait OrientationObserver: Send + Sync {
    fn changes(&self) -> watch::Receiver<Orientation>;
}

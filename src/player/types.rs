/// Common types shared by the player components
use serde::Serialize;
use tokio::time::Instant;

use super::gestures::TapZone;
use crate::utils::PlayerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerState {
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
}

impl PlayerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerState::Idle => "idle",
            PlayerState::Loading => "loading",
            PlayerState::Ready => "ready",
            PlayerState::Playing => "playing",
            PlayerState::Paused => "paused",
            PlayerState::Ended => "ended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PlaybackRate {
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndQuarter,
    OneAndHalf,
    Double,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 6] = [
        PlaybackRate::Half,
        PlaybackRate::ThreeQuarters,
        PlaybackRate::Normal,
        PlaybackRate::OneAndQuarter,
        PlaybackRate::OneAndHalf,
        PlaybackRate::Double,
    ];

    pub fn value(&self) -> f64 {
        match self {
            PlaybackRate::Half => 0.5,
            PlaybackRate::ThreeQuarters => 0.75,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::OneAndQuarter => 1.25,
            PlaybackRate::OneAndHalf => 1.5,
            PlaybackRate::Double => 2.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaybackRate::Half => "0.5x",
            PlaybackRate::ThreeQuarters => "0.75x",
            PlaybackRate::Normal => "Normal",
            PlaybackRate::OneAndQuarter => "1.25x",
            PlaybackRate::OneAndHalf => "1.5x",
            PlaybackRate::Double => "2x",
        }
    }
}

impl TryFrom<f64> for PlaybackRate {
    type Error = PlayerError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        PlaybackRate::ALL
            .into_iter()
            .find(|candidate| (candidate.value() - rate).abs() < f64::EPSILON)
            .ok_or(PlayerError::InvalidPlaybackRate(rate))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipDirection {
    Backward,
    Forward,
}

impl SkipDirection {
    pub fn glyph(&self) -> &'static str {
        match self {
            SkipDirection::Backward => "<<",
            SkipDirection::Forward => ">>",
        }
    }
}

/// Transient "+10s / -10s" overlay shown after a skip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkipIndicator {
    pub direction: SkipDirection,
    pub seconds: f64,
}

impl SkipIndicator {
    pub fn label(&self) -> String {
        format!("{}s", self.seconds.round() as i64)
    }
}

/// Events emitted by the native media element.
///
/// The controller is the only consumer; it fans them out to the resume
/// tracker and the watch reporter after updating its own state.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Duration became known
    MetadataLoaded { duration: f64 },
    /// Periodic position update while playing
    TimeUpdate { current_time: f64 },
    /// Buffered range advanced
    Progress { buffered_end: f64 },
    /// Playback stalled waiting for data
    Waiting,
    /// Element actually started (or resumed) rendering
    Playing,
    /// Natural end of stream
    Ended,
    /// Element-level failure (decode, network)
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSession {
    pub content_id: String,
    pub current_time: f64,
    pub duration: f64,
    pub is_playing: bool,
    pub volume: f64,
    pub is_muted: bool,
    pub playback_rate: PlaybackRate,
    pub is_fullscreen: bool,
    pub buffered_end: f64,
}

impl PlaybackSession {
    pub fn new(content_id: impl Into<String>, volume: f64) -> Self {
        Self {
            content_id: content_id.into(),
            current_time: 0.0,
            duration: 0.0,
            is_playing: false,
            volume,
            is_muted: volume == 0.0,
            playback_rate: PlaybackRate::Normal,
            is_fullscreen: false,
            buffered_end: 0.0,
        }
    }

    /// Duration if the element reported a usable one
    pub fn known_duration(&self) -> Option<f64> {
        (self.duration.is_finite() && self.duration > 0.0).then_some(self.duration)
    }

    /// Clamps a position into `[0, duration]`
    pub fn clamp_position(&self, target: f64) -> f64 {
        let upper = self.known_duration().unwrap_or(0.0);
        if target.is_nan() {
            return 0.0;
        }
        target.clamp(0.0, upper)
    }
}

/// Offer to continue from a stored position, shown until chosen or expired
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumePrompt {
    pub position_seconds: f64,
    #[serde(skip)]
    pub expires_at: Instant,
}

/// Read model published to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub state: PlayerState,
    pub session: PlaybackSession,
    pub controls_visible: bool,
    pub last_tap_zone: Option<TapZone>,
    pub skip_indicator: Option<SkipIndicator>,
    pub resume_prompt: Option<ResumePrompt>,
    pub last_error: Option<String>,
}

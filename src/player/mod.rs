pub mod controller;
pub mod gestures;
pub mod simulated;
pub mod source;
pub mod timers;
pub mod traits;
pub mod types;

pub use controller::{PlayerCommand, PlayerController, PlayerHandle, PlayerServices};
pub use gestures::{GestureManager, TapZone, TouchAction};
pub use simulated::{HeadlessFullscreen, ManualOrientation, SimulatedElement};
pub use source::{MediaSource, resolve_source};
pub use traits::{FullscreenController, MediaElement, OrientationObserver};
pub use types::{
    MediaEvent, Orientation, PlaybackRate, PlaybackSession, PlayerSnapshot, PlayerState,
    ResumePrompt, SkipDirection, SkipIndicator,
};

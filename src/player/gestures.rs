use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

use super::timers::Timers;
use super::types::{SkipDirection, SkipIndicator};
use crate::config::PlayerSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum GestureTimer {
    HideControls,
    SkipIndicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TapZone {
    Left,
    Right,
}

/// What a single touch on the video surface asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    SkipBackward,
    SkipForward,
    TogglePlay,
}

/// Chrome visibility and coarse touch interpretation.
///
/// Controls are shown on any pointer activity and hidden again after a quiet
/// period, but only while playing with no overlay open and no seek drag in
/// progress.
#[derive(Debug)]
pub struct GestureManager {
    hide_after: Duration,
    indicator_for: Duration,
    skip_back_zone: f64,
    skip_forward_zone: f64,

    controls_visible: bool,
    last_tap_zone: Option<TapZone>,
    settings_open: bool,
    info_open: bool,
    dragging: bool,
    skip_indicator: Option<SkipIndicator>,
    timers: Timers<GestureTimer>,
}

impl GestureManager {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            hide_after: settings.hide_controls_after,
            indicator_for: settings.skip_indicator_duration,
            skip_back_zone: settings.skip_back_zone,
            skip_forward_zone: settings.skip_forward_zone,
            controls_visible: true,
            last_tap_zone: None,
            settings_open: false,
            info_open: false,
            dragging: false,
            skip_indicator: None,
            timers: Timers::new(),
        }
    }

    /// Pointer movement or touch anywhere over the player
    pub fn on_activity(&mut self, now: Instant) {
        self.controls_visible = true;
        self.timers
            .schedule(GestureTimer::HideControls, now + self.hide_after);
    }

    /// Playback started or stopped; restarts the quiet period either way
    pub fn on_playback_changed(&mut self, now: Instant) {
        self.on_activity(now);
    }

    /// Maps a touch-start to a transport action by horizontal position
    pub fn on_touch_start(&mut self, x: f64, width: f64, now: Instant) -> TouchAction {
        self.on_activity(now);

        let ratio = if width > 0.0 && x.is_finite() {
            x / width
        } else {
            0.5
        };

        let (zone, action) = if ratio < self.skip_back_zone {
            (Some(TapZone::Left), TouchAction::SkipBackward)
        } else if ratio > self.skip_forward_zone {
            (Some(TapZone::Right), TouchAction::SkipForward)
        } else {
            (None, TouchAction::TogglePlay)
        };

        trace!("Touch at {:.2} of width -> {:?}", ratio, action);
        self.last_tap_zone = zone;
        action
    }

    pub fn show_skip_indicator(&mut self, direction: SkipDirection, seconds: f64, now: Instant) {
        self.skip_indicator = Some(SkipIndicator { direction, seconds });
        self.timers
            .schedule(GestureTimer::SkipIndicator, now + self.indicator_for);
    }

    pub fn set_settings_open(&mut self, open: bool, now: Instant) {
        self.settings_open = open;
        self.on_activity(now);
    }

    pub fn set_info_open(&mut self, open: bool, now: Instant) {
        self.info_open = open;
        self.on_activity(now);
    }

    pub fn set_dragging(&mut self, dragging: bool, now: Instant) {
        self.dragging = dragging;
        self.on_activity(now);
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn overlay_open(&self) -> bool {
        self.settings_open || self.info_open
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn on_tick(&mut self, now: Instant, is_playing: bool) {
        for timer in self.timers.take_expired(now) {
            match timer {
                GestureTimer::HideControls => {
                    if is_playing && !self.overlay_open() && !self.dragging {
                        trace!("Hiding controls after inactivity");
                        self.controls_visible = false;
                    }
                }
                GestureTimer::SkipIndicator => {
                    self.skip_indicator = None;
                }
            }
        }
    }

    /// Effective visibility, forced on whenever hiding would strand the user
    pub fn controls_visible(&self, is_playing: bool) -> bool {
        self.controls_visible || !is_playing || self.overlay_open() || self.dragging
    }

    pub fn last_tap_zone(&self) -> Option<TapZone> {
        self.last_tap_zone
    }

    pub fn skip_indicator(&self) -> Option<&SkipIndicator> {
        self.skip_indicator.as_ref()
    }

    /// Cancels the hide and indicator timers
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.skip_indicator = None;
        self.last_tap_zone = None;
        self.controls_visible = true;
    }
}

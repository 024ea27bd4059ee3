use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::traits::{FullscreenController, MediaElement, OrientationObserver};
use super::types::{MediaEvent, Orientation, PlaybackRate};
use crate::utils::{PlayerError, PlayerResult};

#[derive(Debug)]
struct Clock {
    position: f64,
    rate: f64,
}

/// Headless media element that advances a virtual clock.
///
/// Emits the same event sequence a browser video element would: metadata on
/// load, `Playing` once started, a `TimeUpdate` per tick and `Ended` at the
/// end of the stream.
pub struct SimulatedElement {
    duration: f64,
    tick: Duration,
    events: mpsc::UnboundedSender<MediaEvent>,
    clock: Arc<Mutex<Clock>>,
    ticker: Option<JoinHandle<()>>,
    refuse_play: bool,
    volume: f64,
    muted: bool,
}

impl std::fmt::Debug for SimulatedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedElement")
            .field("duration", &self.duration)
            .field("running", &self.ticker.is_some())
            .finish()
    }
}

impl SimulatedElement {
    pub fn new(duration: f64, tick: Duration) -> (Self, mpsc::UnboundedReceiver<MediaEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let element = Self {
            duration,
            tick,
            events,
            clock: Arc::new(Mutex::new(Clock {
                position: 0.0,
                rate: 1.0,
            })),
            ticker: None,
            refuse_play: false,
            volume: 1.0,
            muted: false,
        };
        (element, receiver)
    }

    /// Makes every `play` fail, like a browser blocking autoplay
    pub fn refusing_play(mut self) -> Self {
        self.refuse_play = true;
        self
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn clock(&self) -> MutexGuard<'_, Clock> {
        self.clock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, event: MediaEvent) {
        if self.events.send(event).is_err() {
            trace!("No listener for media events");
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

#[async_trait]
impl MediaElement for SimulatedElement {
    async fn load(&mut self, url: &str) -> PlayerResult<()> {
        if url.is_empty() {
            return Err(PlayerError::InvalidSource(url.to_string()));
        }
        self.stop_ticker();
        self.clock().position = 0.0;

        debug!("Simulated element loaded {} ({:.1}s)", url, self.duration);
        self.emit(MediaEvent::MetadataLoaded {
            duration: self.duration,
        });
        self.emit(MediaEvent::Progress {
            buffered_end: self.duration,
        });
        Ok(())
    }

    async fn play(&mut self) -> PlayerResult<()> {
        if self.refuse_play {
            return Err(PlayerError::PlaybackStart(
                "play() request was refused".to_string(),
            ));
        }
        if self.ticker.as_ref().is_some_and(|t| !t.is_finished()) {
            return Ok(());
        }

        {
            let mut clock = self.clock();
            if clock.position >= self.duration {
                clock.position = 0.0;
            }
        }

        self.emit(MediaEvent::Playing);

        let clock = self.clock.clone();
        let events = self.events.clone();
        let duration = self.duration;
        let tick = self.tick;
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.tick().await;
            loop {
                interval.tick().await;
                let (position, ended) = {
                    let mut clock = clock.lock().unwrap_or_else(|e| e.into_inner());
                    clock.position = (clock.position + tick.as_secs_f64() * clock.rate).min(duration);
                    (clock.position, clock.position >= duration)
                };

                if events
                    .send(MediaEvent::TimeUpdate {
                        current_time: position,
                    })
                    .is_err()
                {
                    break;
                }
                if ended {
                    let _ = events.send(MediaEvent::Ended);
                    break;
                }
            }
        }));
        Ok(())
    }

    fn pause(&mut self) {
        self.stop_ticker();
    }

    fn set_position(&mut self, seconds: f64) {
        let position = seconds.clamp(0.0, self.duration.max(0.0));
        self.clock().position = position;
        self.emit(MediaEvent::TimeUpdate {
            current_time: position,
        });
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_playback_rate(&mut self, rate: PlaybackRate) {
        self.clock().rate = rate.value();
    }

    fn unload(&mut self) {
        self.stop_ticker();
        debug!("Simulated element unloaded");
    }
}

impl Drop for SimulatedElement {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

/// Fullscreen that is always granted immediately
#[derive(Debug)]
pub struct HeadlessFullscreen {
    state: watch::Sender<bool>,
}

impl HeadlessFullscreen {
    pub fn new() -> Self {
        Self {
            state: watch::channel(false).0,
        }
    }
}

impl Default for HeadlessFullscreen {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FullscreenController for HeadlessFullscreen {
    async fn request(&self) -> PlayerResult<()> {
        self.state.send_replace(true);
        Ok(())
    }

    async fn exit(&self) -> PlayerResult<()> {
        self.state.send_replace(false);
        Ok(())
    }

    fn changes(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

/// Orientation source driven by hand
#[derive(Debug)]
pub struct ManualOrientation {
    state: watch::Sender<Orientation>,
}

impl ManualOrientation {
    pub fn new(initial: Orientation) -> Self {
        Self {
            state: watch::channel(initial).0,
        }
    }

    pub fn rotate(&self, orientation: Orientation) {
        self.state.send_replace(orientation);
    }
}

impl OrientationObserver for ManualOrientation {
    fn changes(&self) -> watch::Receiver<Orientation> {
        self.state.subscribe()
    }
}

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, trace, warn};

use super::gestures::{GestureManager, TouchAction};
use super::source::resolve_source;
use super::traits::{FullscreenController, MediaElement, OrientationObserver};
use super::types::{
    MediaEvent, Orientation, PlaybackRate, PlaybackSession, PlayerSnapshot, PlayerState,
    SkipDirection,
};
use crate::backends::traits::WatchHistoryApi;
use crate::config::PlayerSettings;
use crate::constants::FALLBACK_VOLUME;
use crate::services::{ResumeTracker, WatchReporter};
use crate::storage::{CredentialSource, KeyValueStore};
use crate::utils::{PlayerError, PlayerResult};

/// How long the run loop sleeps when no timer is pending
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Collaborators shared by every player instance
#[derive(Clone)]
pub struct PlayerServices {
    pub store: Arc<dyn KeyValueStore>,
    pub watch_api: Arc<dyn WatchHistoryApi>,
    pub credentials: Arc<dyn CredentialSource>,
    pub fullscreen: Arc<dyn FullscreenController>,
    pub orientation: Arc<dyn OrientationObserver>,
}

/// Commands that can be sent to the player controller
#[derive(Debug)]
pub enum PlayerCommand {
    /// Resolve and load a content URL
    Load {
        url: String,
        respond_to: oneshot::Sender<PlayerResult<()>>,
    },
    Play {
        respond_to: oneshot::Sender<PlayerResult<()>>,
    },
    Pause,
    TogglePlay {
        respond_to: oneshot::Sender<PlayerResult<()>>,
    },
    /// Seek to an absolute position; responds with the clamped position
    Seek {
        position: f64,
        respond_to: oneshot::Sender<f64>,
    },
    /// Relative seek with the skip indicator; responds with the new position
    SkipBy {
        delta: f64,
        respond_to: oneshot::Sender<f64>,
    },
    SetVolume {
        volume: f64,
    },
    ToggleMute,
    SetPlaybackRate {
        rate: PlaybackRate,
    },
    ToggleFullscreen {
        respond_to: oneshot::Sender<PlayerResult<()>>,
    },
    /// Pointer moved over the player
    PointerActivity,
    /// Touch started at `x` on a surface `width` wide
    TouchStart {
        x: f64,
        width: f64,
        respond_to: oneshot::Sender<PlayerResult<TouchAction>>,
    },
    BeginSeekDrag,
    EndSeekDrag {
        position: f64,
    },
    SetSettingsOpen(bool),
    SetInfoOpen(bool),
    /// Keep the resumed position and dismiss the prompt
    ContinueFromResume,
    /// Dismiss the prompt and start over
    RestartFromBeginning,
    GetSnapshot {
        respond_to: oneshot::Sender<PlayerSnapshot>,
    },
    /// Tear the player down and stop the event loop
    Close {
        respond_to: oneshot::Sender<()>,
    },
}

/// Single owner of one player instance's transport state.
///
/// Every input (user intent, element event, platform notification, timer)
/// is applied here in order, so the tracker, reporter and gesture manager
/// never see a half-updated session.
pub struct PlayerController {
    element: Box<dyn MediaElement>,
    fullscreen: Arc<dyn FullscreenController>,
    orientation: Arc<dyn OrientationObserver>,
    settings: PlayerSettings,

    session: PlaybackSession,
    state: PlayerState,
    remembered_volume: f64,
    resume_after_stall: bool,
    autoplay_pending: bool,
    last_error: Option<String>,
    closed: bool,

    tracker: ResumeTracker,
    reporter: WatchReporter,
    gestures: GestureManager,

    commands: Option<mpsc::UnboundedReceiver<PlayerCommand>>,
    media_events: Option<mpsc::UnboundedReceiver<MediaEvent>>,
    snapshot_tx: watch::Sender<PlayerSnapshot>,
}

impl std::fmt::Debug for PlayerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerController")
            .field("state", &self.state)
            .field("session", &self.session)
            .field("closed", &self.closed)
            .finish()
    }
}

impl PlayerController {
    /// Create a controller for `content_id` around an element whose events
    /// arrive on `media_events`.
    pub fn new(
        content_id: impl Into<String>,
        element: Box<dyn MediaElement>,
        media_events: mpsc::UnboundedReceiver<MediaEvent>,
        services: PlayerServices,
        settings: PlayerSettings,
    ) -> (PlayerHandle, PlayerController) {
        let content_id = content_id.into();
        let (sender, receiver) = mpsc::unbounded_channel();

        let session = PlaybackSession::new(content_id.clone(), settings.default_volume);
        let tracker = ResumeTracker::new(services.store.clone(), content_id.clone(), &settings);
        let reporter = WatchReporter::new(
            content_id,
            services.watch_api.clone(),
            services.credentials.clone(),
            &settings,
        );
        let gestures = GestureManager::new(&settings);

        let (snapshot_tx, snapshot_rx) = watch::channel(PlayerSnapshot {
            state: PlayerState::Idle,
            session: session.clone(),
            controls_visible: gestures.controls_visible(false),
            last_tap_zone: None,
            skip_indicator: None,
            resume_prompt: None,
            last_error: None,
        });

        let controller = PlayerController {
            element,
            fullscreen: services.fullscreen,
            orientation: services.orientation,
            remembered_volume: settings.default_volume,
            settings,
            session,
            state: PlayerState::Idle,
            resume_after_stall: false,
            autoplay_pending: false,
            last_error: None,
            closed: false,
            tracker,
            reporter,
            gestures,
            commands: Some(receiver),
            media_events: Some(media_events),
            snapshot_tx,
        };

        let handle = PlayerHandle {
            sender,
            snapshots: snapshot_rx,
        };
        (handle, controller)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state,
            session: self.session.clone(),
            controls_visible: self.gestures.controls_visible(self.session.is_playing),
            last_tap_zone: self.gestures.last_tap_zone(),
            skip_indicator: self.gestures.skip_indicator().cloned(),
            resume_prompt: self.tracker.prompt().cloned(),
            last_error: self.last_error.clone(),
        }
    }

    pub fn has_reported_watch(&self) -> bool {
        self.reporter.has_reported()
    }

    pub async fn load(&mut self, url: &str) -> PlayerResult<()> {
        let source = resolve_source(url, &self.settings.api_base_url)?;
        info!(
            "Loading {} from {}",
            self.session.content_id,
            source.playback_url()
        );

        self.state = PlayerState::Loading;
        self.autoplay_pending = self.settings.autoplay;
        if let Err(e) = self.element.load(source.playback_url()).await {
            warn!("Failed to load media: {}", e);
            self.state = PlayerState::Idle;
            self.autoplay_pending = false;
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        Ok(())
    }

    pub async fn play(&mut self) -> PlayerResult<()> {
        match self.state {
            PlayerState::Idle => return Err(PlayerError::NotLoaded),
            PlayerState::Loading => {
                debug!("Play requested while loading, deferring until ready");
                self.autoplay_pending = true;
                return Ok(());
            }
            PlayerState::Playing => return Ok(()),
            PlayerState::Ended => {
                self.element.set_position(0.0);
                self.session.current_time = 0.0;
            }
            PlayerState::Ready | PlayerState::Paused => {}
        }

        self.session.is_playing = true;
        let now = Instant::now();
        match self.element.play().await {
            Ok(()) => {
                debug!("{:?} -> Playing", self.state);
                self.state = PlayerState::Playing;
                self.resume_after_stall = false;
                self.last_error = None;
                self.tracker.start_persisting(now);
                self.gestures.on_playback_changed(now);
                Ok(())
            }
            Err(e) => {
                let message = match e {
                    PlayerError::PlaybackStart(message) => message,
                    other => other.to_string(),
                };
                warn!("Error playing video: {}", message);
                self.session.is_playing = false;
                self.state = PlayerState::Paused;
                self.last_error = Some(message.clone());
                self.tracker.stop_persisting();
                self.gestures.on_playback_changed(now);
                Err(PlayerError::PlaybackStart(message))
            }
        }
    }

    pub fn pause(&mut self) {
        self.autoplay_pending = false;
        let stalled = self.resume_after_stall;
        self.resume_after_stall = false;

        if self.state != PlayerState::Playing && !stalled {
            return;
        }

        self.element.pause();
        self.session.is_playing = false;
        self.state = PlayerState::Paused;
        self.tracker.stop_persisting();
        self.gestures.on_playback_changed(Instant::now());
        debug!("Paused at {:.1}s", self.session.current_time);
    }

    pub async fn toggle_play(&mut self) -> PlayerResult<()> {
        if self.session.is_playing || self.resume_after_stall {
            self.pause();
            Ok(())
        } else {
            self.play().await
        }
    }

    /// Seeks to `target` clamped into the known duration; the session
    /// position changes before the element confirms.
    pub fn seek(&mut self, target: f64) -> f64 {
        let position = self.session.clamp_position(target);
        self.element.set_position(position);
        self.session.current_time = position;

        if self.state == PlayerState::Ended && position < self.session.duration {
            self.state = PlayerState::Paused;
        }
        trace!("Seek to {:.2}s (requested {:.2}s)", position, target);
        position
    }

    pub fn skip_by(&mut self, delta: f64) -> f64 {
        let position = self.seek(self.session.current_time + delta);
        if delta != 0.0 {
            let direction = if delta < 0.0 {
                SkipDirection::Backward
            } else {
                SkipDirection::Forward
            };
            self.gestures
                .show_skip_indicator(direction, delta.abs(), Instant::now());
        }
        position
    }

    pub fn skip_forward(&mut self) -> f64 {
        self.skip_by(self.settings.skip_seconds)
    }

    pub fn skip_backward(&mut self) -> f64 {
        self.skip_by(-self.settings.skip_seconds)
    }

    pub fn set_volume(&mut self, volume: f64) {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        if volume > 0.0 {
            self.remembered_volume = volume;
        }

        self.session.volume = volume;
        self.session.is_muted = volume == 0.0;
        self.element.set_volume(volume);
        self.element.set_muted(self.session.is_muted);
    }

    pub fn toggle_mute(&mut self) {
        if self.session.is_muted {
            if self.session.volume == 0.0 {
                let restored = if self.remembered_volume > 0.0 {
                    self.remembered_volume
                } else {
                    FALLBACK_VOLUME
                };
                self.session.volume = restored;
                self.element.set_volume(restored);
            }
            self.session.is_muted = false;
        } else {
            self.session.is_muted = true;
        }
        self.element.set_muted(self.session.is_muted);
    }

    pub fn set_playback_rate(&mut self, rate: PlaybackRate) {
        self.element.set_playback_rate(rate);
        self.session.playback_rate = rate;
        debug!("Playback rate set to {}", rate.label());
    }

    /// Asks the platform to enter or leave fullscreen. The session flag only
    /// changes when the platform confirms.
    pub async fn toggle_fullscreen(&mut self) -> PlayerResult<()> {
        let result = if self.session.is_fullscreen {
            self.fullscreen.exit().await
        } else {
            self.fullscreen.request().await
        };

        result.map_err(|e| {
            warn!("Error toggling fullscreen: {}", e);
            match e {
                PlayerError::Fullscreen(message) => PlayerError::Fullscreen(message),
                other => PlayerError::Fullscreen(other.to_string()),
            }
        })
    }

    pub fn on_fullscreen_changed(&mut self, fullscreen: bool) {
        if self.session.is_fullscreen != fullscreen {
            debug!("Fullscreen is now {}", fullscreen);
        }
        self.session.is_fullscreen = fullscreen;
    }

    /// Rotating to landscape while playing goes fullscreen; back to portrait
    /// leaves it.
    pub async fn on_orientation_changed(&mut self, orientation: Orientation) {
        let result = match orientation {
            Orientation::Landscape if self.session.is_playing && !self.session.is_fullscreen => {
                self.fullscreen.request().await
            }
            Orientation::Portrait if self.session.is_fullscreen => self.fullscreen.exit().await,
            _ => return,
        };

        if let Err(e) = result {
            warn!("Orientation-driven fullscreen change failed: {}", e);
        }
    }

    pub fn pointer_activity(&mut self) {
        self.gestures.on_activity(Instant::now());
    }

    pub async fn touch_start(&mut self, x: f64, width: f64) -> PlayerResult<TouchAction> {
        let action = self.gestures.on_touch_start(x, width, Instant::now());
        match action {
            TouchAction::SkipBackward => {
                self.skip_backward();
            }
            TouchAction::SkipForward => {
                self.skip_forward();
            }
            TouchAction::TogglePlay => self.toggle_play().await?,
        }
        Ok(action)
    }

    pub fn begin_seek_drag(&mut self) {
        self.gestures.set_dragging(true, Instant::now());
    }

    pub fn end_seek_drag(&mut self, position: f64) -> f64 {
        let position = self.seek(position);
        self.gestures.set_dragging(false, Instant::now());
        position
    }

    pub fn set_settings_open(&mut self, open: bool) {
        self.gestures.set_settings_open(open, Instant::now());
    }

    pub fn set_info_open(&mut self, open: bool) {
        self.gestures.set_info_open(open, Instant::now());
    }

    pub fn continue_from_resume(&mut self) {
        if let Some(prompt) = self.tracker.dismiss_prompt() {
            debug!("Continuing from {:.1}s", prompt.position_seconds);
        }
    }

    pub fn restart_from_beginning(&mut self) {
        self.tracker.dismiss_prompt();
        self.seek(0.0);
        info!("Restarting {} from the beginning", self.session.content_id);
    }

    pub async fn handle_media_event(&mut self, event: MediaEvent) {
        if self.closed {
            return;
        }
        let now = Instant::now();

        match event {
            MediaEvent::MetadataLoaded { duration } => {
                self.session.duration = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    0.0
                };
                if self.state == PlayerState::Loading {
                    debug!("Loading -> Ready, duration {:.1}s", self.session.duration);
                    self.state = PlayerState::Ready;
                }

                if let Some(point) = self.tracker.on_ready(self.session.duration, now).await {
                    self.element.set_position(point.position_seconds);
                    self.session.current_time = point.position_seconds;
                }

                if std::mem::take(&mut self.autoplay_pending) {
                    if let Err(e) = self.play().await {
                        debug!("Autoplay did not start: {}", e);
                    }
                }
            }
            MediaEvent::TimeUpdate { current_time } => {
                if !self.gestures.is_dragging() {
                    self.session.current_time = current_time;
                }
                self.reporter
                    .on_time_update(current_time, self.session.duration)
                    .await;
            }
            MediaEvent::Progress { buffered_end } => {
                self.session.buffered_end = buffered_end.max(0.0);
            }
            MediaEvent::Waiting => {
                if self.state == PlayerState::Playing {
                    debug!("Buffering stall at {:.1}s", self.session.current_time);
                    self.state = PlayerState::Paused;
                    self.session.is_playing = false;
                    self.resume_after_stall = true;
                    self.tracker.stop_persisting();
                    self.gestures.on_playback_changed(now);
                }
            }
            MediaEvent::Playing => {
                if self.resume_after_stall {
                    debug!("Playback resumed after stall");
                    self.resume_after_stall = false;
                    self.state = PlayerState::Playing;
                    self.session.is_playing = true;
                    self.tracker.start_persisting(now);
                    self.gestures.on_playback_changed(now);
                }
            }
            MediaEvent::Ended => {
                info!("Playback of {} ended", self.session.content_id);
                self.state = PlayerState::Ended;
                self.session.is_playing = false;
                self.resume_after_stall = false;
                if let Some(duration) = self.session.known_duration() {
                    self.session.current_time = duration;
                }
                self.tracker.on_ended().await;
                self.gestures.on_playback_changed(now);
            }
            MediaEvent::Error(message) => {
                warn!("Media element error: {}", message);
                self.last_error = Some(message);
                if self.session.is_playing || self.resume_after_stall {
                    self.session.is_playing = false;
                    self.resume_after_stall = false;
                    self.state = PlayerState::Paused;
                    self.tracker.stop_persisting();
                }
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.tracker.next_deadline(), self.gestures.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Runs every timer that is due
    pub async fn on_tick(&mut self) {
        let now = Instant::now();
        self.tracker
            .on_tick(now, self.session.current_time, self.session.is_playing)
            .await;
        self.gestures.on_tick(now, self.session.is_playing);
    }

    /// Tears the instance down. An unfinished position is saved once more
    /// and every timer is cancelled; calling it again does nothing.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if self.state != PlayerState::Ended && self.session.current_time > 0.0 {
            if let Err(e) = self.tracker.persist(self.session.current_time).await {
                warn!("Failed to save position on close: {}", e);
            }
        }

        self.tracker.teardown();
        self.gestures.teardown();
        self.element.pause();
        self.element.unload();
        self.session.is_playing = false;
        self.resume_after_stall = false;
        self.autoplay_pending = false;
        self.reporter.flush().await;
        info!("Closed player for {}", self.session.content_id);
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }

    async fn handle_command(&mut self, command: PlayerCommand) -> ControlFlow<()> {
        trace!("Player command: {:?}", command);
        match command {
            PlayerCommand::Load { url, respond_to } => {
                let _ = respond_to.send(self.load(&url).await);
            }
            PlayerCommand::Play { respond_to } => {
                let _ = respond_to.send(self.play().await);
            }
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::TogglePlay { respond_to } => {
                let _ = respond_to.send(self.toggle_play().await);
            }
            PlayerCommand::Seek {
                position,
                respond_to,
            } => {
                let _ = respond_to.send(self.seek(position));
            }
            PlayerCommand::SkipBy { delta, respond_to } => {
                let _ = respond_to.send(self.skip_by(delta));
            }
            PlayerCommand::SetVolume { volume } => self.set_volume(volume),
            PlayerCommand::ToggleMute => self.toggle_mute(),
            PlayerCommand::SetPlaybackRate { rate } => self.set_playback_rate(rate),
            PlayerCommand::ToggleFullscreen { respond_to } => {
                let _ = respond_to.send(self.toggle_fullscreen().await);
            }
            PlayerCommand::PointerActivity => self.pointer_activity(),
            PlayerCommand::TouchStart {
                x,
                width,
                respond_to,
            } => {
                let _ = respond_to.send(self.touch_start(x, width).await);
            }
            PlayerCommand::BeginSeekDrag => self.begin_seek_drag(),
            PlayerCommand::EndSeekDrag { position } => {
                self.end_seek_drag(position);
            }
            PlayerCommand::SetSettingsOpen(open) => self.set_settings_open(open),
            PlayerCommand::SetInfoOpen(open) => self.set_info_open(open),
            PlayerCommand::ContinueFromResume => self.continue_from_resume(),
            PlayerCommand::RestartFromBeginning => self.restart_from_beginning(),
            PlayerCommand::GetSnapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
            PlayerCommand::Close { respond_to } => {
                self.close().await;
                let _ = respond_to.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Run the controller event loop until closed or every handle is dropped
    pub async fn run(mut self) {
        let Some(mut commands) = self.commands.take() else {
            warn!("PlayerController::run called twice");
            return;
        };
        let mut media_events = self.media_events.take();
        let mut fullscreen_changes = Some(self.fullscreen.changes());
        let mut orientation_changes = Some(self.orientation.changes());

        debug!(
            "PlayerController event loop started for {}",
            self.session.content_id
        );
        self.publish();

        loop {
            let wake_at = self
                .next_deadline()
                .unwrap_or_else(|| Instant::now() + IDLE_WAIT);

            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => {
                        if self.handle_command(command).await.is_break() {
                            break;
                        }
                    }
                    None => {
                        debug!("All player handles dropped");
                        break;
                    }
                },
                event = next_media_event(&mut media_events) => match event {
                    Some(event) => self.handle_media_event(event).await,
                    None => {
                        debug!("Media element event stream closed");
                        media_events = None;
                    }
                },
                change = next_change(&mut fullscreen_changes) => match change {
                    Some(fullscreen) => self.on_fullscreen_changed(fullscreen),
                    None => fullscreen_changes = None,
                },
                change = next_change(&mut orientation_changes) => match change {
                    Some(orientation) => self.on_orientation_changed(orientation).await,
                    None => orientation_changes = None,
                },
                _ = sleep_until(wake_at) => self.on_tick().await,
            }

            self.publish();
        }

        self.close().await;
        self.publish();
        debug!("PlayerController event loop stopped");
    }
}

async fn next_media_event(
    events: &mut Option<mpsc::UnboundedReceiver<MediaEvent>>,
) -> Option<MediaEvent> {
    match events {
        Some(events) => events.recv().await,
        None => std::future::pending().await,
    }
}

async fn next_change<T: Clone>(changes: &mut Option<watch::Receiver<T>>) -> Option<T> {
    match changes {
        Some(changes) => match changes.changed().await {
            Ok(()) => Some(changes.borrow_and_update().clone()),
            Err(_) => None,
        },
        None => std::future::pending().await,
    }
}

/// Cloneable front door to a running `PlayerController`
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    sender: mpsc::UnboundedSender<PlayerCommand>,
    snapshots: watch::Receiver<PlayerSnapshot>,
}

impl PlayerHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> PlayerCommand,
    ) -> PlayerResult<T> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .map_err(|_| PlayerError::ControllerDisconnected)?;
        response
            .await
            .map_err(|_| PlayerError::ControllerDisconnected)
    }

    fn notify(&self, command: PlayerCommand) -> PlayerResult<()> {
        self.sender
            .send(command)
            .map_err(|_| PlayerError::ControllerDisconnected)
    }

    /// Latest state, updated after every input the controller processes
    pub fn subscribe(&self) -> watch::Receiver<PlayerSnapshot> {
        self.snapshots.clone()
    }

    pub async fn load(&self, url: &str) -> PlayerResult<()> {
        let url = url.to_string();
        self.request(|respond_to| PlayerCommand::Load { url, respond_to })
            .await?
    }

    pub async fn play(&self) -> PlayerResult<()> {
        self.request(|respond_to| PlayerCommand::Play { respond_to })
            .await?
    }

    pub fn pause(&self) -> PlayerResult<()> {
        self.notify(PlayerCommand::Pause)
    }

    pub async fn toggle_play(&self) -> PlayerResult<()> {
        self.request(|respond_to| PlayerCommand::TogglePlay { respond_to })
            .await?
    }

    pub async fn seek(&self, position: f64) -> PlayerResult<f64> {
        self.request(|respond_to| PlayerCommand::Seek {
            position,
            respond_to,
        })
        .await
    }

    pub async fn skip_by(&self, delta: f64) -> PlayerResult<f64> {
        self.request(|respond_to| PlayerCommand::SkipBy { delta, respond_to })
            .await
    }

    pub fn set_volume(&self, volume: f64) -> PlayerResult<()> {
        self.notify(PlayerCommand::SetVolume { volume })
    }

    pub fn toggle_mute(&self) -> PlayerResult<()> {
        self.notify(PlayerCommand::ToggleMute)
    }

    pub fn set_playback_rate(&self, rate: PlaybackRate) -> PlayerResult<()> {
        self.notify(PlayerCommand::SetPlaybackRate { rate })
    }

    pub async fn toggle_fullscreen(&self) -> PlayerResult<()> {
        self.request(|respond_to| PlayerCommand::ToggleFullscreen { respond_to })
            .await?
    }

    pub fn pointer_activity(&self) -> PlayerResult<()> {
        self.notify(PlayerCommand::PointerActivity)
    }

    pub async fn touch_start(&self, x: f64, width: f64) -> PlayerResult<TouchAction> {
        self.request(|respond_to| PlayerCommand::TouchStart {
            x,
            width,
            respond_to,
        })
        .await?
    }

    pub fn begin_seek_drag(&self) -> PlayerResult<()> {
        self.notify(PlayerCommand::BeginSeekDrag)
    }

    pub fn end_seek_drag(&self, position: f64) -> PlayerResult<()> {
        self.notify(PlayerCommand::EndSeekDrag { position })
    }

    pub fn set_settings_open(&self, open: bool) -> PlayerResult<()> {
        self.notify(PlayerCommand::SetSettingsOpen(open))
    }

    pub fn set_info_open(&self, open: bool) -> PlayerResult<()> {
        self.notify(PlayerCommand::SetInfoOpen(open))
    }

    pub fn continue_from_resume(&self) -> PlayerResult<()> {
        self.notify(PlayerCommand::ContinueFromResume)
    }

    pub fn restart_from_beginning(&self) -> PlayerResult<()> {
        self.notify(PlayerCommand::RestartFromBeginning)
    }

    pub async fn snapshot(&self) -> PlayerResult<PlayerSnapshot> {
        self.request(|respond_to| PlayerCommand::GetSnapshot { respond_to })
            .await
    }

    pub async fn close(&self) -> PlayerResult<()> {
        self.request(|respond_to| PlayerCommand::Close { respond_to })
            .await
    }
}

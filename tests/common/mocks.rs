use anyhow::{Result, anyhow};
use async_trait::async_trait;
use hive_player::backends::WatchHistoryApi;
use hive_player::player::{FullscreenController, MediaElement, PlaybackRate};
use hive_player::storage::CredentialSource;
use hive_player::utils::{PlayerError, PlayerResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Everything the controller asked the element to do
#[derive(Debug, Default, Clone)]
pub struct ElementLog {
    pub loaded: Vec<String>,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub positions: Vec<f64>,
    pub volume: Option<f64>,
    pub muted: Option<bool>,
    pub rate: Option<PlaybackRate>,
    pub unloaded: bool,
}

/// Element that records calls and never emits events on its own
pub struct MockElement {
    pub log: Arc<Mutex<ElementLog>>,
    pub fail_play: Arc<AtomicBool>,
}

impl MockElement {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(ElementLog::default())),
            fail_play: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl MediaElement for MockElement {
    async fn load(&mut self, url: &str) -> PlayerResult<()> {
        self.log.lock().unwrap().loaded.push(url.to_string());
        Ok(())
    }

    async fn play(&mut self) -> PlayerResult<()> {
        self.log.lock().unwrap().play_calls += 1;
        if self.fail_play.load(Ordering::SeqCst) {
            return Err(PlayerError::PlaybackStart("decode error".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.log.lock().unwrap().pause_calls += 1;
    }

    fn set_position(&mut self, seconds: f64) {
        self.log.lock().unwrap().positions.push(seconds);
    }

    fn set_volume(&mut self, volume: f64) {
        self.log.lock().unwrap().volume = Some(volume);
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.lock().unwrap().muted = Some(muted);
    }

    fn set_playback_rate(&mut self, rate: PlaybackRate) {
        self.log.lock().unwrap().rate = Some(rate);
    }

    fn unload(&mut self) {
        self.log.lock().unwrap().unloaded = true;
    }
}

/// Fullscreen that can be told to reject requests
pub struct FakeFullscreen {
    state: watch::Sender<bool>,
    pub fail: AtomicBool,
    pub requests: Mutex<Vec<bool>>,
}

impl FakeFullscreen {
    pub fn new() -> Self {
        Self {
            state: watch::channel(false).0,
            fail: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        *self.state.borrow()
    }

    fn apply(&self, fullscreen: bool) -> PlayerResult<()> {
        self.requests.lock().unwrap().push(fullscreen);
        if self.fail.load(Ordering::SeqCst) {
            return Err(PlayerError::Fullscreen("permission denied".to_string()));
        }
        self.state.send_replace(fullscreen);
        Ok(())
    }
}

#[async_trait]
impl FullscreenController for FakeFullscreen {
    async fn request(&self) -> PlayerResult<()> {
        self.apply(true)
    }

    async fn exit(&self) -> PlayerResult<()> {
        self.apply(false)
    }

    fn changes(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

#[derive(Default)]
pub struct RecordingWatchApi {
    pub calls: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
    /// Report never completes, like a backend that stopped answering
    pub hang: AtomicBool,
}

impl RecordingWatchApi {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl WatchHistoryApi for RecordingWatchApi {
    async fn report_watched(&self, token: &str, content_id: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), content_id.to_string()));
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("503 Service Unavailable"));
        }
        Ok(())
    }
}

pub struct FixedToken(pub Option<String>);

#[async_trait]
impl CredentialSource for FixedToken {
    async fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

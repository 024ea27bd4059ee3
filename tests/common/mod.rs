#![allow(dead_code)]

pub mod mocks;

use hive_player::config::PlayerSettings;
use hive_player::player::{
    ManualOrientation, MediaEvent, Orientation, PlayerController, PlayerHandle, PlayerServices,
};
use hive_player::storage::{KeyValueStore, MemoryStore};
use mocks::{ElementLog, FakeFullscreen, FixedToken, MockElement, RecordingWatchApi};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub const CONTENT_ID: &str = "42";
pub const VIDEO_URL: &str = "https://cdn.example.com/movie.mp4";

pub fn test_settings() -> PlayerSettings {
    PlayerSettings {
        api_base_url: "https://api.test".to_string(),
        autoplay: false,
        ..PlayerSettings::default()
    }
}

pub struct TestPlayerBuilder {
    settings: PlayerSettings,
    entries: Vec<(String, String)>,
    token: Option<String>,
}

impl TestPlayerBuilder {
    pub fn autoplay(mut self) -> Self {
        self.settings.autoplay = true;
        self
    }

    pub fn with_stored_position(mut self, raw: &str) -> Self {
        self.entries
            .push((format!("lastWatched_{}", CONTENT_ID), raw.to_string()));
        self
    }

    pub fn with_default_volume(mut self, volume: f64) -> Self {
        self.settings.default_volume = volume;
        self
    }

    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }

    pub fn build(self) -> TestPlayer {
        let store = Arc::new(MemoryStore::with_entries(self.entries));
        let watch_api = Arc::new(RecordingWatchApi::default());
        let fullscreen = Arc::new(FakeFullscreen::new());
        let orientation = Arc::new(ManualOrientation::new(Orientation::Portrait));
        let element = MockElement::new();
        let element_log = element.log.clone();
        let fail_play = element.fail_play.clone();
        let (events, media_events) = mpsc::unbounded_channel();

        let services = PlayerServices {
            store: store.clone(),
            watch_api: watch_api.clone(),
            credentials: Arc::new(FixedToken(self.token)),
            fullscreen: fullscreen.clone(),
            orientation: orientation.clone(),
        };
        let (handle, controller) = PlayerController::new(
            CONTENT_ID,
            Box::new(element),
            media_events,
            services,
            self.settings,
        );

        TestPlayer {
            controller,
            handle,
            element: element_log,
            fail_play,
            store,
            watch_api,
            fullscreen,
            orientation,
            events,
        }
    }
}

/// A controller wired to fakes, driven directly by the test
pub struct TestPlayer {
    pub controller: PlayerController,
    pub handle: PlayerHandle,
    pub element: Arc<Mutex<ElementLog>>,
    pub fail_play: Arc<AtomicBool>,
    pub store: Arc<MemoryStore>,
    pub watch_api: Arc<RecordingWatchApi>,
    pub fullscreen: Arc<FakeFullscreen>,
    pub orientation: Arc<ManualOrientation>,
    pub events: mpsc::UnboundedSender<MediaEvent>,
}

impl TestPlayer {
    pub fn builder() -> TestPlayerBuilder {
        TestPlayerBuilder {
            settings: test_settings(),
            entries: Vec::new(),
            token: Some("test-token".to_string()),
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Loads the test video and delivers its metadata
    pub async fn ready(mut self, duration: f64) -> Self {
        self.controller.load(VIDEO_URL).await.unwrap();
        self.controller
            .handle_media_event(MediaEvent::MetadataLoaded { duration })
            .await;
        self
    }

    pub async fn playing(mut self, duration: f64) -> Self {
        self = self.ready(duration).await;
        self.controller.play().await.unwrap();
        self
    }

    pub async fn time_update(&mut self, current_time: f64) {
        self.controller
            .handle_media_event(MediaEvent::TimeUpdate { current_time })
            .await;
    }

    pub async fn stored_position(&self) -> Option<String> {
        self.store
            .get(&format!("lastWatched_{}", CONTENT_ID))
            .await
            .unwrap()
    }

    pub fn element(&self) -> ElementLog {
        self.element.lock().unwrap().clone()
    }
}

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::PlayerSettings;
use crate::constants::RESUME_KEY_PREFIX;
use crate::player::timers::Timers;
use crate::player::types::ResumePrompt;
use crate::storage::KeyValueStore;
use crate::utils::PlayerResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TrackerTimer {
    Persist,
    PromptExpiry,
}

/// Last known position for one content item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumePoint {
    pub content_id: String,
    pub position_seconds: f64,
}

pub fn resume_key(content_id: &str) -> String {
    format!("{}{}", RESUME_KEY_PREFIX, content_id)
}

/// Whether a stored position is worth resuming from.
///
/// Positions near the end count as finished, and nothing is offered when the
/// duration is unknown.
pub fn should_offer_resume(position: f64, duration: f64, finished_fraction: f64) -> bool {
    duration.is_finite()
        && duration > 0.0
        && position.is_finite()
        && position >= 0.0
        && position < finished_fraction * duration
}

fn parse_position(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

/// Persists playback position per content id and offers to resume from it.
#[derive(Debug)]
pub struct ResumeTracker {
    store: Arc<dyn KeyValueStore>,
    content_id: String,
    persist_interval: Duration,
    prompt_timeout: Duration,
    finished_fraction: f64,
    prompt: Option<ResumePrompt>,
    timers: Timers<TrackerTimer>,
}

impl ResumeTracker {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        content_id: impl Into<String>,
        settings: &PlayerSettings,
    ) -> Self {
        Self {
            store,
            content_id: content_id.into(),
            persist_interval: settings.persist_interval,
            prompt_timeout: settings.resume_prompt_timeout,
            finished_fraction: settings.finished_fraction,
            prompt: None,
            timers: Timers::new(),
        }
    }

    fn key(&self) -> String {
        resume_key(&self.content_id)
    }

    /// Stored position, with unreadable or corrupt values treated as absent
    pub async fn stored_position(&self) -> Option<f64> {
        match self.store.get(&self.key()).await {
            Ok(Some(raw)) => {
                let position = parse_position(&raw);
                if position.is_none() {
                    warn!(
                        "Ignoring corrupt resume position {:?} for {}",
                        raw, self.content_id
                    );
                }
                position
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read resume position for {}: {}", self.content_id, e);
                None
            }
        }
    }

    /// Duration became known; returns the point to seek to if one is offered
    pub async fn on_ready(&mut self, duration: f64, now: Instant) -> Option<ResumePoint> {
        if !(duration.is_finite() && duration > 0.0) {
            debug!("No usable duration for {}, not offering resume", self.content_id);
            return None;
        }

        let position = self.stored_position().await?;
        if !should_offer_resume(position, duration, self.finished_fraction) {
            debug!(
                "Stored position {:.1}s of {:.1}s treated as finished for {}",
                position, duration, self.content_id
            );
            return None;
        }

        info!("Offering resume from {:.1}s for {}", position, self.content_id);
        let expires_at = now + self.prompt_timeout;
        self.prompt = Some(ResumePrompt {
            position_seconds: position,
            expires_at,
        });
        self.timers.schedule(TrackerTimer::PromptExpiry, expires_at);

        Some(ResumePoint {
            content_id: self.content_id.clone(),
            position_seconds: position,
        })
    }

    pub fn prompt(&self) -> Option<&ResumePrompt> {
        self.prompt.as_ref()
    }

    pub fn dismiss_prompt(&mut self) -> Option<ResumePrompt> {
        self.timers.cancel(TrackerTimer::PromptExpiry);
        self.prompt.take()
    }

    /// Arms the fixed-interval persistence timer if it is not running
    pub fn start_persisting(&mut self, now: Instant) {
        if !self.timers.is_scheduled(TrackerTimer::Persist) {
            self.timers
                .schedule(TrackerTimer::Persist, now + self.persist_interval);
        }
    }

    pub fn stop_persisting(&mut self) {
        self.timers.cancel(TrackerTimer::Persist);
    }

    pub fn is_persisting(&self) -> bool {
        self.timers.is_scheduled(TrackerTimer::Persist)
    }

    pub async fn persist(&self, position: f64) -> PlayerResult<()> {
        let position = if position.is_finite() { position.max(0.0) } else { 0.0 };
        self.store.set(&self.key(), &position.to_string()).await?;
        debug!("Saved resume position {:.1}s for {}", position, self.content_id);
        Ok(())
    }

    /// End of stream: the item is finished, forget where we were
    pub async fn on_ended(&mut self) {
        self.stop_persisting();
        self.dismiss_prompt();
        if let Err(e) = self.store.remove(&self.key()).await {
            warn!("Failed to clear resume position for {}: {}", self.content_id, e);
        } else {
            debug!("Cleared resume position for {}", self.content_id);
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub async fn on_tick(&mut self, now: Instant, position: f64, is_playing: bool) {
        for timer in self.timers.take_expired(now) {
            match timer {
                TrackerTimer::Persist => {
                    if !is_playing {
                        continue;
                    }
                    if let Err(e) = self.persist(position).await {
                        warn!("Failed to save resume position: {}", e);
                    }
                    self.timers
                        .schedule(TrackerTimer::Persist, now + self.persist_interval);
                }
                TrackerTimer::PromptExpiry => {
                    debug!("Resume prompt expired, continuing from stored position");
                    self.prompt = None;
                }
            }
        }
    }

    /// Cancels both timers; the stored position is left as is
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.prompt = None;
    }
}

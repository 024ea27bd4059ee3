use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::backends::traits::WatchHistoryApi;
use crate::config::PlayerSettings;
use crate::constants::{REPORT_FLUSH_GRACE_MS, TOKEN_RECHECK_SECS};
use crate::storage::CredentialSource;

/// True once playback went past the absolute mark or the fraction of the
/// duration, whichever comes first.
pub fn watched_threshold_crossed(
    current_time: f64,
    duration: f64,
    after_secs: f64,
    fraction: f64,
) -> bool {
    current_time > after_secs || (duration > 0.0 && current_time > fraction * duration)
}

/// Sends the "watched" signal at most once per player session.
///
/// The flag flips before the request resolves and is never reset, so a slow
/// or failed request can't cause a second report.
pub struct WatchReporter {
    content_id: String,
    api: Arc<dyn WatchHistoryApi>,
    credentials: Arc<dyn CredentialSource>,
    watched_after_secs: f64,
    watched_fraction: f64,
    has_reported: bool,
    warned_missing_token: bool,
    next_token_check: Option<Instant>,
    in_flight: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for WatchReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchReporter")
            .field("content_id", &self.content_id)
            .field("has_reported", &self.has_reported)
            .field("in_flight", &self.in_flight.is_some())
            .finish()
    }
}

impl WatchReporter {
    pub fn new(
        content_id: impl Into<String>,
        api: Arc<dyn WatchHistoryApi>,
        credentials: Arc<dyn CredentialSource>,
        settings: &PlayerSettings,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            api,
            credentials,
            watched_after_secs: settings.watched_after_secs,
            watched_fraction: settings.watched_fraction,
            has_reported: false,
            warned_missing_token: false,
            next_token_check: None,
            in_flight: None,
        }
    }

    pub fn has_reported(&self) -> bool {
        self.has_reported
    }

    /// Checks the threshold on a timing update; returns true if a report was
    /// dispatched by this call.
    pub async fn on_time_update(&mut self, current_time: f64, duration: f64) -> bool {
        if self.has_reported
            || !watched_threshold_crossed(
                current_time,
                duration,
                self.watched_after_secs,
                self.watched_fraction,
            )
        {
            return false;
        }

        let now = Instant::now();
        if self.next_token_check.is_some_and(|at| now < at) {
            return false;
        }

        let Some(token) = self.credentials.token().await else {
            self.next_token_check = Some(now + Duration::from_secs(TOKEN_RECHECK_SECS));
            if !self.warned_missing_token {
                warn!(
                    "No auth token available, skipping watch report for {}",
                    self.content_id
                );
                self.warned_missing_token = true;
            }
            return false;
        };

        self.has_reported = true;
        info!(
            "Reporting {} as watched at {:.1}s",
            self.content_id, current_time
        );

        let api = self.api.clone();
        let content_id = self.content_id.clone();
        self.in_flight = Some(tokio::spawn(async move {
            if let Err(e) = api.report_watched(&token, &content_id).await {
                warn!("Watch report for {} failed, not retrying: {}", content_id, e);
            }
        }));

        true
    }

    /// Gives an outstanding report a short grace period to finish. A report
    /// still pending after that keeps running detached.
    pub async fn flush(&mut self) {
        let Some(mut handle) = self.in_flight.take() else {
            return;
        };
        let grace = Duration::from_millis(REPORT_FLUSH_GRACE_MS);
        match tokio::time::timeout(grace, &mut handle).await {
            Ok(_) => debug!("Watch report for {} settled", self.content_id),
            Err(_) => warn!(
                "Watch report for {} still pending after {:?}, detaching",
                self.content_id, grace
            ),
        }
    }
}

mod common;

use common::TestPlayer;
use hive_player::player::{MediaEvent, PlayerState};
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::time::advance;

#[tokio::test(start_paused = true)]
async fn test_resume_offered_and_seeked_on_ready() {
    let mut player = TestPlayer::builder()
        .with_stored_position("120.5")
        .build()
        .ready(600.0)
        .await;

    let snapshot = player.controller.snapshot();
    assert_eq!(snapshot.resume_prompt.unwrap().position_seconds, 120.5);
    assert_eq!(player.controller.session().current_time, 120.5);
    assert_eq!(player.element().positions, vec![120.5]);

    // Untouched, the prompt goes away and playback stays at the resumed spot
    advance(Duration::from_secs(5)).await;
    player.controller.on_tick().await;
    assert!(player.controller.snapshot().resume_prompt.is_none());
    assert_eq!(player.controller.session().current_time, 120.5);
}

#[tokio::test(start_paused = true)]
async fn test_restart_from_beginning_dismisses_prompt() {
    let mut player = TestPlayer::builder()
        .with_stored_position("42")
        .build()
        .ready(100.0)
        .await;

    player.controller.restart_from_beginning();
    assert!(player.controller.snapshot().resume_prompt.is_none());
    assert_eq!(player.controller.session().current_time, 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_continue_keeps_resumed_position() {
    let mut player = TestPlayer::builder()
        .with_stored_position("42")
        .build()
        .ready(100.0)
        .await;

    player.controller.continue_from_resume();
    assert!(player.controller.snapshot().resume_prompt.is_none());
    assert_eq!(player.controller.session().current_time, 42.0);
}

#[tokio::test(start_paused = true)]
async fn test_resume_not_offered_near_end_corrupt_or_without_duration() {
    for (raw, duration) in [("96", 100.0), ("95", 100.0), ("garbage", 100.0), ("10", 0.0)] {
        let player = TestPlayer::builder()
            .with_stored_position(raw)
            .build()
            .ready(duration)
            .await;

        assert!(
            player.controller.snapshot().resume_prompt.is_none(),
            "{} of {}",
            raw,
            duration
        );
        assert_eq!(player.controller.session().current_time, 0.0);
        assert!(player.element().positions.is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn test_position_persisted_every_interval_while_playing() {
    let mut player = TestPlayer::new().playing(100.0).await;

    player.time_update(4.0).await;
    advance(Duration::from_secs(4)).await;
    player.controller.on_tick().await;
    assert_eq!(player.stored_position().await, None);

    advance(Duration::from_secs(1)).await;
    player.controller.on_tick().await;
    assert_eq!(player.stored_position().await.as_deref(), Some("4"));

    player.time_update(9.5).await;
    advance(Duration::from_secs(5)).await;
    player.controller.on_tick().await;
    assert_eq!(player.stored_position().await.as_deref(), Some("9.5"));
}

#[tokio::test(start_paused = true)]
async fn test_persistence_stops_while_paused() {
    let mut player = TestPlayer::new().playing(100.0).await;
    player.time_update(3.0).await;
    player.controller.pause();

    player.time_update(8.0).await;
    advance(Duration::from_secs(10)).await;
    player.controller.on_tick().await;

    assert_eq!(player.stored_position().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_end_of_stream_clears_resume_point() {
    let mut player = TestPlayer::builder()
        .with_stored_position("30")
        .build()
        .playing(100.0)
        .await;

    player.time_update(100.0).await;
    player
        .controller
        .handle_media_event(MediaEvent::Ended)
        .await;

    assert_eq!(player.controller.state(), PlayerState::Ended);
    assert_eq!(player.stored_position().await, None);

    // Nothing rewrites it afterwards
    advance(Duration::from_secs(10)).await;
    player.controller.on_tick().await;
    assert_eq!(player.stored_position().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_watch_reported_once_past_fraction() {
    let mut player = TestPlayer::new().playing(100.0).await;

    player.time_update(9.0).await;
    assert!(!player.controller.has_reported_watch());

    player.time_update(11.0).await;
    assert!(player.controller.has_reported_watch());

    for t in [12.0, 50.0, 99.0] {
        player.time_update(t).await;
    }
    player.controller.close().await;

    assert_eq!(player.watch_api.call_count(), 1);
    let calls = player.watch_api.calls.lock().unwrap();
    assert_eq!(calls[0], ("test-token".to_string(), "42".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_watch_reported_past_absolute_mark_on_long_content() {
    let mut player = TestPlayer::new().playing(1000.0).await;

    player.time_update(29.0).await;
    assert!(!player.controller.has_reported_watch());

    player.time_update(31.0).await;
    assert!(player.controller.has_reported_watch());

    player.controller.close().await;
    assert_eq!(player.watch_api.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_watch_report_is_not_retried() {
    let mut player = TestPlayer::new().playing(100.0).await;
    player.watch_api.fail.store(true, Ordering::SeqCst);

    player.time_update(20.0).await;
    player.time_update(40.0).await;
    assert_eq!(player.controller.state(), PlayerState::Playing);
    player.controller.close().await;

    assert!(player.controller.has_reported_watch());
    assert_eq!(player.watch_api.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_close_does_not_wait_on_hung_watch_report() {
    let mut player = TestPlayer::new().playing(100.0).await;
    player.watch_api.hang.store(true, Ordering::SeqCst);
    player.time_update(40.0).await;
    assert!(player.controller.has_reported_watch());

    let started = tokio::time::Instant::now();
    player.controller.close().await;

    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(player.element().unloaded);
    assert_eq!(player.watch_api.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_watch_not_reported_without_token() {
    let mut player = TestPlayer::builder()
        .without_token()
        .build()
        .playing(100.0)
        .await;

    player.time_update(50.0).await;
    player.time_update(60.0).await;
    player.controller.close().await;

    assert!(!player.controller.has_reported_watch());
    assert_eq!(player.watch_api.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_controls_hide_after_inactivity_while_playing() {
    let mut player = TestPlayer::new().playing(100.0).await;
    assert!(player.controller.snapshot().controls_visible);

    advance(Duration::from_millis(3001)).await;
    player.controller.on_tick().await;
    assert!(!player.controller.snapshot().controls_visible);

    player.controller.pointer_activity();
    assert!(player.controller.snapshot().controls_visible);
}

#[tokio::test(start_paused = true)]
async fn test_controls_stay_visible_while_paused_or_overlay_open() {
    let mut player = TestPlayer::new().ready(100.0).await;
    player.controller.pointer_activity();
    advance(Duration::from_secs(4)).await;
    player.controller.on_tick().await;
    assert!(player.controller.snapshot().controls_visible);

    player.controller.play().await.unwrap();
    player.controller.set_settings_open(true);
    advance(Duration::from_secs(4)).await;
    player.controller.on_tick().await;
    assert!(player.controller.snapshot().controls_visible);

    player.controller.set_settings_open(false);
    player.controller.set_info_open(true);
    advance(Duration::from_secs(4)).await;
    player.controller.on_tick().await;
    assert!(player.controller.snapshot().controls_visible);
}

#[tokio::test(start_paused = true)]
async fn test_skip_indicator_expires() {
    let mut player = TestPlayer::new().playing(100.0).await;
    player.controller.seek(50.0);
    player.controller.skip_forward();

    advance(Duration::from_millis(799)).await;
    player.controller.on_tick().await;
    assert!(player.controller.snapshot().skip_indicator.is_some());

    advance(Duration::from_millis(2)).await;
    player.controller.on_tick().await;
    assert!(player.controller.snapshot().skip_indicator.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_next_deadline_is_earliest_timer() {
    let mut player = TestPlayer::new().playing(100.0).await;
    let start = tokio::time::Instant::now();

    // Hide timer (3s) comes before the persistence interval (5s)
    assert_eq!(
        player.controller.next_deadline(),
        Some(start + Duration::from_secs(3))
    );

    player.controller.skip_forward();
    assert_eq!(
        player.controller.next_deadline(),
        Some(start + Duration::from_millis(800))
    );
}

#[tokio::test(start_paused = true)]
async fn test_close_flushes_position_and_cancels_timers() {
    let mut player = TestPlayer::new().playing(100.0).await;
    player.time_update(12.0).await;
    player.controller.skip_forward();
    assert!(player.controller.next_deadline().is_some());

    player.controller.close().await;

    assert_eq!(player.controller.next_deadline(), None);
    assert_eq!(player.stored_position().await.as_deref(), Some("22"));
    assert!(player.element().unloaded);

    // A second close is a no-op
    player.controller.close().await;
    assert_eq!(player.element().pause_calls, 1);
}

#[tokio::test(start_paused = true)]
async fn test_events_after_close_are_ignored() {
    let mut player = TestPlayer::new().playing(100.0).await;
    player.controller.close().await;

    player.time_update(90.0).await;
    player
        .controller
        .handle_media_event(MediaEvent::Ended)
        .await;

    assert_ne!(player.controller.state(), PlayerState::Ended);
    assert!(!player.controller.has_reported_watch());
}

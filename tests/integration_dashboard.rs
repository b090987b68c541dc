use pulseboard_lib::dashboard::DashboardCore;
use pulseboard_lib::models::{DashboardSettings, SaveProfilePayload, Theme, View};
use pulseboard_lib::simulate::ScriptedJitter;
use pulseboard_lib::theme::{FileThemeStore, InMemoryThemeStore};
use std::sync::Arc;
use std::time::Duration;

fn fast_settings() -> DashboardSettings {
    DashboardSettings {
        tick_interval_ms: 25,
        notification_read_delay_ms: 20,
        save_ack_delay_ms: 20,
        transient_message_ms: 30,
    }
}

fn core() -> DashboardCore {
    DashboardCore::new(Arc::new(InMemoryThemeStore::default()), fast_settings())
}

#[tokio::test]
async fn search_session_end_to_end() {
    let core = core();

    let seeded = core.activity_feed();
    assert_eq!(seeded.rows.len(), 5);
    assert_eq!(seeded.message, "");

    let filtered = core.set_search_query("sarah".to_string());
    assert_eq!(filtered.rows.len(), 1);
    assert_eq!(filtered.rows[0].activity.user, "Sarah Chen");
    assert_eq!(filtered.message, "Found 1 result for \"sarah\"");

    let submitted = core.submit_search().await;
    assert_eq!(submitted.message, "Showing 1 result for \"sarah\"");

    let missed = core.set_search_query("xyz".to_string());
    assert!(missed.rows.is_empty());
    assert_eq!(missed.message, "Found 0 results for \"xyz\"");
    let empty_state = missed.empty_state.expect("empty state affordance");
    assert!(empty_state.show_clear_search);

    let restored = core.clear_search();
    assert_eq!(restored.rows.len(), 5);
    assert_eq!(restored.message, "");
}

#[tokio::test]
async fn blank_submit_prompt_clears_after_the_delay() {
    let core = core();

    let prompted = core.submit_search().await;
    assert_eq!(prompted.message, "Please enter a search term");

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(core.activity_feed().message, "");
}

#[tokio::test]
async fn metric_walk_is_deterministic_under_scripted_jitter() {
    let core = core();
    let mut jitter = ScriptedJitter::new(vec![9, -5, 0], vec![1.0, -1.0, 0.5]);

    let first = core.tick_with(&mut jitter);
    assert_eq!(first.tick, 1);
    assert_eq!(first.metrics[0].value, 2_856);
    assert_eq!(first.metrics[1].value, 45_226);
    assert_eq!(first.metrics[2].value, 1_234);
    assert!((first.metrics[0].progress - 76.0).abs() < f64::EPSILON);
    assert!((first.metrics[1].progress - 67.0).abs() < f64::EPSILON);
    assert!((first.metrics[2].progress - 92.5).abs() < f64::EPSILON);

    let second = core.tick_with(&mut jitter);
    assert_eq!(second.tick, 2);
    assert_eq!(second.metrics[0].value, 2_865);

    let snapshot = core.snapshot();
    assert_eq!(snapshot.tick_count, 2);
    for metric in &snapshot.metrics {
        assert!((0.0..=100.0).contains(&metric.progress), "{}", metric.title);
    }
}

#[tokio::test]
async fn ticker_runs_on_its_interval_and_stops_at_shutdown() {
    let core = core();
    assert!(core.start_ticker());
    assert!(!core.start_ticker(), "ticker registers once");

    tokio::time::sleep(Duration::from_millis(120)).await;
    let ticked = core.snapshot().tick_count;
    assert!(ticked >= 2, "expected at least two ticks, saw {ticked}");

    core.shutdown();
    let at_shutdown = core.snapshot().tick_count;
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(core.snapshot().tick_count, at_shutdown, "no ticks after teardown");
}

#[tokio::test]
async fn notification_read_receipt_survives_close_and_reopen() {
    let core = core();

    let opened = core.toggle_notifications().await;
    assert!(opened.open);
    assert_eq!(opened.count, 3);

    // Close and reopen before the reset fires; the reset still lands.
    core.toggle_notifications().await;
    core.toggle_notifications().await;

    tokio::time::sleep(Duration::from_millis(80)).await;
    let state = core.notification_state();
    assert_eq!(state.count, 0);
    assert!(state.open);
}

#[tokio::test]
async fn profile_save_acknowledges_then_settles() {
    let core = core();

    core.save_profile(SaveProfilePayload {
        display_name: "Jane".to_string(),
        email: "jane@example.com".to_string(),
    })
    .await
    .expect("valid save");
    assert!(core.profile().pending_ack);

    tokio::time::sleep(Duration::from_millis(60)).await;
    let profile = core.profile();
    assert!(!profile.pending_ack);
    assert_eq!(profile.display_name, "Jane");
}

#[tokio::test]
async fn state_is_view_independent_across_navigation() {
    let core = core();

    core.set_search_query("emma".to_string());
    core.toggle_notifications().await;
    core.set_active_view(View::Analytics);
    core.set_active_view(View::Settings);
    core.set_active_view(View::Home);

    let snapshot = core.snapshot();
    assert_eq!(snapshot.search.query, "emma");
    assert!(snapshot.notifications.open);
    assert_eq!(snapshot.active_view, View::Home);
}

#[tokio::test]
async fn theme_preference_persists_across_sessions_via_the_file_store() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let store = Arc::new(FileThemeStore::new(dir.path()));
        let core = DashboardCore::new(store, fast_settings());
        assert_eq!(core.get_theme(), Theme::Light);
        core.toggle_theme().expect("toggle theme");
        core.shutdown();
    }

    let store = Arc::new(FileThemeStore::new(dir.path()));
    let core = DashboardCore::new(store, fast_settings());
    assert_eq!(core.get_theme(), Theme::Dark);
}

use crate::errors::{AppError, AppResult};
use crate::models::{
    AcceptedResponse, Activity, ActivityFeed, DashboardSettings, DashboardSnapshot, EmptyStateView,
    FeedRow, Metric, MetricsUpdatedEvent, NotificationState, NotificationsReadEvent, ProfileField,
    ProfileSavedEvent, ProfileState, SaveProfilePayload, SearchMessageClearedEvent, SearchState,
    Theme, View, ViewContent,
};
use crate::scheduler::{TaskKey, TaskScheduler};
use crate::search;
use crate::seed;
use crate::simulate::{self, Jitter, ThreadJitter};
use crate::theme::ThemeStore;
use crate::views;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use tauri::{AppHandle, Emitter};
use tokio::sync::RwLock;
use tokio::time::Duration;
use uuid::Uuid;

pub const EVENT_METRICS_UPDATED: &str = "dashboard://metrics-updated";
pub const EVENT_NOTIFICATIONS_READ: &str = "dashboard://notifications-read";
pub const EVENT_PROFILE_SAVED: &str = "dashboard://profile-saved";
pub const EVENT_SEARCH_MESSAGE_CLEARED: &str = "dashboard://search-message-cleared";

pub const SAVE_ACK_MESSAGE: &str = "Profile saved successfully!";

struct DashboardState {
    metrics: Vec<Metric>,
    activities: Vec<Activity>,
    search: SearchState,
    notification_count: u32,
    notifications_open: bool,
    profile: ProfileState,
    active_view: View,
    tick_count: u64,
}

/// Process-wide session core. All mutable session state lives behind one
/// lock; commands and timer callbacks do synchronous read-modify-write under
/// it. The core owns its timers and cancels them exactly once at teardown.
#[derive(Clone)]
pub struct DashboardCore {
    session_id: String,
    state: Arc<StdMutex<DashboardState>>,
    settings: Arc<StdMutex<DashboardSettings>>,
    scheduler: TaskScheduler,
    theme_store: Arc<dyn ThemeStore>,
    app_handle: Arc<RwLock<Option<AppHandle>>>,
    torn_down: Arc<AtomicBool>,
}

impl DashboardCore {
    pub fn new(theme_store: Arc<dyn ThemeStore>, settings: DashboardSettings) -> Self {
        let session_id = Uuid::new_v4().to_string();
        tracing::info!(session_id = %session_id, "dashboard session created");

        let state = DashboardState {
            metrics: seed::initial_metrics(),
            activities: seed::ACTIVITIES.clone(),
            search: SearchState::default(),
            notification_count: seed::SEED_NOTIFICATION_COUNT,
            notifications_open: false,
            profile: ProfileState {
                display_name: seed::SEED_DISPLAY_NAME.to_string(),
                email: seed::SEED_EMAIL.to_string(),
                pending_ack: false,
            },
            active_view: View::Home,
            tick_count: 0,
        };

        Self {
            session_id,
            state: Arc::new(StdMutex::new(state)),
            settings: Arc::new(StdMutex::new(settings)),
            scheduler: TaskScheduler::new(),
            theme_store,
            app_handle: Arc::new(RwLock::new(None)),
            torn_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn attach_app_handle(&self, handle: AppHandle) {
        let mut writer = self.app_handle.write().await;
        *writer = Some(handle);
    }

    // ─── Lifecycle ──────────────────────────────────────────────────────────

    /// Registers the periodic metric updater. Must run on the tokio runtime.
    /// Returns false when the ticker was already registered.
    pub fn start_ticker(&self) -> bool {
        let interval_ms = self
            .settings
            .lock()
            .expect("dashboard settings lock")
            .tick_interval_ms
            .max(1);
        let core = self.clone();
        let started = self
            .scheduler
            .start_recurring(Duration::from_millis(interval_ms), move || {
                let core = core.clone();
                async move {
                    core.tick().await;
                }
            });
        if started {
            tracing::info!(interval_ms, "metric ticker registered");
        } else {
            tracing::warn!("metric ticker already registered");
        }
        started
    }

    /// Tears the session down: the ticker and every pending one-shot are
    /// cancelled. Idempotent; only the first call does anything.
    pub fn shutdown(&self) {
        if self.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }
        self.scheduler.shutdown();
        tracing::info!(session_id = %self.session_id, "dashboard session torn down");
    }

    // ─── Periodic updater ───────────────────────────────────────────────────

    pub async fn tick(&self) {
        let mut jitter = ThreadJitter;
        let event = self.tick_with(&mut jitter);
        tracing::debug!(tick = event.tick, "metrics updated");
        self.emit_event(EVENT_METRICS_UPDATED, &event).await;
    }

    /// Applies one tick with the given jitter source and returns the event
    /// payload. Split out so tests can drive deterministic sequences.
    pub fn tick_with(&self, jitter: &mut dyn Jitter) -> MetricsUpdatedEvent {
        let mut state = self.state.lock().expect("dashboard state lock");
        simulate::apply_tick(&mut state.metrics, jitter);
        state.tick_count += 1;
        MetricsUpdatedEvent {
            metrics: state.metrics.clone(),
            tick: state.tick_count,
            timestamp: Utc::now(),
        }
    }

    // ─── Snapshot & views ───────────────────────────────────────────────────

    pub fn snapshot(&self) -> DashboardSnapshot {
        let theme = self.theme_store.get();
        let state = self.state.lock().expect("dashboard state lock");
        DashboardSnapshot {
            session_id: self.session_id.clone(),
            active_view: state.active_view,
            theme,
            metrics: state.metrics.clone(),
            search: state.search.clone(),
            notifications: Self::notification_state_of(&state),
            profile: state.profile.clone(),
            tick_count: state.tick_count,
            generated_at: Utc::now(),
        }
    }

    pub fn view_content(&self) -> ViewContent {
        let theme = self.theme_store.get();
        let state = self.state.lock().expect("dashboard state lock");
        views::render(
            state.active_view,
            &state.metrics,
            Self::feed_of(&state),
            &state.profile,
            theme,
        )
    }

    pub fn set_active_view(&self, view: View) -> View {
        let mut state = self.state.lock().expect("dashboard state lock");
        tracing::debug!(view = view.as_str(), "navigating");
        state.active_view = view;
        state.active_view
    }

    /// The avatar shortcut: jumps straight to the settings view.
    pub fn open_profile(&self) -> View {
        self.set_active_view(View::Settings)
    }

    // ─── Search ─────────────────────────────────────────────────────────────

    pub fn set_search_query(&self, query: String) -> ActivityFeed {
        self.scheduler.cancel(TaskKey::SearchMessageClear);
        let mut state = self.state.lock().expect("dashboard state lock");
        let outcome = search::filter_activities(&query, &state.activities);
        state.search.query = query;
        state.search.message = outcome.message;
        Self::feed_of(&state)
    }

    /// Explicit submit (Enter / search button). A blank query produces a
    /// transient prompt that clears itself after the configured delay.
    pub async fn submit_search(&self) -> ActivityFeed {
        let (feed, schedule_clear) = {
            let mut state = self.state.lock().expect("dashboard state lock");
            if state.search.query.trim().is_empty() {
                state.search.message = search::EMPTY_QUERY_PROMPT.to_string();
                (Self::feed_of(&state), true)
            } else {
                let outcome = search::filter_activities(&state.search.query, &state.activities);
                state.search.message =
                    search::showing_message(outcome.matches.len(), &state.search.query);
                (Self::feed_of(&state), false)
            }
        };

        if schedule_clear {
            let delay = Duration::from_millis(
                self.settings
                    .lock()
                    .expect("dashboard settings lock")
                    .transient_message_ms,
            );
            let core = self.clone();
            self.scheduler
                .schedule_once(TaskKey::SearchMessageClear, delay, move || async move {
                    {
                        let mut state = core.state.lock().expect("dashboard state lock");
                        state.search.message.clear();
                    }
                    core.emit_event(
                        EVENT_SEARCH_MESSAGE_CLEARED,
                        SearchMessageClearedEvent {
                            timestamp: Utc::now(),
                        },
                    )
                    .await;
                });
        }
        feed
    }

    pub fn clear_search(&self) -> ActivityFeed {
        self.scheduler.cancel(TaskKey::SearchMessageClear);
        let mut state = self.state.lock().expect("dashboard state lock");
        state.search = SearchState::default();
        Self::feed_of(&state)
    }

    pub fn activity_feed(&self) -> ActivityFeed {
        let state = self.state.lock().expect("dashboard state lock");
        Self::feed_of(&state)
    }

    fn feed_of(state: &DashboardState) -> ActivityFeed {
        let outcome = search::filter_activities(&state.search.query, &state.activities);
        let empty_state = outcome.matches.is_empty().then(|| {
            let trimmed = state.search.query.trim();
            EmptyStateView {
                headline: if trimmed.is_empty() {
                    "No activities to display".to_string()
                } else {
                    format!("No activities found matching \"{}\"", state.search.query)
                },
                show_clear_search: !trimmed.is_empty(),
            }
        });
        let rows = outcome
            .matches
            .into_iter()
            .map(|activity| FeedRow {
                initials: views::initials(&activity.user),
                badge: views::badge_style(activity.kind),
                activity,
            })
            .collect();
        ActivityFeed {
            rows,
            message: state.search.message.clone(),
            empty_state,
        }
    }

    // ─── Notifications ──────────────────────────────────────────────────────

    pub fn notification_state(&self) -> NotificationState {
        let state = self.state.lock().expect("dashboard state lock");
        Self::notification_state_of(&state)
    }

    fn notification_state_of(state: &DashboardState) -> NotificationState {
        NotificationState {
            count: state.notification_count,
            open: state.notifications_open,
            items: seed::notification_items(),
        }
    }

    /// Flips the popover. Opening with unread notifications schedules the
    /// read-receipt reset; reopening before it fires re-arms the same slot,
    /// so the reset happens at most once and the count floors at zero.
    pub async fn toggle_notifications(&self) -> NotificationState {
        let (snapshot, schedule_reset) = {
            let mut state = self.state.lock().expect("dashboard state lock");
            state.notifications_open = !state.notifications_open;
            let schedule = state.notifications_open && state.notification_count > 0;
            (Self::notification_state_of(&state), schedule)
        };

        if schedule_reset {
            let delay = Duration::from_millis(
                self.settings
                    .lock()
                    .expect("dashboard settings lock")
                    .notification_read_delay_ms,
            );
            let core = self.clone();
            self.scheduler
                .schedule_once(TaskKey::NotificationRead, delay, move || async move {
                    {
                        let mut state = core.state.lock().expect("dashboard state lock");
                        state.notification_count = 0;
                    }
                    tracing::debug!("notifications marked read");
                    core.emit_event(
                        EVENT_NOTIFICATIONS_READ,
                        NotificationsReadEvent {
                            count: 0,
                            timestamp: Utc::now(),
                        },
                    )
                    .await;
                });
        }
        snapshot
    }

    // ─── Profile ────────────────────────────────────────────────────────────

    pub fn set_profile_field(&self, field: ProfileField, value: String) -> ProfileState {
        let mut state = self.state.lock().expect("dashboard state lock");
        match field {
            ProfileField::DisplayName => state.profile.display_name = value,
            ProfileField::Email => state.profile.email = value,
        }
        state.profile.clone()
    }

    /// Validates and commits the profile, then schedules the acknowledgment
    /// after the configured delay. Nothing persists beyond the session.
    pub async fn save_profile(&self, payload: SaveProfilePayload) -> AppResult<AcceptedResponse> {
        let display_name = payload.display_name.trim().to_string();
        let email = payload.email.trim().to_string();
        if display_name.is_empty() || email.is_empty() {
            return Err(AppError::EmptyField(
                "display name and email are required".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(AppError::InvalidEmail(format!("\"{email}\" is missing '@'")));
        }

        {
            let mut state = self.state.lock().expect("dashboard state lock");
            state.profile.display_name = display_name;
            state.profile.email = email;
            state.profile.pending_ack = true;
        }

        let delay = Duration::from_millis(
            self.settings
                .lock()
                .expect("dashboard settings lock")
                .save_ack_delay_ms,
        );
        let core = self.clone();
        self.scheduler
            .schedule_once(TaskKey::SaveAck, delay, move || async move {
                let profile = {
                    let mut state = core.state.lock().expect("dashboard state lock");
                    state.profile.pending_ack = false;
                    state.profile.clone()
                };
                tracing::info!(display_name = %profile.display_name, "profile saved");
                core.emit_event(
                    EVENT_PROFILE_SAVED,
                    ProfileSavedEvent {
                        message: SAVE_ACK_MESSAGE.to_string(),
                        profile,
                        timestamp: Utc::now(),
                    },
                )
                .await;
            });

        Ok(AcceptedResponse { accepted: true })
    }

    pub fn profile(&self) -> ProfileState {
        let state = self.state.lock().expect("dashboard state lock");
        state.profile.clone()
    }

    // ─── Theme ──────────────────────────────────────────────────────────────

    pub fn get_theme(&self) -> Theme {
        self.theme_store.get()
    }

    pub fn set_theme(&self, theme: Theme) -> AppResult<Theme> {
        self.theme_store.set(theme)?;
        Ok(theme)
    }

    pub fn toggle_theme(&self) -> AppResult<Theme> {
        let current = self.theme_store.get();
        let next = current.toggled();
        tracing::info!(from = current.as_str(), to = next.as_str(), "switching theme");
        self.theme_store.set(next)?;
        Ok(next)
    }

    // ─── Settings ───────────────────────────────────────────────────────────

    pub fn get_settings(&self) -> DashboardSettings {
        self.settings.lock().expect("dashboard settings lock").clone()
    }

    /// Replaces the session settings. Delays apply to work scheduled after
    /// this call; the tick interval is read when the ticker registers.
    pub fn update_settings(&self, settings: DashboardSettings) -> DashboardSettings {
        let mut current = self.settings.lock().expect("dashboard settings lock");
        *current = settings;
        current.clone()
    }

    // ─── Events ─────────────────────────────────────────────────────────────

    async fn emit_event<P: serde::Serialize + Clone>(&self, event: &str, payload: P) {
        let handle = self.app_handle.read().await;
        if let Some(handle) = handle.as_ref() {
            if let Err(error) = handle.emit(event, payload) {
                tracing::warn!(error = %error, event, "failed to emit dashboard event");
            }
        }
    }
}

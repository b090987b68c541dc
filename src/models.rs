use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Home,
    Analytics,
    Settings,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Analytics => "analytics",
            Self::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    Up,
    Down,
}

/// Closed set of activity categories. Filtering matches on the label and the
/// badge table in `views` keys styling off the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    Upgrade,
    Signup,
    Purchase,
    Feedback,
    Invite,
}

impl ActivityKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Upgrade => "upgrade",
            Self::Signup => "signup",
            Self::Purchase => "purchase",
            Self::Feedback => "feedback",
            Self::Invite => "invite",
        }
    }
}

/// A named KPI with a progress-to-target ratio. Seeded once, then mutated in
/// place by the periodic updater; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub title: String,
    pub value: i64,
    pub description: String,
    pub trend: Trend,
    pub progress: f64,
    pub target: i64,
}

/// Immutable log entry of a user action. The seed list is fixed for the
/// session; runtime only filters it for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u32,
    pub user: String,
    pub action: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStyle {
    pub light_class: &'static str,
    pub dark_class: &'static str,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub query: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRow {
    pub activity: Activity,
    pub initials: String,
    pub badge: BadgeStyle,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyStateView {
    pub headline: String,
    pub show_clear_search: bool,
}

/// The activity feed as the view renders it: filtered rows, the current
/// result message, and the empty-state affordance when nothing matched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFeed {
    pub rows: Vec<FeedRow>,
    pub message: String,
    pub empty_state: Option<EmptyStateView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    pub title: String,
    pub detail: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationState {
    pub count: u32,
    pub open: bool,
    pub items: Vec<NotificationItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileState {
    pub display_name: String,
    pub email: String,
    pub pending_ack: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileField {
    DisplayName,
    Email,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfilePayload {
    pub display_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedResponse {
    pub accepted: bool,
}

// ─── View content ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCard {
    pub title: String,
    pub display_value: String,
    pub description: String,
    pub trend: Trend,
    pub progress_percent: u8,
    pub display_target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceEntry {
    pub label: String,
    pub value: String,
    pub delta: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSource {
    pub source: String,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStat {
    pub page: String,
    pub views: String,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub metric_cards: Vec<MetricCard>,
    pub feed: ActivityFeed,
    pub performance: Vec<PerformanceEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub stat_cards: Vec<StatCard>,
    pub traffic_sources: Vec<TrafficSource>,
    pub top_pages: Vec<PageStat>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCard {
    pub display_name: String,
    pub email: String,
    pub initials: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub profile: ProfileCard,
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "kebab-case")]
pub enum ViewContent {
    Home(HomeView),
    Analytics(AnalyticsView),
    Settings(SettingsView),
}

// ─── Session snapshot & events ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub session_id: String,
    pub active_view: View,
    pub theme: Theme,
    pub metrics: Vec<Metric>,
    pub search: SearchState,
    pub notifications: NotificationState,
    pub profile: ProfileState,
    pub tick_count: u64,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsUpdatedEvent {
    pub metrics: Vec<Metric>,
    pub tick: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsReadEvent {
    pub count: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSavedEvent {
    pub message: String,
    pub profile: ProfileState,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMessageClearedEvent {
    pub timestamp: DateTime<Utc>,
}

// ─── Settings ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardSettings {
    pub tick_interval_ms: u64,
    pub notification_read_delay_ms: u64,
    pub save_ack_delay_ms: u64,
    pub transient_message_ms: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 5_000,
            notification_read_delay_ms: 1_000,
            save_ack_delay_ms: 500,
            transient_message_ms: 2_000,
        }
    }
}

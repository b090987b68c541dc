use crate::models::{
    Activity, ActivityKind, Metric, NotificationItem, PageStat, PerformanceEntry, StatCard, Trend,
    TrafficSource,
};
use once_cell::sync::Lazy;

/// Fixed activity log for the session. Never mutated; only filtered.
pub static ACTIVITIES: Lazy<Vec<Activity>> = Lazy::new(|| {
    vec![
        activity(1, "Sarah Chen", "upgraded to Pro plan", "2 minutes ago", ActivityKind::Upgrade),
        activity(2, "Mike Johnson", "completed onboarding", "5 minutes ago", ActivityKind::Signup),
        activity(3, "Emma Davis", "made a purchase", "12 minutes ago", ActivityKind::Purchase),
        activity(4, "Alex Rodriguez", "left feedback", "18 minutes ago", ActivityKind::Feedback),
        activity(5, "Lisa Wang", "invited team member", "25 minutes ago", ActivityKind::Invite),
    ]
});

pub const SEED_NOTIFICATION_COUNT: u32 = 3;
pub const SEED_DISPLAY_NAME: &str = "John Doe";
pub const SEED_EMAIL: &str = "john.doe@example.com";

fn activity(id: u32, user: &str, action: &str, time: &str, kind: ActivityKind) -> Activity {
    Activity {
        id,
        user: user.to_string(),
        action: action.to_string(),
        time: time.to_string(),
        kind,
    }
}

pub fn initial_metrics() -> Vec<Metric> {
    vec![
        Metric {
            title: "Active Users".to_string(),
            value: 2_847,
            description: "+12% from last month".to_string(),
            trend: Trend::Up,
            progress: 75.0,
            target: 3_800,
        },
        Metric {
            title: "Revenue".to_string(),
            value: 45_231,
            description: "+8% from last month".to_string(),
            trend: Trend::Up,
            progress: 68.0,
            target: 66_000,
        },
        Metric {
            title: "New Signups".to_string(),
            value: 1_234,
            description: "+23% from last month".to_string(),
            trend: Trend::Up,
            progress: 92.0,
            target: 1_340,
        },
    ]
}

pub fn notification_items() -> Vec<NotificationItem> {
    vec![
        notification("New user registered", "Sarah Chen just signed up", "2 minutes ago"),
        notification("Payment received", "$299 from Mike Johnson", "5 minutes ago"),
        notification("System update", "Dashboard v2.1 deployed", "1 hour ago"),
    ]
}

fn notification(title: &str, detail: &str, time: &str) -> NotificationItem {
    NotificationItem {
        title: title.to_string(),
        detail: detail.to_string(),
        time: time.to_string(),
    }
}

pub fn performance_overview() -> Vec<PerformanceEntry> {
    vec![
        performance("Conversion Rate", "4.2%", "+0.8%"),
        performance("Avg. Session", "3m 42s", "+12s"),
        performance("Bounce Rate", "24.1%", "-2.3%"),
    ]
}

fn performance(label: &str, value: &str, delta: &str) -> PerformanceEntry {
    PerformanceEntry {
        label: label.to_string(),
        value: value.to_string(),
        delta: delta.to_string(),
    }
}

pub fn stat_cards() -> Vec<StatCard> {
    vec![
        stat("Page Views", "45,231", "+20.1% from last month"),
        stat("Sessions", "12,234", "+15.3% from last month"),
        stat("Bounce Rate", "24.1%", "-2.3% from last month"),
        stat("Avg. Duration", "3m 42s", "+12s from last month"),
    ]
}

fn stat(title: &str, value: &str, description: &str) -> StatCard {
    StatCard {
        title: title.to_string(),
        value: value.to_string(),
        description: description.to_string(),
    }
}

pub fn traffic_sources() -> Vec<TrafficSource> {
    [
        ("Organic Search", 45),
        ("Direct", 30),
        ("Social Media", 15),
        ("Referrals", 10),
    ]
    .into_iter()
    .map(|(source, percentage)| TrafficSource {
        source: source.to_string(),
        percentage,
    })
    .collect()
}

pub fn top_pages() -> Vec<PageStat> {
    [
        ("/dashboard", "12,345", 35),
        ("/analytics", "8,901", 25),
        ("/settings", "5,432", 15),
        ("/profile", "3,210", 9),
        ("/help", "2,109", 6),
    ]
    .into_iter()
    .map(|(page, views, percentage)| PageStat {
        page: page.to_string(),
        views: views.to_string(),
        percentage,
    })
    .collect()
}

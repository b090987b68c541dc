use crate::models::{
    ActivityFeed, ActivityKind, AnalyticsView, BadgeStyle, HomeView, Metric, MetricCard,
    ProfileCard, ProfileState, SettingsView, Theme, View, ViewContent,
};
use crate::seed;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static BADGE_STYLES: Lazy<HashMap<ActivityKind, BadgeStyle>> = Lazy::new(|| {
    HashMap::from([
        (
            ActivityKind::Upgrade,
            BadgeStyle {
                light_class: "bg-green-100 text-green-800",
                dark_class: "dark:bg-green-900 dark:text-green-300",
            },
        ),
        (
            ActivityKind::Signup,
            BadgeStyle {
                light_class: "bg-blue-100 text-blue-800",
                dark_class: "dark:bg-blue-900 dark:text-blue-300",
            },
        ),
        (
            ActivityKind::Purchase,
            BadgeStyle {
                light_class: "bg-purple-100 text-purple-800",
                dark_class: "dark:bg-purple-900 dark:text-purple-300",
            },
        ),
        (
            ActivityKind::Feedback,
            BadgeStyle {
                light_class: "bg-orange-100 text-orange-800",
                dark_class: "dark:bg-orange-900 dark:text-orange-300",
            },
        ),
        (
            ActivityKind::Invite,
            BadgeStyle {
                light_class: "bg-pink-100 text-pink-800",
                dark_class: "dark:bg-pink-900 dark:text-pink-300",
            },
        ),
    ])
});

const DEFAULT_BADGE: BadgeStyle = BadgeStyle {
    light_class: "bg-gray-100 text-gray-800",
    dark_class: "",
};

pub fn badge_style(kind: ActivityKind) -> BadgeStyle {
    BADGE_STYLES.get(&kind).copied().unwrap_or(DEFAULT_BADGE)
}

/// Pure view selector: maps the active view to its content. Carries no state
/// of its own; switching views never resets search, notifications, or
/// profile edits.
pub fn render(
    view: View,
    metrics: &[Metric],
    feed: ActivityFeed,
    profile: &ProfileState,
    theme: Theme,
) -> ViewContent {
    match view {
        View::Home => ViewContent::Home(HomeView {
            metric_cards: metrics.iter().map(metric_card).collect(),
            feed,
            performance: seed::performance_overview(),
        }),
        View::Analytics => ViewContent::Analytics(AnalyticsView {
            stat_cards: seed::stat_cards(),
            traffic_sources: seed::traffic_sources(),
            top_pages: seed::top_pages(),
        }),
        View::Settings => ViewContent::Settings(SettingsView {
            profile: ProfileCard {
                display_name: profile.display_name.clone(),
                email: profile.email.clone(),
                initials: initials(&profile.display_name),
            },
            theme,
        }),
    }
}

fn metric_card(metric: &Metric) -> MetricCard {
    MetricCard {
        title: metric.title.clone(),
        display_value: format_metric_value(&metric.title, metric.value),
        description: metric.description.clone(),
        trend: metric.trend,
        progress_percent: metric.progress.round() as u8,
        display_target: format_metric_value(&metric.title, metric.target),
    }
}

/// Revenue renders as currency; everything else as a grouped count.
pub fn format_metric_value(title: &str, value: i64) -> String {
    let grouped = group_thousands(value);
    if title == "Revenue" {
        format!("${grouped}")
    } else {
        grouped
    }
}

fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// First character of each whitespace-separated name part, e.g. "JD".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Trend;
    use crate::seed;

    fn empty_feed() -> ActivityFeed {
        ActivityFeed {
            rows: Vec::new(),
            message: String::new(),
            empty_state: None,
        }
    }

    fn profile() -> ProfileState {
        ProfileState {
            display_name: seed::SEED_DISPLAY_NAME.to_string(),
            email: seed::SEED_EMAIL.to_string(),
            pending_ack: false,
        }
    }

    #[test]
    fn revenue_formats_as_currency() {
        assert_eq!(format_metric_value("Revenue", 45_231), "$45,231");
        assert_eq!(format_metric_value("Revenue", -5_231), "$-5,231");
    }

    #[test]
    fn counts_format_with_thousands_separators() {
        assert_eq!(format_metric_value("Active Users", 2_847), "2,847");
        assert_eq!(format_metric_value("Active Users", 999), "999");
        assert_eq!(format_metric_value("Active Users", 1_000_000), "1,000,000");
        assert_eq!(format_metric_value("Active Users", -12), "-12");
        assert_eq!(format_metric_value("Active Users", 0), "0");
    }

    #[test]
    fn initials_take_the_first_letter_of_each_part() {
        assert_eq!(initials("John Doe"), "JD");
        assert_eq!(initials("Sarah Chen"), "SC");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials(""), "");
        assert_eq!(initials("  padded   name "), "pn");
    }

    #[test]
    fn badge_table_covers_every_kind() {
        for kind in [
            ActivityKind::Upgrade,
            ActivityKind::Signup,
            ActivityKind::Purchase,
            ActivityKind::Feedback,
            ActivityKind::Invite,
        ] {
            let badge = badge_style(kind);
            assert_ne!(badge.light_class, DEFAULT_BADGE.light_class, "{:?}", kind);
        }
    }

    #[test]
    fn home_view_carries_formatted_metric_cards() {
        let metrics = seed::initial_metrics();
        let content = render(View::Home, &metrics, empty_feed(), &profile(), Theme::Light);
        let ViewContent::Home(home) = content else {
            panic!("expected home content");
        };
        assert_eq!(home.metric_cards.len(), 3);
        assert_eq!(home.metric_cards[1].display_value, "$45,231");
        assert_eq!(home.metric_cards[1].display_target, "$66,000");
        assert_eq!(home.metric_cards[0].progress_percent, 75);
        assert_eq!(home.metric_cards[0].trend, Trend::Up);
        assert_eq!(home.performance.len(), 3);
    }

    #[test]
    fn analytics_view_carries_the_static_summaries() {
        let content = render(View::Analytics, &[], empty_feed(), &profile(), Theme::Light);
        let ViewContent::Analytics(analytics) = content else {
            panic!("expected analytics content");
        };
        assert_eq!(analytics.stat_cards.len(), 4);
        assert_eq!(analytics.traffic_sources.len(), 4);
        assert_eq!(analytics.top_pages.len(), 5);
    }

    #[test]
    fn settings_view_reflects_profile_and_theme() {
        let content = render(View::Settings, &[], empty_feed(), &profile(), Theme::Dark);
        let ViewContent::Settings(settings) = content else {
            panic!("expected settings content");
        };
        assert_eq!(settings.profile.initials, "JD");
        assert_eq!(settings.profile.email, seed::SEED_EMAIL);
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn progress_percent_rounds_to_nearest_integer() {
        let mut metrics = seed::initial_metrics();
        metrics[0].progress = 74.6;
        let content = render(View::Home, &metrics, empty_feed(), &profile(), Theme::Light);
        let ViewContent::Home(home) = content else {
            panic!("expected home content");
        };
        assert_eq!(home.metric_cards[0].progress_percent, 75);
    }
}

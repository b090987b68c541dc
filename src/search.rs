use crate::models::Activity;

pub const EMPTY_QUERY_PROMPT: &str = "Please enter a search term";

#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub matches: Vec<Activity>,
    pub message: String,
}

/// Filters the activity list by case-insensitive substring over user, action,
/// and kind label. A blank query keeps the list intact with no message.
/// Pure; the result order always follows the input order.
pub fn filter_activities(query: &str, activities: &[Activity]) -> FilterOutcome {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return FilterOutcome {
            matches: activities.to_vec(),
            message: String::new(),
        };
    }

    let matches = activities
        .iter()
        .filter(|activity| matches_query(activity, &needle))
        .cloned()
        .collect::<Vec<_>>();
    let message = found_message(matches.len(), query);

    FilterOutcome { matches, message }
}

fn matches_query(activity: &Activity, needle: &str) -> bool {
    activity.user.to_lowercase().contains(needle)
        || activity.action.to_lowercase().contains(needle)
        || activity.kind.label().contains(needle)
}

pub fn found_message(count: usize, query: &str) -> String {
    format!("Found {count} result{} for \"{query}\"", plural(count))
}

pub fn showing_message(count: usize, query: &str) -> String {
    format!("Showing {count} result{} for \"{query}\"", plural(count))
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::ACTIVITIES;

    #[test]
    fn blank_query_returns_everything_with_no_message() {
        for query in ["", "   ", "\t\n"] {
            let outcome = filter_activities(query, &ACTIVITIES);
            assert_eq!(outcome.matches, *ACTIVITIES);
            assert_eq!(outcome.message, "");
        }
    }

    #[test]
    fn matches_are_an_order_preserving_subsequence() {
        let outcome = filter_activities("a", &ACTIVITIES);
        let mut source = ACTIVITIES.iter();
        for matched in &outcome.matches {
            assert!(
                source.any(|activity| activity == matched),
                "match out of order or not from the source list"
            );
        }
    }

    #[test]
    fn every_match_satisfies_the_predicate_and_every_miss_fails_it() {
        let outcome = filter_activities("an", &ACTIVITIES);
        let needle = "an";
        for activity in &ACTIVITIES {
            let hit = activity.user.to_lowercase().contains(needle)
                || activity.action.to_lowercase().contains(needle)
                || activity.kind.label().contains(needle);
            assert_eq!(outcome.matches.contains(activity), hit, "{}", activity.user);
        }
    }

    #[test]
    fn filtering_is_idempotent_for_a_fixed_query() {
        let first = filter_activities("sarah", &ACTIVITIES);
        let second = filter_activities("sarah", &first.matches);
        assert_eq!(first.matches, second.matches);
    }

    #[test]
    fn sarah_matches_exactly_the_upgrade_entry() {
        let outcome = filter_activities("sarah", &ACTIVITIES);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].user, "Sarah Chen");
        assert_eq!(outcome.message, "Found 1 result for \"sarah\"");
    }

    #[test]
    fn unmatched_query_reports_zero_results() {
        let outcome = filter_activities("xyz", &ACTIVITIES);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.message, "Found 0 results for \"xyz\"");
    }

    #[test]
    fn query_matches_kind_label_case_insensitively() {
        let outcome = filter_activities("UPGRADE", &ACTIVITIES);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].id, 1);
    }

    #[test]
    fn query_is_trimmed_before_matching_but_echoed_raw() {
        let outcome = filter_activities("  sarah  ", &ACTIVITIES);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.message, "Found 1 result for \"  sarah  \"");
    }

    #[test]
    fn showing_message_agrees_on_plural() {
        assert_eq!(showing_message(1, "a"), "Showing 1 result for \"a\"");
        assert_eq!(showing_message(2, "a"), "Showing 2 results for \"a\"");
    }
}

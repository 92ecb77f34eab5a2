//! Click aggregation.
//!
//! Both functions are pure over a record's click list.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::ClickEvent;

/// Click totals for one short link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub click_count: usize,
    pub unique_visitor_count: usize,
}

/// All clicks from one tracking id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorActivity {
    pub tracking_id: String,
    /// User agent of the visitor's first recorded click.
    pub user_agent: Option<String>,
    pub events: Vec<ClickEvent>,
}

/// Counts total clicks and distinct tracking ids.
///
/// The result does not depend on click order.
pub fn summarize(clicks: &[ClickEvent]) -> Summary {
    let unique_visitor_count = clicks
        .iter()
        .map(|c| c.tracking_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    Summary {
        click_count: clicks.len(),
        unique_visitor_count,
    }
}

/// Groups clicks by tracking id, visitors in order of first appearance.
pub fn visitor_activity(clicks: &[ClickEvent]) -> Vec<VisitorActivity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut visitors: Vec<VisitorActivity> = Vec::new();

    for click in clicks {
        match index.get(click.tracking_id.as_str()) {
            Some(&i) => visitors[i].events.push(click.clone()),
            None => {
                index.insert(&click.tracking_id, visitors.len());
                visitors.push(VisitorActivity {
                    tracking_id: click.tracking_id.clone(),
                    user_agent: click.user_agent.clone(),
                    events: vec![click.clone()],
                });
            }
        }
    }

    visitors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn click(tracking_id: &str, ua: &str) -> ClickEvent {
        ClickEvent {
            tracking_id: tracking_id.to_string(),
            user_agent: Some(ua.to_string()),
            referer: None,
            clicked_at: Utc::now(),
        }
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn test_summarize_is_order_independent() {
        let a = click("A", "ua-a");
        let b = click("B", "ua-b");

        let first = summarize(&[a.clone(), b.clone(), a.clone()]);
        let second = summarize(&[a.clone(), a.clone(), b.clone()]);

        assert_eq!(first, second);
        assert_eq!(first.click_count, 3);
        assert_eq!(first.unique_visitor_count, 2);
    }

    #[test]
    fn test_visitor_activity_groups_in_first_seen_order() {
        let clicks = vec![
            click("B", "firefox"),
            click("A", "chrome"),
            click("B", "firefox-updated"),
        ];

        let visitors = visitor_activity(&clicks);

        assert_eq!(visitors.len(), 2);
        assert_eq!(visitors[0].tracking_id, "B");
        assert_eq!(visitors[0].events.len(), 2);
        assert_eq!(visitors[0].user_agent.as_deref(), Some("firefox"));
        assert_eq!(visitors[1].tracking_id, "A");
        assert_eq!(visitors[1].events.len(), 1);
    }

    #[test]
    fn test_visitor_activity_empty() {
        assert!(visitor_activity(&[]).is_empty());
    }
}

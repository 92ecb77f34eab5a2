//! Click entity representing a single recorded visit to a short link.

use chrono::{DateTime, Utc};

/// A visit to a short link by someone other than its owner.
///
/// `tracking_id` is the visitor's pseudo-identity taken from their session;
/// it is what unique-visitor counts are computed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub tracking_id: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click stamped with the current time.
    pub fn now(tracking_id: String, visit: Visit) -> Self {
        Self {
            tracking_id,
            user_agent: visit.user_agent,
            referer: visit.referer,
            clicked_at: Utc::now(),
        }
    }
}

/// Request metadata captured for a visit.
///
/// All fields are optional since clients may omit the headers.
#[derive(Debug, Clone, Default)]
pub struct Visit {
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_from_visit() {
        let before = Utc::now();
        let click = ClickEvent::now(
            "visitor01".to_string(),
            Visit {
                user_agent: Some("Mozilla/5.0".to_string()),
                referer: None,
            },
        );

        assert_eq!(click.tracking_id, "visitor01");
        assert_eq!(click.user_agent, Some("Mozilla/5.0".to_string()));
        assert!(click.referer.is_none());
        assert!(click.clicked_at >= before);
    }
}

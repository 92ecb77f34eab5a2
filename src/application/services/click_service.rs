//! Visit recording for the public redirect.

use std::sync::Arc;

use crate::domain::entities::{ClickEvent, SessionData, UrlRecord, Visit};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::id_generator::generate_tracking_id;

/// What [`ClickService::track`] did with a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The owner followed their own link. Nothing was stored.
    OwnerVisit,
    /// A click was appended. `minted` is set when the session got a new tracking id.
    Recorded { minted: bool },
}

/// Service that appends click events for non-owner visits.
pub struct ClickService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> ClickService<R> {
    /// Creates a new click service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records one visit to `record`.
    ///
    /// Owner visits are ignored. Other visitors are identified by the session's
    /// tracking id, which is minted into the session on first visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn track(
        &self,
        session: &mut SessionData,
        record: &UrlRecord,
        visit: Visit,
    ) -> Result<TrackOutcome, AppError> {
        if session.user_id() == Some(record.owner_id.as_str()) {
            return Ok(TrackOutcome::OwnerVisit);
        }

        let minted = session.tracking_id.is_none();
        let tracking_id = session
            .tracking_id
            .get_or_insert_with(generate_tracking_id)
            .clone();

        let appended = self
            .repository
            .append_click(&record.id, ClickEvent::now(tracking_id, visit))
            .await?;

        if !appended {
            tracing::debug!(url_id = %record.id, "Record removed before click was stored");
        }

        Ok(TrackOutcome::Recorded { minted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SessionUser;
    use crate::domain::repositories::MockUrlRepository;
    use chrono::Utc;

    fn create_test_record(owner_id: &str) -> UrlRecord {
        let now = Utc::now();
        UrlRecord::new(
            "b2xVn2".to_string(),
            "http://example.com/".to_string(),
            owner_id.to_string(),
            now,
            now,
            vec![],
        )
    }

    fn session_for(user_id: &str) -> SessionData {
        SessionData {
            user: Some(SessionUser {
                id: user_id.to_string(),
                email: format!("{user_id}@test.com"),
            }),
            tracking_id: None,
        }
    }

    #[tokio::test]
    async fn test_owner_visits_are_not_recorded() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_append_click().times(0);

        let service = ClickService::new(Arc::new(mock_repo));
        let record = create_test_record("u1");
        let mut session = session_for("u1");

        for _ in 0..3 {
            let outcome = service
                .track(&mut session, &record, Visit::default())
                .await
                .unwrap();
            assert_eq!(outcome, TrackOutcome::OwnerVisit);
        }

        assert!(session.tracking_id.is_none());
    }

    #[tokio::test]
    async fn test_first_visit_mints_tracking_id() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_append_click()
            .withf(|id, click| {
                id == "b2xVn2"
                    && click.tracking_id.len() == 16
                    && click.user_agent.as_deref() == Some("curl/8.0")
            })
            .times(1)
            .returning(|_, _| Ok(true));

        let service = ClickService::new(Arc::new(mock_repo));
        let mut session = SessionData::default();

        let outcome = service
            .track(
                &mut session,
                &create_test_record("u1"),
                Visit {
                    user_agent: Some("curl/8.0".to_string()),
                    referer: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(outcome, TrackOutcome::Recorded { minted: true });
        assert!(session.tracking_id.is_some());
    }

    #[tokio::test]
    async fn test_returning_visitor_reuses_tracking_id() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo
            .expect_append_click()
            .withf(|_, click| click.tracking_id == "visitor")
            .times(1)
            .returning(|_, _| Ok(true));

        let service = ClickService::new(Arc::new(mock_repo));
        let mut session = session_for("u2");
        session.tracking_id = Some("visitor".to_string());

        let outcome = service
            .track(&mut session, &create_test_record("u1"), Visit::default())
            .await
            .unwrap();

        assert_eq!(outcome, TrackOutcome::Recorded { minted: false });
        assert_eq!(session.tracking_id.as_deref(), Some("visitor"));
    }
}

//! Public short link redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::TrackOutcome;
use crate::domain::entities::{SessionData, Visit};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects to the long URL and records the visit.
///
/// # Endpoint
///
/// `GET /u/{id}` (no session required)
///
/// # Processing
///
/// 1. Resolve the short id
/// 2. Record a click unless the visitor owns the link
/// 3. Store a freshly minted tracking id in the session cookie
/// 4. Redirect with `307 Temporary Redirect`
///
/// # Errors
///
/// Returns **404 Not Found** if there is no such link.
pub async fn redirect_handler(
    State(st): State<AppState>,
    mut session: SessionData,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let record = st.url_service.resolve(&id).await?;

    let visit = Visit {
        user_agent: header_value(&headers, header::USER_AGENT),
        referer: header_value(&headers, header::REFERER),
    };

    let outcome = st.click_service.track(&mut session, &record, visit).await?;
    let redirect = Redirect::temporary(&record.long_url);

    match outcome {
        TrackOutcome::Recorded { minted: true } => {
            Ok((st.sessions.save(&session)?, redirect).into_response())
        }
        _ => Ok(redirect.into_response()),
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

//! Landing route.

use axum::{extract::State, response::Redirect};

use crate::domain::entities::SessionData;
use crate::error::AppError;
use crate::state::AppState;

/// Sends logged-in users to their links and everyone else to the login page.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler(
    State(st): State<AppState>,
    session: SessionData,
) -> Result<Redirect, AppError> {
    let target = match st.auth_service.current_user(&session).await? {
        Some(_) => "/urls",
        None => "/login",
    };

    Ok(Redirect::to(target))
}

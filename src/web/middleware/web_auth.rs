//! Session-based authentication middleware for the web pages.
//!
//! Both layers resolve the session user against the store and, on success,
//! insert the [`User`] into request extensions for handlers to pick up with
//! `Extension<User>`.
//!
//! # Differences between the two layers
//!
//! - [`redirect_to_login`] sends anonymous visitors to `/login`. Used for the
//!   pages a browser navigates to (`GET /urls`, `GET /urls/new`).
//! - [`block_unauthorized`] answers `401 Unauthorized` with the error page.
//!   Used for everything else that needs a session.
//!
//! A session naming a user that no longer exists is treated as anonymous and
//! its identity is cleared from the cookie.
//!
//! # Example
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/urls", get(urls_index_handler))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), web_auth::redirect_to_login));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::domain::entities::{SessionData, User};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::session::SetCookie;

enum Resolved {
    User(User),
    Anonymous,
    /// The session named a user the store no longer has.
    Stale(SetCookie),
}

async fn resolve(st: &AppState, mut session: SessionData) -> Result<Resolved, AppError> {
    if !session.is_logged_in() {
        return Ok(Resolved::Anonymous);
    }

    match st.auth_service.current_user(&session).await? {
        Some(user) => Ok(Resolved::User(user)),
        None => {
            tracing::debug!(user_id = ?session.user_id(), "Clearing stale session identity");
            st.auth_service.logout(&mut session);
            Ok(Resolved::Stale(st.sessions.save(&session)?))
        }
    }
}

/// Lets logged-in users through; redirects everyone else to `/login`.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the store cannot be reached.
pub async fn redirect_to_login(
    State(st): State<AppState>,
    session: SessionData,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match resolve(&st, session).await? {
        Resolved::User(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Resolved::Anonymous => Ok(Redirect::to("/login").into_response()),
        Resolved::Stale(cookie) => Ok((cookie, Redirect::to("/login")).into_response()),
    }
}

/// Lets logged-in users through; answers `401` otherwise.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] without a valid session.
/// Returns [`AppError::Internal`] if the store cannot be reached.
pub async fn block_unauthorized(
    State(st): State<AppState>,
    session: SessionData,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();
    let unauthorized = || AppError::unauthorized("Login required", json!({ "path": path }));

    match resolve(&st, session).await? {
        Resolved::User(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Resolved::Anonymous => Err(unauthorized()),
        Resolved::Stale(cookie) => Ok((cookie, unauthorized()).into_response()),
    }
}

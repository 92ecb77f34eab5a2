//! Renders [`AppError`](crate::error::AppError) responses as the HTML error view.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::entities::SessionData;
use crate::error::{AppError, ErrorPage};
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub user_email: Option<String>,
    pub status_code: u16,
    pub status_message: String,
    pub requested_url: String,
    pub detailed_message: String,
}

/// Replaces the body of error responses with the rendered error view.
///
/// Status and `Set-Cookie` headers of the original response are kept. The
/// nav shows a user only if the session still resolves to a stored one.
pub async fn layer(
    State(st): State<AppState>,
    session: SessionData,
    req: Request,
    next: Next,
) -> Response {
    let requested_url = req.uri().to_string();
    let mut response = next.run(req).await;

    let Some(page) = response.extensions_mut().remove::<ErrorPage>() else {
        return response;
    };

    let template = ErrorTemplate {
        user_email: current_email(&st, &session).await,
        status_code: page.status.as_u16(),
        status_message: page.status_message.to_string(),
        requested_url,
        detailed_message: page.detailed_message,
    };

    let mut rendered = template.into_response();
    *rendered.status_mut() = page.status;
    for cookie in response.headers().get_all(SET_COOKIE) {
        rendered.headers_mut().append(SET_COOKIE, cookie.clone());
    }

    rendered
}

async fn current_email(st: &AppState, session: &SessionData) -> Option<String> {
    match st.auth_service.current_user(session).await {
        Ok(user) => user.map(|u| u.email),
        Err(e) => {
            tracing::warn!("Failed to resolve session user for error page: {e}");
            None
        }
    }
}

/// Fallback for paths no route matches.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("No route", serde_json::json!({}))
}

//! Owner-only link management pages.
//!
//! All handlers here run behind [`crate::web::middleware::web_auth`], which
//! puts the logged-in [`User`] into request extensions.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::domain::analytics::{Summary, summarize, visitor_activity};
use crate::domain::entities::{UrlRecord, User};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::dto::{ShowQuery, UrlForm};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

fn format_time(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// One row of the links table.
pub struct UrlRow {
    pub id: String,
    pub short_url: String,
    pub long_url: String,
    pub created: String,
    pub click_count: usize,
    pub unique_visitor_count: usize,
}

/// One visitor on the link detail page.
pub struct VisitorRow {
    pub tracking_id: String,
    pub user_agent: String,
    pub click_count: usize,
    pub last_click: String,
}

/// Template for the list of the user's links.
#[derive(Template, WebTemplate)]
#[template(path = "urls_index.html")]
pub struct UrlsIndexTemplate {
    pub user_email: Option<String>,
    pub urls: Vec<UrlRow>,
}

/// Template for the link creation form.
#[derive(Template, WebTemplate)]
#[template(path = "urls_new.html")]
pub struct UrlsNewTemplate {
    pub user_email: Option<String>,
    pub error_message: String,
    pub long_url: String,
}

/// Template for the link detail page, read-only or editable.
#[derive(Template, WebTemplate)]
#[template(path = "urls_show.html")]
pub struct UrlsShowTemplate {
    pub user_email: Option<String>,
    pub id: String,
    pub short_url: String,
    pub long_url: String,
    pub created: String,
    pub last_updated: String,
    pub edit: bool,
    pub error_message: String,
    pub click_count: usize,
    pub unique_visitor_count: usize,
    pub visitors: Vec<VisitorRow>,
}

impl UrlsShowTemplate {
    fn new(st: &AppState, user: &User, record: &UrlRecord, edit: bool) -> Self {
        let Summary {
            click_count,
            unique_visitor_count,
        } = summarize(&record.clicks);

        let visitors = visitor_activity(&record.clicks)
            .into_iter()
            .map(|v| VisitorRow {
                click_count: v.events.len(),
                last_click: v
                    .events
                    .iter()
                    .map(|e| e.clicked_at)
                    .max()
                    .map(format_time)
                    .unwrap_or_default(),
                user_agent: v.user_agent.unwrap_or_else(|| "unknown".to_string()),
                tracking_id: v.tracking_id,
            })
            .collect();

        Self {
            user_email: Some(user.email.clone()),
            id: record.id.clone(),
            short_url: st.short_url(&record.id),
            long_url: record.long_url.clone(),
            created: format_time(record.created),
            last_updated: format_time(record.last_updated),
            edit,
            error_message: String::new(),
            click_count,
            unique_visitor_count,
            visitors,
        }
    }
}

/// Lists the user's links with click totals.
///
/// # Endpoint
///
/// `GET /urls`
pub async fn urls_index_handler(
    State(st): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<UrlsIndexTemplate, AppError> {
    let overviews = st.url_service.list_for_owner(&user).await?;

    let urls = overviews
        .into_iter()
        .map(|o| UrlRow {
            short_url: st.short_url(&o.record.id),
            created: format_time(o.record.created),
            click_count: o.summary.click_count,
            unique_visitor_count: o.summary.unique_visitor_count,
            id: o.record.id,
            long_url: o.record.long_url,
        })
        .collect();

    Ok(UrlsIndexTemplate {
        user_email: Some(user.email),
        urls,
    })
}

/// Renders the creation form.
///
/// # Endpoint
///
/// `GET /urls/new`
pub async fn urls_new_handler(Extension(user): Extension<User>) -> UrlsNewTemplate {
    UrlsNewTemplate {
        user_email: Some(user.email),
        error_message: String::new(),
        long_url: String::new(),
    }
}

/// Creates a link.
///
/// # Endpoint
///
/// `POST /urls`
///
/// # Responses
///
/// - **303 See Other** to `/urls/{id}` on success
/// - **200 OK** with the form and "`<input>` is not a valid URL" otherwise
pub async fn create_url_handler(
    State(st): State<AppState>,
    Extension(user): Extension<User>,
    Form(form): Form<UrlForm>,
) -> Result<Response, AppError> {
    let result = match form.validate() {
        Ok(()) => st.url_service.create(&user, &form.long_url).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(record) => Ok(Redirect::to(&format!("/urls/{}", record.id)).into_response()),
        Err(AppError::Validation { message, .. }) => Ok(UrlsNewTemplate {
            user_email: Some(user.email),
            error_message: message,
            long_url: form.long_url,
        }
        .into_response()),
        Err(e) => Err(e),
    }
}

/// Shows one owned link with its stats, or its edit form with `?edit`.
///
/// # Endpoint
///
/// `GET /urls/{id}`
///
/// # Errors
///
/// - **403 Forbidden** if the link belongs to someone else
/// - **404 Not Found** if there is no such link
pub async fn show_url_handler(
    State(st): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Query(query): Query<ShowQuery>,
) -> Result<UrlsShowTemplate, AppError> {
    let record = st.url_service.get_authorized(&id, Some(&user)).await?;

    Ok(UrlsShowTemplate::new(&st, &user, &record, query.is_edit()))
}

/// Points an owned link at a new URL.
///
/// # Endpoint
///
/// `POST /urls/{id}`
///
/// # Responses
///
/// - **303 See Other** to `/urls` on success
/// - **200 OK** with the edit form and its message for an invalid URL
pub async fn update_url_handler(
    State(st): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Form(form): Form<UrlForm>,
) -> Result<Response, AppError> {
    let result = match form.validate() {
        Ok(()) => st.url_service.update(&id, &user, &form.long_url).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(record) => {
            tracing::info!(url_id = %record.id, "Short link updated");
            Ok(Redirect::to("/urls").into_response())
        }
        Err(AppError::Validation { message, .. }) => {
            let record = st.url_service.get_authorized(&id, Some(&user)).await?;
            let mut page = UrlsShowTemplate::new(&st, &user, &record, true);
            page.error_message = message;
            page.long_url = form.long_url;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

/// Deletes an owned link.
///
/// # Endpoint
///
/// `POST /urls/{id}/delete`
pub async fn delete_url_handler(
    State(st): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    st.url_service.delete(&id, &user).await?;

    Ok(Redirect::to("/urls"))
}

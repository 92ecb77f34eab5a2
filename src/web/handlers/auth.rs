//! Registration, login and logout pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::domain::entities::SessionData;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::dto::{LoginForm, RegisterForm};

/// Template for the registration page.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub user_email: Option<String>,
    pub error_message: String,
    pub email: String,
}

/// Template for the login page.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub user_email: Option<String>,
    pub error_message: String,
    pub email: String,
}

/// Renders the registration form, or sends logged-in users home.
///
/// # Endpoint
///
/// `GET /register`
pub async fn register_form_handler(
    State(st): State<AppState>,
    session: SessionData,
) -> Result<Response, AppError> {
    if st.auth_service.current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(RegisterTemplate {
        user_email: None,
        error_message: String::new(),
        email: String::new(),
    }
    .into_response())
}

/// Creates an account and logs it in.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Responses
///
/// - **303 See Other** to `/` on success, with the session cookie set
/// - **200 OK** with the form and its message when the input is rejected
pub async fn register_handler(
    State(st): State<AppState>,
    mut session: SessionData,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let result = match form.validate() {
        Ok(()) => st.auth_service.register(&form.email, &form.password).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(user) => {
            st.auth_service.establish(&mut session, &user);
            Ok((st.sessions.save(&session)?, Redirect::to("/")).into_response())
        }
        Err(AppError::Validation { message, .. }) => Ok(RegisterTemplate {
            user_email: None,
            error_message: message,
            email: form.email,
        }
        .into_response()),
        Err(e) => Err(e),
    }
}

/// Renders the login form, or sends logged-in users home.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_form_handler(
    State(st): State<AppState>,
    session: SessionData,
) -> Result<Response, AppError> {
    if st.auth_service.current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(LoginTemplate {
        user_email: None,
        error_message: String::new(),
        email: String::new(),
    }
    .into_response())
}

/// Checks credentials and logs the user in.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Responses
///
/// - **303 See Other** to `/` on success, with the session cookie set
/// - **401 Unauthorized** with the form and "User name or password incorrect."
pub async fn login_handler(
    State(st): State<AppState>,
    mut session: SessionData,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let result = match form.validate() {
        Ok(()) => st.auth_service.login(&form.email, &form.password).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(user) => {
            st.auth_service.establish(&mut session, &user);
            tracing::info!(user_id = %user.id, "User logged in");
            Ok((st.sessions.save(&session)?, Redirect::to("/")).into_response())
        }
        Err(AppError::Unauthorized { message, .. } | AppError::Validation { message, .. }) => {
            let page = LoginTemplate {
                user_email: None,
                error_message: message,
                email: form.email,
            };
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Logged-in users asking for the logout page are sent home.
///
/// # Endpoint
///
/// `GET /logout` (session required)
pub async fn logout_page_handler() -> Redirect {
    Redirect::to("/")
}

/// Drops the user identity from the session.
///
/// # Endpoint
///
/// `POST /logout` (session required)
pub async fn logout_handler(
    State(st): State<AppState>,
    mut session: SessionData,
) -> Result<Response, AppError> {
    st.auth_service.logout(&mut session);

    let cookie = if session.tracking_id.is_some() {
        st.sessions.save(&session)?
    } else {
        st.sessions.clear()?
    };

    Ok((cookie, Redirect::to("/")).into_response())
}

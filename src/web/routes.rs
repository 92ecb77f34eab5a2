//! Web page route configuration.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::state::AppState;
use crate::web::handlers::{
    create_url_handler, delete_url_handler, home_handler, login_form_handler, login_handler,
    logout_handler, logout_page_handler, redirect_handler, register_form_handler,
    register_handler, show_url_handler, update_url_handler, urls_index_handler, urls_new_handler,
};
use crate::web::middleware::{error_page, web_auth};

/// Registration and login forms.
///
/// Kept apart so the top-level router can give them a stricter rate limit.
///
/// # Endpoints
///
/// - `GET|POST /register`
/// - `GET|POST /login`
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form_handler).post(register_handler))
        .route("/login", get(login_form_handler).post(login_handler))
}

/// Everything else a browser uses.
///
/// # Endpoints
///
/// - `GET /` - Redirect to `/urls` or `/login`
/// - `GET /u/{id}` - Public redirect with click tracking
/// - `GET /urls`, `GET /urls/new` - Redirect to `/login` without a session
/// - `POST /urls`, `GET|POST /urls/{id}`, `POST /urls/{id}/delete` - 401 without a session
/// - `GET|POST /logout` - 401 without a session
pub fn site_routes(state: &AppState) -> Router<AppState> {
    let browse = Router::new()
        .route("/urls", get(urls_index_handler))
        .route("/urls/new", get(urls_new_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::redirect_to_login,
        ));

    let protected = Router::new()
        .route("/urls", post(create_url_handler))
        .route("/urls/{id}", get(show_url_handler).post(update_url_handler))
        .route("/urls/{id}/delete", post(delete_url_handler))
        .route("/logout", get(logout_page_handler).post(logout_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::block_unauthorized,
        ));

    Router::new()
        .route("/", get(home_handler))
        .route("/u/{id}", get(redirect_handler))
        .merge(browse)
        .merge(protected)
}

/// Adds the 404 fallback and error page rendering, then binds the state.
pub fn finish(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .fallback(error_page::not_found_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error_page::layer,
        ))
        .with_state(state)
}

/// All pages with error rendering but without rate limiting or tracing.
pub fn router(state: AppState) -> Router {
    let routes = account_routes().merge(site_routes(&state));
    finish(routes, state)
}

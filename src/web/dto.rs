//! Form and query payloads for the web pages.
//!
//! Empty values are checked by the services so that the messages match the
//! page the user is on; the rules here only bound sizes.

use serde::Deserialize;
use validator::Validate;

/// `POST /register` form.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(max = 254, message = "Email is too long."))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 1024, message = "Password is too long."))]
    pub password: String,
}

/// `POST /login` form.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(max = 254, message = "Email is too long."))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 1024, message = "Password is too long."))]
    pub password: String,
}

/// `POST /urls` and `POST /urls/{id}` form.
#[derive(Debug, Deserialize, Validate)]
pub struct UrlForm {
    #[serde(default, rename = "longUrl", alias = "long_url")]
    #[validate(length(max = 2048, message = "URL is too long."))]
    pub long_url: String,
}

/// Query string of `GET /urls/{id}`.
///
/// `?edit` (with or without a value) shows the edit form.
#[derive(Debug, Default, Deserialize)]
pub struct ShowQuery {
    pub edit: Option<String>,
}

impl ShowQuery {
    pub fn is_edit(&self) -> bool {
        self.edit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn show_query(uri: &'static str) -> ShowQuery {
        let uri = Uri::from_static(uri);
        Query::<ShowQuery>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_url_form_length_bound() {
        let form = UrlForm {
            long_url: format!("http://a.com/{}", "x".repeat(2048)),
        };
        assert!(form.validate().is_err());

        let form = UrlForm {
            long_url: "http://a.com/".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_show_query_edit_flag() {
        assert!(show_query("/urls/abc?edit").is_edit());
        assert!(show_query("/urls/abc?edit=1").is_edit());
        assert!(!show_query("/urls/abc").is_edit());
    }

    #[test]
    fn test_empty_credentials_pass_size_rules() {
        let form = RegisterForm {
            email: String::new(),
            password: String::new(),
        };
        assert!(form.validate().is_ok());
    }
}

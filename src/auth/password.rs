//! The password and confirm password fields shared by the registration and
//! settings forms, and the endpoint that re-checks them while the user types.

use axum::{
    Form,
    extract::Query,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    endpoints,
    html::password_input,
    validation::{ValidationError, check_password_confirmation_live},
};

/// The password fields of a form.
///
/// Both fields default to empty so the fields can be read from any form
/// that embeds them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PasswordPair {
    /// The new password.
    #[serde(default)]
    pub password: String,
    /// The new password typed a second time.
    #[serde(default)]
    pub confirm_password: String,
}

/// Options for rendering the password fields.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PasswordFieldsQuery {
    /// Whether the password must be filled in.
    #[serde(default)]
    pub required: bool,
}

/// Render the password and confirm password inputs.
///
/// Editing either input posts both values to the password confirmation
/// endpoint, which replaces the fields with a freshly validated copy.
pub fn password_fields(
    passwords: &PasswordPair,
    required: bool,
    error: Option<&ValidationError>,
) -> Markup {
    let endpoint = format!(
        "{}?required={required}",
        endpoints::PASSWORD_CONFIRMATION_API
    );
    let password_error = error
        .filter(|error| error.field() == "password")
        .map(ToString::to_string);
    let confirm_password_error = error
        .filter(|error| error.field() == "confirm_password")
        .map(ToString::to_string);
    let (password_label, confirm_password_label) = if required {
        ("Password", "Confirm Password")
    } else {
        ("New Password", "Confirm New Password")
    };

    html! {
        div
            id="password-fields"
            class="space-y-4"
            hx-post=(endpoint)
            hx-trigger="input changed delay:300ms from:#password, input changed delay:300ms from:#confirm_password"
            hx-include="#password, #confirm_password"
            hx-target="this"
            hx-swap="outerHTML"
        {
            (password_input(
                "password",
                password_label,
                &passwords.password,
                required,
                password_error.as_deref(),
            ))
            (password_input(
                "confirm_password",
                confirm_password_label,
                &passwords.confirm_password,
                required,
                confirm_password_error.as_deref(),
            ))
        }
    }
}

/// Re-render the password fields with the mismatch error, if any.
///
/// An empty confirmation is not flagged until the user starts typing it.
pub async fn password_confirmation_endpoint(
    Query(query): Query<PasswordFieldsQuery>,
    Form(passwords): Form<PasswordPair>,
) -> Response {
    let error = check_password_confirmation_live(&passwords.password, &passwords.confirm_password)
        .err();

    Html(password_fields(&passwords, query.required, error.as_ref()).into_string()).into_response()
}

#[cfg(test)]
mod password_confirmation_tests {
    use axum::{Form, extract::Query};

    use crate::{
        endpoints,
        test_utils::{assert_status_ok, field_error, parse_html_fragment},
    };

    use super::{PasswordFieldsQuery, PasswordPair, password_confirmation_endpoint};

    fn passwords(password: &str, confirm_password: &str) -> PasswordPair {
        PasswordPair {
            password: password.to_owned(),
            confirm_password: confirm_password.to_owned(),
        }
    }

    #[tokio::test]
    async fn mismatch_is_shown_under_confirmation() {
        let response = password_confirmation_endpoint(
            Query(PasswordFieldsQuery::default()),
            Form(passwords("abc123", "abc124")),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_eq!(
            field_error(&html, "confirm_password").as_deref(),
            Some("Passwords do not match")
        );
        assert_eq!(field_error(&html, "password"), None);
    }

    #[tokio::test]
    async fn correcting_confirmation_clears_error() {
        let response = password_confirmation_endpoint(
            Query(PasswordFieldsQuery::default()),
            Form(passwords("abc123", "abc123")),
        )
        .await;

        let html = parse_html_fragment(response).await;
        assert_eq!(field_error(&html, "confirm_password"), None);
    }

    #[tokio::test]
    async fn empty_confirmation_is_not_flagged_yet() {
        let response = password_confirmation_endpoint(
            Query(PasswordFieldsQuery { required: true }),
            Form(passwords("abc123", "")),
        )
        .await;

        let html = parse_html_fragment(response).await;
        assert_eq!(field_error(&html, "confirm_password"), None);
    }

    #[tokio::test]
    async fn fields_keep_values_and_requirement() {
        let response = password_confirmation_endpoint(
            Query(PasswordFieldsQuery { required: true }),
            Form(passwords("abc123", "abc12")),
        )
        .await;

        let html = parse_html_fragment(response).await;
        let selector = scraper::Selector::parse("#password-fields").unwrap();
        let fields = html.select(&selector).next().expect("fields missing");
        assert_eq!(
            fields.value().attr("hx-post"),
            Some(format!("{}?required=true", endpoints::PASSWORD_CONFIRMATION_API).as_str())
        );

        let input_selector = scraper::Selector::parse("input[name=confirm_password]").unwrap();
        let input = fields.select(&input_selector).next().unwrap();
        assert_eq!(input.value().attr("value"), Some("abc12"));
        assert!(input.value().attr("required").is_some());
    }
}

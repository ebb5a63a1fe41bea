//! The registration page for creating a new account.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    external::{Credentials, SessionService},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, base, loading_spinner, log_in_register,
    },
    navigation::View,
    validation::{ValidationError, check_password_confirmation},
};

use super::password::{PasswordPair, password_fields};

fn registration_form(
    username: &str,
    passwords: &PasswordPair,
    error: Option<&ValidationError>,
) -> Markup {
    html! {
        form
            id="register-form"
            hx-post=(endpoints::REGISTER_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="username" class=(FORM_LABEL_STYLE) { "Username" }

                input
                    type="text"
                    name="username"
                    id="username"
                    value=(username)
                    autocomplete="username"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(error) = error.filter(|error| error.field() == "username") {
                    p class=(FORM_ERROR_STYLE) data-error-for="username" { (error) }
                }
            }

            (password_fields(passwords, true, error))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Create Account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                    "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let registration_form = registration_form("", &PasswordPair::default(), None);
    let content = log_in_register("Create an account", &registration_form);
    Html(base(View::Register.title(), &content).into_string()).into_response()
}

/// The state needed for creating a new account.
#[derive(Clone)]
pub struct RegistrationState {
    /// Creates the account.
    pub session_service: Arc<dyn SessionService>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session_service: state.collaborators.session.clone(),
        }
    }
}

/// The raw data entered by the user in the registration form.
#[derive(Deserialize)]
pub struct RegisterForm {
    /// The requested username.
    #[serde(default)]
    pub username: String,
    /// The password and its confirmation.
    #[serde(flatten)]
    pub passwords: PasswordPair,
}

impl RegisterForm {
    fn validate(&self) -> Result<Credentials, ValidationError> {
        let username = self.username.trim();

        if username.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "username",
                label: "Username",
            });
        }

        if self.passwords.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }

        check_password_confirmation(&self.passwords.password, &self.passwords.confirm_password)?;

        Ok(Credentials {
            username: username.to_owned(),
            password: self.passwords.password.clone(),
        })
    }
}

/// Create an account with the session service and send the client to the log-in page.
///
/// Invalid input is returned in the form without contacting the session service.
pub async fn register_user(
    State(state): State<RegistrationState>,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let credentials = match user_data.validate() {
        Ok(credentials) => credentials,
        Err(error) => {
            tracing::debug!("Rejected registration form: {error}");
            return Html(
                registration_form(&user_data.username, &user_data.passwords, Some(&error))
                    .into_string(),
            )
            .into_response();
        }
    };

    match state.session_service.register(&credentials) {
        Ok(()) => (
            StatusCode::SEE_OTHER,
            HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
            (),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not register {}: {error}", credentials.username);
            Error::from(error).into_alert_response()
        }
    }
}

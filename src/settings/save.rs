//! Defines the endpoint that validates and saves the settings form.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState, Error, auth::PasswordPair, banner::TransientBanner, external::ProfileService,
};

use super::{
    model::{Settings, SettingsForm},
    page::settings_form,
};

/// The state needed to save the settings.
#[derive(Clone)]
pub struct SaveSettingsState {
    /// The customer's current settings, replaced on a successful save.
    pub settings: Arc<Mutex<Settings>>,
    /// Shown after a successful save.
    pub saved_banner: TransientBanner,
    /// Receives the validated settings.
    pub profile_service: Arc<dyn ProfileService>,
}

impl FromRef<AppState> for SaveSettingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            settings: state.settings.clone(),
            saved_banner: state.saved_banner.clone(),
            profile_service: state.collaborators.profile.clone(),
        }
    }
}

/// Validate the settings form and forward it to the profile service.
///
/// Invalid input is returned in the form with the error next to the
/// offending field, and the profile service is not called. If the profile
/// service fails, an error alert is returned and the form is left as the
/// customer typed it. On success the stored settings are replaced and the
/// "settings saved" banner is shown.
pub async fn save_settings_endpoint(
    State(state): State<SaveSettingsState>,
    Form(form): Form<SettingsForm>,
) -> Response {
    let (settings, new_password) = match form.validate() {
        Ok(validated) => validated,
        Err(error) => {
            tracing::debug!("Rejected settings form: {error}");

            return Html(
                settings_form(
                    &form.to_settings(),
                    &form.passwords,
                    Some(&error),
                    state.saved_banner.is_visible(),
                )
                .into_string(),
            )
            .into_response();
        }
    };

    if let Err(error) = state
        .profile_service
        .save_settings(&settings, new_password.as_deref())
    {
        tracing::error!("Could not save settings: {error}");
        return Error::from(error).into_alert_response();
    }

    match state.settings.lock() {
        Ok(mut current) => *current = settings.clone(),
        Err(error) => {
            tracing::error!("Could not update settings: {error}");
            return Error::SettingsLockError.into_alert_response();
        }
    }

    state.saved_banner.show();

    Html(settings_form(&settings, &PasswordPair::default(), None, true).into_string())
        .into_response()
}

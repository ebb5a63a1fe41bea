//! Renders the settings page, its form and the "settings saved" banner.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    auth::{PasswordPair, password_fields},
    banner::TransientBanner,
    endpoints,
    html::{
        BUTTON_DANGER_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_CHECKBOX_STYLE,
        FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
        loading_spinner,
    },
    navigation::{NavBar, View},
    validation::ValidationError,
};

use super::model::Settings;

/// The message shown after the settings were saved.
pub const SAVED_MESSAGE: &str = "Settings saved successfully!";

/// The state needed to display the settings page.
#[derive(Debug, Clone)]
pub struct SettingsPageState {
    /// The customer's current settings.
    pub settings: Arc<Mutex<Settings>>,
    /// The "settings saved" banner.
    pub saved_banner: TransientBanner,
}

impl FromRef<AppState> for SettingsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            settings: state.settings.clone(),
            saved_banner: state.saved_banner.clone(),
        }
    }
}

/// Display the settings page with the current settings.
pub async fn get_settings_page(State(state): State<SettingsPageState>) -> Response {
    let settings = match state.settings.lock() {
        Ok(settings) => settings.clone(),
        Err(error) => {
            tracing::error!("Could not read settings: {error}");
            return Error::SettingsLockError.into_response();
        }
    };

    let form = settings_form(
        &settings,
        &PasswordPair::default(),
        None,
        state.saved_banner.is_visible(),
    );

    Html(settings_view(&settings, &form).into_string()).into_response()
}

/// Render the banner as it currently is.
///
/// A visible banner polls this endpoint once it is due to be dismissed and
/// is replaced by the response.
pub async fn get_settings_banner(State(state): State<SettingsPageState>) -> Response {
    Html(saved_banner(state.saved_banner.is_visible()).into_string()).into_response()
}

fn settings_view(settings: &Settings, form: &Markup) -> Markup {
    let nav_bar = NavBar::new(View::Settings).into_html();
    let initials: String = settings
        .personal
        .full_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-6"
            {
                section id="profile-header" class={ (CARD_STYLE) " flex items-center gap-4" }
                {
                    div
                        class="w-16 h-16 rounded-full bg-blue-600 text-white flex
                        items-center justify-center text-2xl font-bold"
                    {
                        (initials.to_uppercase())
                    }

                    div
                    {
                        h1 class="text-2xl font-bold" { (settings.personal.full_name) }
                        p class="text-gray-600 dark:text-gray-400" { (settings.personal.email) }
                    }
                }

                (form)
            }
        }
    };

    base(View::Settings.title(), &content)
}

/// Render the settings form.
///
/// `error` is shown next to the field it refers to.
pub(super) fn settings_form(
    settings: &Settings,
    passwords: &PasswordPair,
    error: Option<&ValidationError>,
    banner_visible: bool,
) -> Markup {
    let field_error = |name: &str| error.filter(|error| error.field() == name);
    let personal = &settings.personal;
    let spinner = loading_spinner();

    html! {
        form
            id="settings-form"
            hx-post=(endpoints::SETTINGS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            class="space-y-6"
        {
            (saved_banner(banner_visible))

            section class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-4" { "Personal Information" }

                div class="space-y-4"
                {
                    (text_input("full_name", "Full Name", "text", &personal.full_name, field_error("full_name")))
                    (text_input("email", "Email", "email", &personal.email, field_error("email")))
                    (text_input("phone", "Phone Number", "tel", &personal.phone, field_error("phone")))
                }
            }

            section class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-4" { "Privacy" }

                div class="space-y-3"
                {
                    (toggle("share_data", "Share usage data to improve our service", settings.privacy.share_data))
                    (toggle("email_notifications", "Email notifications", settings.privacy.email_notifications))
                }
            }

            section class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-4" { "Communication Preferences" }

                div class="space-y-3"
                {
                    (toggle("personalized_offers", "Personalized offers", settings.communication.personalized_offers))
                    (toggle("news_and_updates", "News and updates", settings.communication.news_and_updates))
                    (toggle("promotional_offers", "Promotional offers", settings.communication.promotional_offers))
                }
            }

            section class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-4" { "Change Password" }

                (password_fields(passwords, false, error))
            }

            div class="flex gap-4"
            {
                button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="htmx-indicator" { (spinner) }
                    "Save Changes"
                }

                a
                    href=(endpoints::LOG_OUT)
                    id="logout-button"
                    class={ "text-center " (BUTTON_DANGER_STYLE) }
                {
                    "Logout"
                }
            }
        }
    }
}

/// The banner confirming the settings were saved, or an empty placeholder.
pub(super) fn saved_banner(visible: bool) -> Markup {
    html! {
        @if visible {
            div
                id="settings-banner"
                role="status"
                hx-get=(endpoints::SETTINGS_BANNER_API)
                hx-trigger="load delay:3s"
                hx-swap="outerHTML"
                class="p-4 rounded-lg border text-green-800 bg-green-50 border-green-300
                    dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
            {
                (SAVED_MESSAGE)
            }
        } @else {
            div id="settings-banner" {}
        }
    }
}

fn text_input(
    name: &str,
    label: &str,
    input_type: &str,
    value: &str,
    error: Option<&ValidationError>,
) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                type=(input_type)
                name=(name)
                id=(name)
                value=(value)
                class=(FORM_TEXT_INPUT_STYLE);

            @if let Some(error) = error {
                p class=(FORM_ERROR_STYLE) data-error-for=(name) { (error) }
            }
        }
    }
}

fn toggle(name: &str, label: &str, checked: bool) -> Markup {
    html! {
        div class="flex items-center gap-3"
        {
            input
                type="checkbox"
                name=(name)
                id=(name)
                checked[checked]
                class=(FORM_CHECKBOX_STYLE);

            label for=(name) class="text-sm font-medium text-gray-900 dark:text-white"
            {
                (label)
            }
        }
    }
}

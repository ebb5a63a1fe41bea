//! The settings page: profile, preferences and password change.

mod model;
mod page;
mod save;

pub use model::{
    CommunicationPreferences, PersonalInfo, PrivacyPreferences, Settings, SettingsForm,
};
pub use page::{get_settings_banner, get_settings_page};
pub use save::save_settings_endpoint;

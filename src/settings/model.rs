//! The customer's profile and preferences, and the form used to edit them.

use serde::Deserialize;

use crate::{
    auth::PasswordPair,
    validation::{ValidationError, check_password_confirmation, require},
};

/// The contact details shown on the settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalInfo {
    /// The customer's full name.
    pub full_name: String,
    /// The customer's email address.
    pub email: String,
    /// The customer's phone number.
    pub phone: String,
}

/// Whether the customer allows their data to be used and emailed about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivacyPreferences {
    /// Share usage data to improve the service.
    pub share_data: bool,
    /// Receive notifications by email.
    pub email_notifications: bool,
}

/// Which kinds of marketing the customer wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommunicationPreferences {
    /// Offers based on the customer's usage.
    pub personalized_offers: bool,
    /// Product news.
    pub news_and_updates: bool,
    /// General promotions.
    pub promotional_offers: bool,
}

/// Everything the customer can change on the settings page except the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Contact details.
    pub personal: PersonalInfo,
    /// Privacy toggles.
    pub privacy: PrivacyPreferences,
    /// Marketing toggles.
    pub communication: CommunicationPreferences,
}

impl Settings {
    /// The settings of the demo customer.
    pub fn sample() -> Self {
        Self {
            personal: PersonalInfo {
                full_name: "Budi Santoso".to_owned(),
                email: "budi.santoso@email.com".to_owned(),
                phone: "+62 812 3456 7890".to_owned(),
            },
            privacy: PrivacyPreferences {
                share_data: true,
                email_notifications: true,
            },
            communication: CommunicationPreferences {
                personalized_offers: true,
                news_and_updates: false,
                promotional_offers: true,
            },
        }
    }
}

/// The raw data submitted by the settings form.
///
/// Checkboxes are only submitted when ticked, so `Some` means `true`
/// regardless of the value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    /// The customer's full name.
    #[serde(default)]
    pub full_name: String,
    /// The customer's email address.
    #[serde(default)]
    pub email: String,
    /// The customer's phone number.
    #[serde(default)]
    pub phone: String,
    pub share_data: Option<String>,
    pub email_notifications: Option<String>,
    pub personalized_offers: Option<String>,
    pub news_and_updates: Option<String>,
    pub promotional_offers: Option<String>,
    /// The optional password change.
    #[serde(flatten)]
    pub passwords: PasswordPair,
}

impl SettingsForm {
    /// The submitted values as settings, without validation.
    ///
    /// Used to re-render the form with the user's input when it is rejected.
    pub fn to_settings(&self) -> Settings {
        Settings {
            personal: PersonalInfo {
                full_name: self.full_name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
            },
            privacy: PrivacyPreferences {
                share_data: self.share_data.is_some(),
                email_notifications: self.email_notifications.is_some(),
            },
            communication: CommunicationPreferences {
                personalized_offers: self.personalized_offers.is_some(),
                news_and_updates: self.news_and_updates.is_some(),
                promotional_offers: self.promotional_offers.is_some(),
            },
        }
    }

    /// Check the form and split it into the new settings and the new
    /// password, if one was entered.
    ///
    /// # Errors
    /// - [ValidationError::RequiredField] if the full name or email is blank.
    /// - [ValidationError::PasswordMismatch] if either password field is
    ///   filled in and they differ.
    pub fn validate(&self) -> Result<(Settings, Option<String>), ValidationError> {
        require(&self.full_name, "full_name", "Full name")?;
        require(&self.email, "email", "Email")?;

        let PasswordPair {
            password,
            confirm_password,
        } = &self.passwords;
        let new_password = if password.is_empty() && confirm_password.is_empty() {
            None
        } else {
            check_password_confirmation(password, confirm_password)?;
            Some(password.clone())
        };

        Ok((self.to_settings(), new_password))
    }
}

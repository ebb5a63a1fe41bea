//! Validation of form input before it is forwarded to an external service.

/// Input that was rejected before submission.
///
/// Validation errors are shown inline next to the offending field and block
/// the request to the external service.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The username or password was left empty on the log-in or registration form.
    #[error("Please fill in all fields!")]
    MissingCredentials,

    /// A required field was left empty.
    #[error("{label} is required")]
    RequiredField {
        /// The name of the form field.
        field: &'static str,
        /// The human readable name of the field.
        label: &'static str,
    },

    /// The password and its confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The selected data package is not in the catalog.
    #[error("Unknown data package \"{0}\"")]
    UnknownPackage(String),

    /// The selected payment method is not offered.
    #[error("Unknown payment method \"{0}\"")]
    UnknownPaymentMethod(String),
}

impl ValidationError {
    /// The name of the form field the error should be displayed next to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingCredentials => "password",
            ValidationError::RequiredField { field, .. } => field,
            ValidationError::PasswordMismatch => "confirm_password",
            ValidationError::UnknownPackage(_) => "package",
            ValidationError::UnknownPaymentMethod(_) => "payment_method",
        }
    }
}

/// Check a password against its confirmation while the user is still typing.
///
/// An empty confirmation is not an error yet, so the message only appears
/// once the user has started filling in the second field.
pub fn check_password_confirmation_live(
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if !confirm_password.is_empty() && password != confirm_password {
        Err(ValidationError::PasswordMismatch)
    } else {
        Ok(())
    }
}

/// Check a password against its confirmation on submission.
pub fn check_password_confirmation(
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if password != confirm_password {
        Err(ValidationError::PasswordMismatch)
    } else {
        Ok(())
    }
}

/// Reject `value` if it is empty or only whitespace.
pub fn require(
    value: &str,
    field: &'static str,
    label: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::RequiredField { field, label })
    } else {
        Ok(())
    }
}

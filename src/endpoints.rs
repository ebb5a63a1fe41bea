//! The API endpoints URIs.

/// The root route which shows the dashboard.
pub const ROOT: &str = "/";
/// The landing page for logged in customers.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for buying a data package.
pub const DATA_PACKAGES_VIEW: &str = "/data-packages";
/// The page listing the customer's transactions.
pub const TRANSACTION_HISTORY_VIEW: &str = "/transaction-history";
/// The page for editing profile and preferences.
pub const SETTINGS_VIEW: &str = "/settings";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/login";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a customer.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for registering a new customer.
pub const REGISTER_API: &str = "/api/register";
/// The route for the client to log out the current customer.
pub const LOG_OUT: &str = "/api/log_out";
/// The route that re-validates a password and its confirmation while the user types.
pub const PASSWORD_CONFIRMATION_API: &str = "/api/password_confirmation";
/// The route that renders the summary for the selected data package.
pub const PACKAGE_SUMMARY_API: &str = "/api/data-packages/summary";
/// The route for purchasing a data package.
pub const PURCHASE_API: &str = "/api/data-packages/purchase";
/// The route for exporting the filtered transaction history.
pub const EXPORT_API: &str = "/api/transactions/export";
/// The route for saving the customer's settings.
pub const SETTINGS_API: &str = "/api/settings";
/// The route for polling the "settings saved" banner.
pub const SETTINGS_BANNER_API: &str = "/api/settings/banner";

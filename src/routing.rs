//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        get_log_in_page, get_log_out, get_register_page, password_confirmation_endpoint,
        post_log_in, register_user,
    },
    dashboard::get_dashboard_page,
    data_package::{get_data_packages_page, get_package_summary, purchase_endpoint},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    logging::logging_middleware,
    not_found::get_404_not_found,
    settings::{get_settings_banner, get_settings_page, save_settings_endpoint},
    transaction::{export_transactions_endpoint, get_transaction_history_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let views = Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::DATA_PACKAGES_VIEW, get(get_data_packages_page))
        .route(
            endpoints::TRANSACTION_HISTORY_VIEW,
            get(get_transaction_history_page),
        )
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api = Router::new()
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::REGISTER_API, post(register_user))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::PASSWORD_CONFIRMATION_API,
            post(password_confirmation_endpoint),
        )
        .route(endpoints::PACKAGE_SUMMARY_API, get(get_package_summary))
        .route(endpoints::PURCHASE_API, post(purchase_endpoint))
        .route(endpoints::EXPORT_API, post(export_transactions_endpoint))
        .route(endpoints::SETTINGS_API, post(save_settings_endpoint))
        .route(endpoints::SETTINGS_BANNER_API, get(get_settings_banner));

    views
        .merge(api)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use scraper::Html;

    use crate::{
        View, endpoints,
        test_utils::{select_all_text, select_text, test_state},
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let (state, _) = test_state();

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn every_view_is_addressable() {
        let server = get_test_server();

        for view in View::ALL {
            let response = server.get(view.path()).await;

            response.assert_status_ok();
            let html = Html::parse_document(&response.text());
            assert_eq!(
                select_text(&html, "title"),
                format!("{} - DataNet", view.title()),
                "wrong title for {}",
                view.path()
            );
        }
    }

    #[tokio::test]
    async fn root_serves_dashboard() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert_eq!(select_text(&html, "title"), "Dashboard - DataNet");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn htmx_filter_request_returns_table_only() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTION_HISTORY_VIEW)
            .add_query_param("status", "failed")
            .add_query_param("range", "all-time")
            .add_header(
                HeaderName::from_static("hx-request"),
                HeaderValue::from_static("true"),
            )
            .await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        assert_eq!(
            select_all_text(&html, "title"),
            Vec::<String>::new(),
            "htmx response should not be a full page"
        );
        let statuses = select_all_text(&html, "#transaction-table span[data-status]");
        assert!(!statuses.is_empty());
        assert!(statuses.iter().all(|status| status == "Failed"), "got {statuses:?}");
    }

    #[tokio::test]
    async fn purchase_form_deserialises() {
        let server = get_test_server();
        let form = [("package", "premium"), ("payment_method", "banktransfer")];

        let response = server.post(endpoints::PURCHASE_API).form(&form).await;

        response.assert_status_ok();
        assert!(
            response
                .text()
                .contains("Purchasing Premium package with Bank Transfer")
        );
    }

    #[tokio::test]
    async fn settings_form_deserialises_with_unticked_boxes() {
        let server = get_test_server();
        let form = [
            ("full_name", "Budi Santoso"),
            ("email", "budi.santoso@email.com"),
            ("phone", ""),
            ("share_data", "on"),
            ("password", "abc123"),
            ("confirm_password", "abc124"),
        ];

        let response = server.post(endpoints::SETTINGS_API).form(&form).await;

        response.assert_status_ok();
        assert!(response.text().contains("Passwords do not match"));
    }

    #[tokio::test]
    async fn register_redirects_with_htmx_header() {
        let server = get_test_server();
        let form = [
            ("username", "budi"),
            ("password", "abc123"),
            ("confirm_password", "abc123"),
        ];

        let response = server.post(endpoints::REGISTER_API).form(&form).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("hx-redirect"), endpoints::LOG_IN_VIEW);
    }

    #[tokio::test]
    async fn log_out_redirects_to_log_in() {
        let server = get_test_server();

        let response = server.get(endpoints::LOG_OUT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::LOG_IN_VIEW);
    }
}

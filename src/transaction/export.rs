//! Defines the endpoint that forwards an export of the filtered transaction
//! history to the export service.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    alert::Alert,
    external::{ExportRequest, ExportService},
    timezone::Clock,
};

use super::{
    core::TransactionStore,
    filter::{FilterQuery, FilterState, filter_transactions},
};

/// The file formats the export service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// A printable PDF document.
    Pdf,
    /// An Excel spreadsheet.
    Excel,
}

impl ExportFormat {
    /// The name shown to customers.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Excel => "Excel",
        }
    }

    /// The value submitted by the export buttons.
    pub fn as_form_value(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "excel",
        }
    }
}

/// The state needed to export transactions.
#[derive(Clone)]
pub struct ExportState {
    /// Where to get today's date from for the date range filter.
    pub clock: Clock,
    /// The transactions to filter.
    pub transactions: Arc<TransactionStore>,
    /// Receives the export request.
    pub export_service: Arc<dyn ExportService>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            clock: state.clock.clone(),
            transactions: state.transactions.clone(),
            export_service: state.collaborators.export.clone(),
        }
    }
}

/// The export button that was clicked and the filters in effect.
#[derive(Debug, Deserialize)]
pub struct ExportForm {
    /// The requested file format.
    pub format: ExportFormat,
    /// The status filter.
    pub status: Option<String>,
    /// The date range filter.
    pub range: Option<String>,
}

/// Start an export of the transactions that pass the submitted filters.
///
/// The export runs in the background and the customer is told it has
/// started. Failures are logged.
pub async fn export_transactions_endpoint(
    State(state): State<ExportState>,
    Form(form): Form<ExportForm>,
) -> Response {
    let filter = FilterState::from(FilterQuery {
        status: form.status,
        range: form.range,
    });
    let today = match state.clock.today() {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let transactions = filter_transactions(state.transactions.all(), &filter, today)
        .into_iter()
        .cloned()
        .collect();
    let request = ExportRequest {
        format: form.format,
        filter,
        transactions,
    };

    let export_service = state.export_service.clone();
    tokio::task::spawn_blocking(move || {
        let format = request.format.label();

        if let Err(error) = export_service.export(request) {
            tracing::error!("Could not export transactions to {format}: {error}");
        }
    });

    Alert::SuccessSimple {
        message: format!("Exporting to {}...", form.format.label()),
    }
    .into_response()
}

#[cfg(test)]
mod export_tests {
    use axum::{
        Form,
        extract::{FromRef, State},
        http::StatusCode,
    };

    use crate::{
        external::ExternalServiceError,
        test_utils::{RecordingCollaborators, parse_html_fragment, select_text, test_state},
        transaction::filter::{DateRangeFilter, FilterState, StatusFilter},
    };

    use super::{ExportForm, ExportFormat, ExportState, export_transactions_endpoint};

    #[tokio::test]
    async fn export_sends_filtered_rows() {
        let (state, recorder) = test_state();
        let form = ExportForm {
            format: ExportFormat::Pdf,
            status: Some("success".to_owned()),
            range: Some("all-time".to_owned()),
        };

        let response =
            export_transactions_endpoint(State(ExportState::from_ref(&state)), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert!(select_text(&html, "div[role=alert]").contains("Exporting to PDF..."));

        recorder.wait_for(&recorder.exports).await;
        let exports = recorder.exports.lock().unwrap();
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].format, ExportFormat::Pdf);
        assert_eq!(
            exports[0].filter,
            FilterState {
                status: StatusFilter::Success,
                date_range: DateRangeFilter::AllTime,
            }
        );
        assert_eq!(exports[0].transactions.len(), 6);
    }

    #[tokio::test]
    async fn export_failure_is_not_shown_to_customer() {
        let (mut state, _) = test_state();
        let recorder = RecordingCollaborators::failing(ExternalServiceError::Unavailable {
            service: "export service",
        });
        state.collaborators = recorder.collaborators();
        let form = ExportForm {
            format: ExportFormat::Excel,
            status: None,
            range: None,
        };

        let response =
            export_transactions_endpoint(State(ExportState::from_ref(&state)), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert!(select_text(&html, "div[role=alert]").contains("Exporting to Excel..."));
        recorder.wait_for(&recorder.exports).await;
    }

    #[test]
    fn form_values_parse() {
        let form: ExportForm =
            serde_urlencoded::from_str("format=excel&status=pending&range=last7days").unwrap();

        assert_eq!(form.format, ExportFormat::Excel);
        assert_eq!(form.status.as_deref(), Some("pending"));
    }
}

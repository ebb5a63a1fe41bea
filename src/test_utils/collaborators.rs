use std::sync::{Arc, Mutex};

use time::{Date, macros::date};

use crate::{
    AppState,
    external::{
        BillingService, Collaborators, Credentials, ExportRequest, ExportService,
        ExternalServiceError, OrderConfirmation, ProfileService, PurchaseOrder, SessionService,
        SessionToken,
    },
    settings::Settings,
    timezone::Clock,
    transaction::TransactionStore,
};

/// The date reported by the clock in [test_state].
pub(crate) const TEST_TODAY: Date = date!(2025-10-20);

/// An external service double that records every call.
///
/// When created with [RecordingCollaborators::failing], every call is still
/// recorded but returns the given error.
#[derive(Debug, Default)]
pub(crate) struct RecordingCollaborators {
    failure: Option<ExternalServiceError>,
    pub exports: Mutex<Vec<ExportRequest>>,
    pub orders: Mutex<Vec<PurchaseOrder>>,
    pub saved_settings: Mutex<Vec<(Settings, Option<String>)>>,
    pub log_ins: Mutex<Vec<Credentials>>,
    pub registrations: Mutex<Vec<Credentials>>,
    pub log_outs: Mutex<Vec<Option<SessionToken>>>,
}

impl RecordingCollaborators {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn failing(error: ExternalServiceError) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(error),
            ..Default::default()
        })
    }

    pub(crate) fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators {
            export: self.clone(),
            billing: self.clone(),
            profile: self.clone(),
            session: self.clone(),
        }
    }

    fn result(&self) -> Result<(), ExternalServiceError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Wait for fire-and-forget calls spawned by a handler to be recorded.
    pub(crate) async fn wait_for<T>(&self, calls: &Mutex<Vec<T>>) {
        for _ in 0..200 {
            if !calls.lock().unwrap().is_empty() {
                return;
            }

            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        panic!("timed out waiting for a call to be recorded");
    }
}

impl ExportService for RecordingCollaborators {
    fn export(&self, request: ExportRequest) -> Result<(), ExternalServiceError> {
        self.exports.lock().unwrap().push(request);
        self.result()
    }
}

impl BillingService for RecordingCollaborators {
    fn purchase(&self, order: &PurchaseOrder) -> Result<OrderConfirmation, ExternalServiceError> {
        self.orders.lock().unwrap().push(order.clone());
        self.result().map(|_| OrderConfirmation {
            order_reference: "ORD-TEST".to_owned(),
        })
    }
}

impl ProfileService for RecordingCollaborators {
    fn save_settings(
        &self,
        settings: &Settings,
        new_password: Option<&str>,
    ) -> Result<(), ExternalServiceError> {
        self.saved_settings
            .lock()
            .unwrap()
            .push((settings.clone(), new_password.map(str::to_owned)));
        self.result()
    }
}

impl SessionService for RecordingCollaborators {
    fn log_in(&self, credentials: &Credentials) -> Result<SessionToken, ExternalServiceError> {
        self.log_ins.lock().unwrap().push(credentials.clone());
        self.result().map(|_| SessionToken::new("test-session"))
    }

    fn register(&self, credentials: &Credentials) -> Result<(), ExternalServiceError> {
        self.registrations.lock().unwrap().push(credentials.clone());
        self.result()
    }

    fn log_out(&self, token: Option<&SessionToken>) -> Result<(), ExternalServiceError> {
        self.log_outs.lock().unwrap().push(token.cloned());
        self.result()
    }
}

/// App state with the sample transactions, a clock fixed at [TEST_TODAY] and
/// recording collaborators.
pub(crate) fn test_state() -> (AppState, Arc<RecordingCollaborators>) {
    let recorder = RecordingCollaborators::new();
    let state = AppState::new(
        "42",
        Clock::Fixed(TEST_TODAY),
        TransactionStore::sample(),
        recorder.collaborators(),
    );

    (state, recorder)
}

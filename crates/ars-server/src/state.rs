use std::sync::Arc;
use std::time::Duration;

use ars_dialog::controller::{DialogController, DialogDeps};
use ars_dialog::correlator::MessageCorrelator;
use ars_dialog::gateway::Gateway;
use ars_dialog::settings::SharedSettings;
use ars_storage::kv::{KeyValueStore, MemoryStore};
use ars_storage::messages::{MemoryMessageLog, MessageLog};
use ars_storage::patients::{MemoryPatientDirectory, PatientDirectory};
use ars_storage::records::{MemoryRecordStore, RiskRecordStore};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub dialog: Arc<DialogController>,
    pub store: Arc<dyn KeyValueStore>,
    pub patients: Arc<dyn PatientDirectory>,
    pub records: Arc<dyn RiskRecordStore>,
    pub messages: Arc<dyn MessageLog>,
    pub settings: SharedSettings,
}

impl AppState {
    pub fn new(deps: DialogDeps, delivery_timeout: Duration) -> Self {
        let dialog = DialogController::new(deps.clone()).with_delivery_timeout(delivery_timeout);
        Self {
            dialog: Arc::new(dialog),
            store: deps.store,
            patients: deps.patients,
            records: deps.records,
            messages: deps.messages,
            settings: deps.settings,
        }
    }

    /// Single-process wiring: every store lives in memory.
    pub fn in_memory(
        settings: SharedSettings,
        gateway: Arc<dyn Gateway>,
        delivery_timeout: Duration,
    ) -> Self {
        Self::new(
            DialogDeps {
                store: Arc::new(MemoryStore::new()),
                patients: Arc::new(MemoryPatientDirectory::new()),
                records: Arc::new(MemoryRecordStore::new()),
                messages: Arc::new(MemoryMessageLog::new()),
                gateway,
                correlator: Arc::new(MessageCorrelator::new()),
                settings,
            },
            delivery_timeout,
        )
    }
}

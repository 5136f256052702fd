use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use ars_core::models::patient::Patient;

use crate::error::StorageError;
use crate::BoxFuture;

/// Registered participants, looked up by E.164 phone or registration code.
pub trait PatientDirectory: Send + Sync {
    fn by_phone<'a>(&'a self, phone: &'a str)
    -> BoxFuture<'a, Result<Option<Patient>, StorageError>>;

    /// Codes compare case-insensitively.
    fn by_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Option<Patient>, StorageError>>;

    fn get(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Patient>, StorageError>>;

    /// Fails with [`StorageError::Conflict`] when the phone or code is taken.
    fn insert(&self, patient: Patient) -> BoxFuture<'_, Result<Patient, StorageError>>;
}

#[derive(Debug, Default)]
pub struct MemoryPatientDirectory {
    patients: RwLock<HashMap<Uuid, Patient>>,
}

impl MemoryPatientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn find<F>(&self, predicate: F) -> BoxFuture<'_, Result<Option<Patient>, StorageError>>
    where
        F: Fn(&Patient) -> bool + Send + 'static,
    {
        Box::pin(async move {
            Ok(self
                .patients
                .read()
                .await
                .values()
                .find(|p| predicate(p))
                .cloned())
        })
    }
}

impl PatientDirectory for MemoryPatientDirectory {
    fn by_phone<'a>(
        &'a self,
        phone: &'a str,
    ) -> BoxFuture<'a, Result<Option<Patient>, StorageError>> {
        let phone = phone.to_string();
        self.find(move |p| p.phone_number == phone)
    }

    fn by_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Option<Patient>, StorageError>> {
        let code = code.trim().to_uppercase();
        self.find(move |p| p.code.eq_ignore_ascii_case(&code))
    }

    fn get(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Patient>, StorageError>> {
        Box::pin(async move { Ok(self.patients.read().await.get(&id).cloned()) })
    }

    fn insert(&self, patient: Patient) -> BoxFuture<'_, Result<Patient, StorageError>> {
        Box::pin(async move {
            let mut patients = self.patients.write().await;
            if let Some(existing) = patients.values().find(|p| {
                p.phone_number == patient.phone_number || p.code.eq_ignore_ascii_case(&patient.code)
            }) {
                let field = if existing.phone_number == patient.phone_number {
                    "phone number"
                } else {
                    "code"
                };
                return Err(StorageError::Conflict(format!(
                    "a patient with this {field} already exists"
                )));
            }
            patients.insert(patient.id, patient.clone());
            tracing::info!(patient_id = %patient.id, "patient registered");
            Ok(patient)
        })
    }
}

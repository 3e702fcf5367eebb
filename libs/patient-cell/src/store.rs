use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use scheduling_cell::models::PatientContact;
use scheduling_cell::PatientDirectory;
use shared_models::PatientId;

use crate::models::Patient;

#[derive(Debug)]
struct StoreInner {
    next_id: PatientId,
    records: HashMap<PatientId, Patient>,
}

impl Default for StoreInner {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: HashMap::new(),
        }
    }
}

/// Owner of all patient records. Ids are assigned here, monotonically, and
/// never reused.
#[derive(Debug, Clone, Default)]
pub struct PatientStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, mut record: Patient) -> Patient {
        let mut inner = self.inner.write().await;
        record.id = inner.next_id;
        inner.next_id += 1;
        inner.records.insert(record.id, record.clone());
        record
    }

    /// Full replace by id. Returns false, changing nothing, when the id is
    /// unknown.
    pub async fn update(&self, record: Patient) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.records.contains_key(&record.id) {
            return false;
        }
        inner.records.insert(record.id, record);
        true
    }

    pub async fn remove(&self, id: PatientId) -> bool {
        self.inner.write().await.records.remove(&id).is_some()
    }

    pub async fn get_by_id(&self, id: PatientId) -> Option<Patient> {
        self.inner.read().await.records.get(&id).cloned()
    }

    /// Exact-match lookup on the stored document, ignoring surrounding
    /// whitespace in the input.
    pub async fn get_by_document(&self, document: &str) -> Option<Patient> {
        let wanted = document.trim();
        self.inner
            .read()
            .await
            .records
            .values()
            .find(|p| p.details.document == wanted)
            .cloned()
    }

    pub async fn list_all(&self) -> Vec<Patient> {
        let inner = self.inner.read().await;
        let mut all: Vec<Patient> = inner.records.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }

    /// True when another record (a different id) already holds this document.
    pub async fn document_taken(&self, document: &str, exclude: Option<PatientId>) -> bool {
        let wanted = document.trim();
        self.inner
            .read()
            .await
            .records
            .values()
            .any(|p| Some(p.id) != exclude && p.details.document == wanted)
    }
}

// The scheduler resolves patients through this view when booking.
#[async_trait]
impl PatientDirectory for PatientStore {
    async fn find_patient(&self, patient_id: PatientId) -> Option<PatientContact> {
        self.get_by_id(patient_id).await.map(|p| PatientContact {
            id: p.id,
            full_name: p.details.full_name(),
            email: p.details.email.clone(),
        })
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use scheduling_cell::models::PractitionerContact;
use scheduling_cell::PractitionerDirectory;
use shared_models::PractitionerId;

use crate::models::Practitioner;

#[derive(Debug)]
struct StoreInner {
    next_id: PractitionerId,
    records: HashMap<PractitionerId, Practitioner>,
}

impl Default for StoreInner {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: HashMap::new(),
        }
    }
}

/// Owner of all practitioner records. Ids are assigned here, monotonically,
/// and never reused.
#[derive(Debug, Clone, Default)]
pub struct PractitionerStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl PractitionerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, mut record: Practitioner) -> Practitioner {
        let mut inner = self.inner.write().await;
        record.id = inner.next_id;
        inner.next_id += 1;
        inner.records.insert(record.id, record.clone());
        record
    }

    /// Full replace by id. Returns false, changing nothing, when the id is
    /// unknown.
    pub async fn update(&self, record: Practitioner) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.records.contains_key(&record.id) {
            return false;
        }
        inner.records.insert(record.id, record);
        true
    }

    pub async fn remove(&self, id: PractitionerId) -> bool {
        self.inner.write().await.records.remove(&id).is_some()
    }

    pub async fn get_by_id(&self, id: PractitionerId) -> Option<Practitioner> {
        self.inner.read().await.records.get(&id).cloned()
    }

    pub async fn get_by_document(&self, document: &str) -> Option<Practitioner> {
        let wanted = document.trim();
        self.inner
            .read()
            .await
            .records
            .values()
            .find(|p| p.details.document == wanted)
            .cloned()
    }

    pub async fn list_all(&self) -> Vec<Practitioner> {
        let inner = self.inner.read().await;
        let mut all: Vec<Practitioner> = inner.records.values().cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }

    /// Case-insensitive substring search on the specialty.
    pub async fn list_by_specialty(&self, specialty: &str) -> Vec<Practitioner> {
        let wanted = specialty.trim().to_lowercase();
        let inner = self.inner.read().await;
        let mut matching: Vec<Practitioner> = inner
            .records
            .values()
            .filter(|p| p.specialty.to_lowercase().contains(&wanted))
            .cloned()
            .collect();
        matching.sort_by_key(|p| p.id);
        matching
    }

    /// True when another record (a different id) already holds this document.
    pub async fn document_taken(&self, document: &str, exclude: Option<PractitionerId>) -> bool {
        let wanted = document.trim();
        self.inner
            .read()
            .await
            .records
            .values()
            .any(|p| Some(p.id) != exclude && p.details.document == wanted)
    }

    /// True when another record already pairs this name with this specialty,
    /// compared case-insensitively.
    pub async fn name_specialty_taken(
        &self,
        name: &str,
        specialty: &str,
        exclude: Option<PractitionerId>,
    ) -> bool {
        let wanted_name = name.trim().to_lowercase();
        let wanted_specialty = specialty.trim().to_lowercase();
        self.inner.read().await.records.values().any(|p| {
            Some(p.id) != exclude
                && p.details.name.to_lowercase() == wanted_name
                && p.specialty.to_lowercase() == wanted_specialty
        })
    }
}

// The scheduler resolves practitioners through this view when booking.
#[async_trait]
impl PractitionerDirectory for PractitionerStore {
    async fn find_practitioner(
        &self,
        practitioner_id: PractitionerId,
    ) -> Option<PractitionerContact> {
        self.get_by_id(practitioner_id)
            .await
            .map(|p| PractitionerContact {
                id: p.id,
                full_name: p.details.full_name(),
                specialty: p.specialty.clone(),
            })
    }
}

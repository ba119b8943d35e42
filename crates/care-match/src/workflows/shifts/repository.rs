use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::domain::{Shift, ShiftId, WorkerId};

/// Storage abstraction so assignment logic can be exercised in isolation.
pub trait ShiftRepository: Send + Sync {
    fn fetch(&self, id: &ShiftId) -> Result<Option<Shift>, RepositoryError>;
    fn update(&self, shift: Shift) -> Result<(), RepositoryError>;
    fn for_worker(&self, worker_id: &WorkerId) -> Result<Vec<Shift>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local roster used by the service binary and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryShiftRepository {
    shifts: Arc<Mutex<BTreeMap<ShiftId, Shift>>>,
}

impl InMemoryShiftRepository {
    pub fn with_shifts(shifts: impl IntoIterator<Item = Shift>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.lock();
            for shift in shifts {
                guard.insert(shift.id.clone(), shift);
            }
        }
        repository
    }

    pub fn insert(&self, shift: Shift) {
        self.lock().insert(shift.id.clone(), shift);
    }

    pub fn all(&self) -> Vec<Shift> {
        self.lock().values().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<ShiftId, Shift>> {
        self.shifts.lock().expect("shift repository mutex poisoned")
    }
}

impl ShiftRepository for InMemoryShiftRepository {
    fn fetch(&self, id: &ShiftId) -> Result<Option<Shift>, RepositoryError> {
        Ok(self.lock().get(id).cloned())
    }

    fn update(&self, shift: Shift) -> Result<(), RepositoryError> {
        let mut guard = self.lock();
        if guard.contains_key(&shift.id) {
            guard.insert(shift.id.clone(), shift);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn for_worker(&self, worker_id: &WorkerId) -> Result<Vec<Shift>, RepositoryError> {
        Ok(self
            .lock()
            .values()
            .filter(|shift| shift.belongs_to(worker_id))
            .cloned()
            .collect())
    }
}

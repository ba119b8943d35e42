//! Per-item batch processing where one failure never aborts the remaining items.

use std::fmt::Display;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure<K> {
    pub id: K,
    pub reason: String,
}

/// Partition of batch inputs into succeeded and failed sets, both in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome<K> {
    pub succeeded: Vec<K>,
    pub failed: Vec<BatchFailure<K>>,
}

impl<K> Default for BatchOutcome<K> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<K> BatchOutcome<K> {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run `work` for every item, recording each result under the item's key.
pub fn run_batch<T, K, E, F>(
    items: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
    mut work: F,
) -> BatchOutcome<K>
where
    E: Display,
    F: FnMut(&T) -> Result<(), E>,
{
    let mut outcome = BatchOutcome::default();
    for item in items {
        let id = key(&item);
        match work(&item) {
            Ok(()) => outcome.succeeded.push(id),
            Err(err) => outcome.failed.push(BatchFailure {
                id,
                reason: err.to_string(),
            }),
        }
    }
    outcome
}

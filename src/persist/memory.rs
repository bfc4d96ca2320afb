//! Process-local slot backend.

use std::sync::{Arc, Mutex, PoisonError};

use hashbrown::HashMap;

use super::{PersistError, PersistResult, Slot};

/// In-memory [`Slot`] whose clones share one map.
///
/// Stands in for browser local storage: every store opened on a clone sees
/// the same keys, with no isolation between readers and writers.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    inner: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemorySlot {
    /// Creates an empty slot map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when no key has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Slot for MemorySlot {
    fn read(&mut self, key: &str) -> PersistResult<Option<Vec<u8>>> {
        let map = self
            .inner
            .lock()
            .map_err(|_| PersistError::Message("memory slot poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &[u8]) -> PersistResult<()> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| PersistError::Message("memory slot poisoned".to_string()))?;
        map.insert(key.to_string(), payload.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_survives_a_poisoned_lock() {
        let mut slot = MemorySlot::new();
        slot.write("a", b"1").expect("write");
        slot.write("b", b"2").expect("write");

        let shared = slot.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.inner.lock().expect("lock");
            panic!("poison the map");
        })
        .join();

        assert_eq!(slot.len(), 2);
        assert!(!slot.is_empty());
        assert!(matches!(slot.read("a"), Err(PersistError::Message(_))));
    }
}

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Round-robin cursor over the upstream API keys.
///
/// Shared by every request, so the cursor is an atomic: concurrent callers
/// never observe the same slot out of turn. Call `i` (counting from zero over
/// the life of the rotation) receives `keys[i % keys.len()]`.
pub struct KeyRotation {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyRotation {
    pub fn new(keys: Vec<String>) -> Result<Self> {
        if keys.is_empty() {
            return Err(Error::Config(
                "key rotation requires at least one API key".to_string(),
            ));
        }
        Ok(Self {
            keys,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Returns the slot index and the key for the next call.
    pub fn next_key(&self) -> (usize, &str) {
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        (slot, &self.keys[slot])
    }
}

impl std::fmt::Debug for KeyRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRotation")
            .field("keys", &self.keys.len())
            .field("cursor", &self.cursor.load(Ordering::Relaxed))
            .finish()
    }
}

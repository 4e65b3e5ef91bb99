//! Dense thread-index assignment.

use std::collections::HashMap;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

/// Assigns each thread a dense index the first time it asks for one.
///
/// Indices start at 0 and follow first-access order, so two runs produce the
/// same assignment only if threads reach the registry in the same order.
#[derive(Debug, Default)]
pub struct ThreadRegistry {
    state: Mutex<RegistryState>,
}

#[derive(Debug, Default)]
struct RegistryState {
    next_index: u32,
    indices: HashMap<ThreadId, u32>,
}

impl ThreadRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the calling thread's index, assigning the next free one if needed.
    pub fn current_index(&self) -> u32 {
        self.index_of(thread::current().id())
    }

    /// Returns the index for `id`, assigning the next free one if needed.
    pub fn index_of(&self, id: ThreadId) -> u32 {
        let mut state = self.state.lock();
        if let Some(&index) = state.indices.get(&id) {
            return index;
        }
        let index = state.next_index;
        state.next_index += 1;
        state.indices.insert(id, index);
        tracing::debug!(?id, index, "assigned generator thread index");
        index
    }

    /// Number of threads registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().indices.len()
    }

    /// Returns true if no thread has registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Per-thread scratch buffer registry
//!
//! Each producer thread composes its log line in a private string buffer
//! before the finished line is handed to the worker. The registry maps
//! thread identity to that buffer, sharded across a fixed number of locks so
//! that first-access races from many threads never serialize on one global
//! lock. There is no eviction: the registry grows with the number of
//! distinct threads that ever logged and lives as long as the logger.

use parking_lot::Mutex;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::thread::{self, ThreadId};

const SHARD_COUNT: usize = 16;

pub struct ScratchRegistry {
    shards: [Mutex<HashMap<ThreadId, String>>; SHARD_COUNT],
}

impl ScratchRegistry {
    pub fn new() -> Self {
        Self {
            shards: std::array::from_fn(|_| Mutex::new(HashMap::new())),
        }
    }

    fn shard_index(id: ThreadId) -> usize {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        (hasher.finish() as usize) % SHARD_COUNT
    }

    /// Run `f` against the calling thread's scratch buffer, creating it on
    /// first access.
    ///
    /// The shard lock is held for the duration of `f`; only threads hashing
    /// to the same shard contend, and each thread only ever touches its own
    /// entry.
    pub fn with_buffer<R>(&self, f: impl FnOnce(&mut String) -> R) -> R {
        let id = thread::current().id();
        let mut shard = self.shards[Self::shard_index(id)].lock();
        let buffer = shard.entry(id).or_default();
        f(buffer)
    }

    /// Number of distinct threads that have logged through this registry.
    pub fn thread_count(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }
}

impl Default for ScratchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

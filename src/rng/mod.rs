//! Deterministic per-thread random number generation.
//!
//! Every worker thread owns its own generator. A generator is seeded once,
//! on the thread's first draw, from the provider's global seed mixed with the
//! thread's dense index. Only index assignment takes a lock; drawing never does.
//!
//! A thread's cached generators are pruned whenever it next draws, so
//! generators of dropped providers do not accumulate on long-lived workers.
//!
//! ```text
//!   global seed ──┐
//!                 ├─ derive_seed ─> StdRng::seed_from_u64 ─> thread-local generator
//!   thread index ─┘
//! ```

mod registry;

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DEFAULT_GLOBAL_SEED;

pub use registry::ThreadRegistry;

/// Generator type handed to samplers.
pub type Generator = StdRng;

static NEXT_PROVIDER_ID: AtomicU64 = AtomicU64::new(0);
static GLOBAL_PROVIDER: OnceLock<Arc<RngProvider>> = OnceLock::new();

thread_local! {
    /// Generators owned by this thread, keyed by provider id.
    static GENERATORS: RefCell<HashMap<u64, CachedGenerator>> = RefCell::new(HashMap::new());
}

/// Thread-local generator tied to the liveness of its provider.
struct CachedGenerator {
    provider: Weak<()>,
    generator: Generator,
}

/// Mixes a global seed with a thread index into one 64-bit generator seed.
///
/// The index is spread with the golden-ratio increment and the result passed
/// through the `SplitMix64` finalizer, so neighbouring indices give unrelated seeds.
#[must_use]
pub fn derive_seed(global_seed: u64, thread_index: u32) -> u64 {
    let spread = (u64::from(thread_index) + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    let mut z = global_seed ^ spread;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Hands out one deterministically seeded generator per thread.
///
/// Generators are created lazily on first use and dropped when their thread
/// exits or, once the provider itself is dropped, on the thread's next draw
/// from any provider. Streams are reproducible for a fixed seed and a fixed
/// order in which threads first draw.
#[derive(Debug)]
pub struct RngProvider {
    id: u64,
    global_seed: u64,
    registry: ThreadRegistry,
    alive: Arc<()>,
}

impl RngProvider {
    /// Creates a provider with its own thread-index registry.
    #[must_use]
    pub fn new(global_seed: u64) -> Self {
        Self {
            id: NEXT_PROVIDER_ID.fetch_add(1, Ordering::Relaxed),
            global_seed,
            registry: ThreadRegistry::new(),
            alive: Arc::new(()),
        }
    }

    /// Returns the process-wide provider seeded with [`DEFAULT_GLOBAL_SEED`].
    pub fn global() -> Arc<RngProvider> {
        Arc::clone(GLOBAL_PROVIDER.get_or_init(|| Arc::new(RngProvider::new(DEFAULT_GLOBAL_SEED))))
    }

    /// Returns the global seed.
    #[must_use]
    pub fn global_seed(&self) -> u64 {
        self.global_seed
    }

    /// Returns the calling thread's index within this provider.
    pub fn thread_index(&self) -> u32 {
        self.registry.current_index()
    }

    /// Number of threads that have been assigned an index.
    #[must_use]
    pub fn registered_threads(&self) -> usize {
        self.registry.len()
    }

    /// Runs `f` with the calling thread's generator.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside `f` for the same thread.
    pub fn with_generator<T>(&self, f: impl FnOnce(&mut Generator) -> T) -> T {
        GENERATORS.with(|cell| {
            let mut generators = cell.borrow_mut();
            generators.retain(|_, cached| cached.provider.strong_count() > 0);
            let cached = generators.entry(self.id).or_insert_with(|| CachedGenerator {
                provider: Arc::downgrade(&self.alive),
                generator: self.seed_generator(),
            });
            f(&mut cached.generator)
        })
    }

    fn seed_generator(&self) -> Generator {
        let index = self.thread_index();
        let seed = derive_seed(self.global_seed, index);
        tracing::trace!(provider = self.id, index, "seeding generator");
        StdRng::seed_from_u64(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::thread;

    fn cached_generators() -> usize {
        GENERATORS.with(|cell| cell.borrow().len())
    }

    fn draw(provider: &RngProvider, n: usize) -> Vec<u64> {
        provider.with_generator(|rng| (0..n).map(|_| rng.gen::<u64>()).collect())
    }

    #[test]
    fn test_derive_seed_is_pure() {
        assert_eq!(derive_seed(12345, 0), derive_seed(12345, 0));
        assert_ne!(derive_seed(12345, 0), derive_seed(12345, 1));
        assert_ne!(derive_seed(12345, 0), derive_seed(54321, 0));
    }

    #[test]
    fn test_same_seed_same_thread_reproduces_stream() {
        let a = RngProvider::new(99);
        let b = RngProvider::new(99);
        assert_eq!(draw(&a, 16), draw(&b, 16));
    }

    #[test]
    fn test_stream_continues_across_calls() {
        let provider = RngProvider::new(7);
        let first = draw(&provider, 8);
        let second = draw(&provider, 8);
        assert_ne!(first, second);

        let fresh = RngProvider::new(7);
        let combined = draw(&fresh, 16);
        assert_eq!(&combined[..8], first.as_slice());
        assert_eq!(&combined[8..], second.as_slice());
    }

    #[test]
    fn test_threads_get_distinct_streams() {
        let provider = RngProvider::new(5);
        let main_stream = draw(&provider, 8);
        let other_stream = thread::scope(|scope| {
            scope
                .spawn(|| draw(&provider, 8))
                .join()
                .expect("thread panicked")
        });
        assert_ne!(main_stream, other_stream);
        assert_eq!(provider.registered_threads(), 2);
    }

    #[test]
    fn test_dropped_provider_generators_are_pruned_on_other_threads() {
        use std::sync::mpsc;

        let (to_worker, jobs) = mpsc::channel::<Arc<RngProvider>>();
        let (to_main, cached) = mpsc::channel();
        let worker = thread::spawn(move || {
            for provider in jobs {
                draw(&provider, 1);
                drop(provider);
                to_main.send(cached_generators()).expect("main thread gone");
            }
        });

        let first = Arc::new(RngProvider::new(1));
        to_worker.send(Arc::clone(&first)).unwrap();
        assert_eq!(cached.recv().unwrap(), 1);

        drop(first);
        let second = Arc::new(RngProvider::new(2));
        to_worker.send(Arc::clone(&second)).unwrap();
        assert_eq!(cached.recv().unwrap(), 1);

        to_worker.send(Arc::clone(&second)).unwrap();
        assert_eq!(cached.recv().unwrap(), 1);

        drop(to_worker);
        worker.join().expect("worker panicked");
    }

    #[test]
    fn test_global_provider_uses_default_seed() {
        assert_eq!(RngProvider::global().global_seed(), DEFAULT_GLOBAL_SEED);
        assert!(Arc::ptr_eq(&RngProvider::global(), &RngProvider::global()));
    }
}

//! Fixed-capacity resolution cache for resolved imports.
//!
//! In bulk compilation with custom resolvers, much of the cost is repeatedly
//! crossing into the resolver for specifiers that were already resolved during
//! an earlier compilation unit. This cache sits in front of that boundary: a
//! fixed array of slots, a deterministic hash of the specifier selecting a
//! starting slot, a forward linear probe wrapping at the array boundary, and a
//! signed usage heuristic that picks which colliding entry to overwrite when
//! the probe finds neither an empty slot nor a matching one.
//!
//! The cache has no individual delete operation, only [`ResolutionCache::insert`]
//! and [`ResolutionCache::clear`]. The expected usage is for the host to clear
//! the cache at a well-defined boundary, such as the end of a build. Because
//! slots are never individually vacated, an empty slot encountered during a
//! probe proves that nothing further along the chain was ever written, so
//! lookups stop there.
//!
//! # Ownership
//!
//! The cache stores a private clone of every inserted record and returns an
//! independently owned clone on every hit. Caller-supplied records are never
//! aliased, so a resolver's own result list stays independently droppable.
//!
//! # Concurrency
//!
//! Lookups take shared access and may overlap freely; [`ResolutionCache::insert`]
//! and [`ResolutionCache::clear`] take exclusive access for their full duration.
//! Usage scores are adjusted from the shared path, so they live in atomics; the
//! guard still provides all ordering, the atomic merely legalizes the write.
//! A failure of the guard itself aborts the process rather than surfacing as
//! an error; a guard that can no longer be trusted has nothing safe to offer.

mod guard;

use std::sync::atomic::{AtomicI64, Ordering};

use crate::record::ImportRecord;
use guard::CacheGuard;

/// Cost deducted from a slot's usage score each time a probe steps over it
/// without matching. Heavily collided, rarely matched slots sink toward the
/// front of the eviction order.
pub const USAGE_STEP_OVER_COST: i64 = 1;

/// Credit added to a slot's usage score each time its record is explicitly
/// read, or re-inserted under the same specifier.
pub const USAGE_READ_CREDIT: i64 = 5;

/// One unit of the cache's fixed array: a usage score plus at most one record.
///
/// `record == None` is the empty state. Scores are signed and unclamped; under
/// heavy collision pressure they go negative, which is intentional.
struct Slot {
    usage: AtomicI64,
    record: Option<ImportRecord>,
}

impl Slot {
    fn vacant() -> Self {
        Slot {
            usage: AtomicI64::new(0),
            record: None,
        }
    }
}

/// Outcome of a probe over the slot array for one specifier.
///
/// A single scan loop serves lookup, insertion, and eviction-candidate
/// tracking; the tagged outcome keeps the three branches independently
/// testable.
enum Probe {
    /// A slot holding a record for exactly this specifier.
    Found(usize),
    /// The first empty slot in probe order; nothing past it in this chain
    /// was ever written.
    Empty(usize),
    /// Every slot probed and none matched; `victim` is the lowest-usage slot
    /// encountered during this probe.
    Full { victim: usize },
}

/// Deterministic, non-cryptographic hash over a specifier's bytes.
///
/// Iterative shift-xor accumulation. Stable within a process run, which is all
/// the cache needs; no cross-run or cross-version stability is promised.
fn hash_specifier(specifier: &str) -> u64 {
    specifier
        .bytes()
        .fold(0u64, |hash, byte| (hash << 1) ^ u64::from(byte))
}

/// Scans the slot array for `specifier`, starting at its hashed index and
/// wrapping at the boundary, for at most one full revolution.
///
/// Every occupied, non-matching slot stepped over loses [`USAGE_STEP_OVER_COST`];
/// the eviction candidate comparison uses the post-deduction scores.
fn probe(slots: &[Slot], specifier: &str) -> Probe {
    debug_assert!(!slots.is_empty(), "callers gate on capacity > 0");
    let start = (hash_specifier(specifier) % slots.len() as u64) as usize;

    let mut victim = start;
    let mut victim_usage = i64::MAX;

    for step in 0..slots.len() {
        let index = (start + step) % slots.len();
        let slot = &slots[index];

        match slot.record.as_ref() {
            None => return Probe::Empty(index),
            Some(record) if record.specifier() == specifier => return Probe::Found(index),
            Some(_) => {
                let usage = slot.usage.fetch_sub(USAGE_STEP_OVER_COST, Ordering::Relaxed)
                    - USAGE_STEP_OVER_COST;
                if usage < victim_usage {
                    victim = index;
                    victim_usage = usage;
                }
            }
        }
    }

    Probe::Full { victim }
}

/// Fixed-capacity, thread-safe map from import specifiers to resolved
/// [`ImportRecord`]s.
///
/// Capacity is fixed at construction and never changes; there is no resize
/// operation. A capacity of 0 is a valid, permanently disabled cache: every
/// lookup misses and every insert is a no-op.
///
/// # Examples
///
/// ```rust
/// use importcache::{ImportRecord, ResolutionCache};
///
/// let cache = ResolutionCache::new(64);
/// cache.insert(&ImportRecord::new("colors.scss").with_source("$red: red;"));
///
/// let hit = cache.get("colors.scss").unwrap();
/// assert_eq!(hit.source(), Some("$red: red;"));
/// assert!(cache.get("other.scss").is_none());
///
/// cache.clear();
/// assert!(cache.get("colors.scss").is_none());
/// ```
pub struct ResolutionCache {
    capacity: usize,
    slots: CacheGuard<Box<[Slot]>>,
}

impl ResolutionCache {
    /// Creates a cache with exactly `capacity` slots.
    ///
    /// `capacity == 0` builds a disabled cache on which every operation is a
    /// no-op or a miss; see [`crate::ResolverCookie::has_cache`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| Slot::vacant()).collect();
        ResolutionCache {
            capacity,
            slots: CacheGuard::new(slots),
        }
    }

    /// Returns the fixed slot count chosen at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of occupied slots.
    ///
    /// Takes shared access for the duration of the count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .iter()
            .filter(|slot| slot.record.is_some())
            .count()
    }

    /// Returns true if no slot holds a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores a private clone of `record`, keyed by its specifier.
    ///
    /// Takes exclusive access. An empty specifier is silently ignored - it
    /// would be indistinguishable from the empty-slot state. Inserting a
    /// specifier that is already present updates that slot in place (crediting
    /// its usage score by [`USAGE_READ_CREDIT`]) rather than consuming a second
    /// slot. When the probe finds neither an empty slot nor the same
    /// specifier, the lowest-usage slot seen during the probe is evicted.
    pub fn insert(&self, record: &ImportRecord) {
        if self.capacity == 0 || record.specifier().is_empty() {
            return;
        }

        let mut slots = self.slots.write();
        match probe(&slots, record.specifier()) {
            Probe::Found(index) => {
                let slot = &mut slots[index];
                *slot.usage.get_mut() += USAGE_READ_CREDIT;
                slot.record = Some(record.clone());
            }
            Probe::Empty(index) => {
                let slot = &mut slots[index];
                *slot.usage.get_mut() = 0;
                slot.record = Some(record.clone());
            }
            Probe::Full { victim } => {
                let slot = &mut slots[victim];
                if let Some(evicted) = slot.record.take() {
                    log::trace!(
                        "evicting '{}' (usage {}) for '{}'",
                        evicted.specifier(),
                        *slot.usage.get_mut(),
                        record.specifier()
                    );
                }
                *slot.usage.get_mut() = 0;
                slot.record = Some(record.clone());
            }
        }
    }

    /// Looks up `specifier` and returns an independently owned clone of the
    /// stored record, or [`None`] on a miss.
    ///
    /// Takes shared access; any number of lookups may run concurrently. A hit
    /// credits the slot's usage score by [`USAGE_READ_CREDIT`]; every occupied
    /// slot stepped over on the way loses [`USAGE_STEP_OVER_COST`]. The probe
    /// stops at the first empty slot, since slots are only ever vacated in
    /// bulk by [`ResolutionCache::clear`].
    #[must_use]
    pub fn get(&self, specifier: &str) -> Option<ImportRecord> {
        if self.capacity == 0 {
            return None;
        }

        let slots = self.slots.read();
        match probe(&slots, specifier) {
            Probe::Found(index) => {
                let slot = &slots[index];
                slot.usage.fetch_add(USAGE_READ_CREDIT, Ordering::Relaxed);
                log::trace!("hit for '{specifier}'");
                slot.record.clone()
            }
            Probe::Empty(_) | Probe::Full { .. } => {
                log::trace!("miss for '{specifier}'");
                None
            }
        }
    }

    /// Releases every stored record and resets every slot to empty with a
    /// zero usage score.
    ///
    /// Takes exclusive access for the full sweep. The host is expected to call
    /// this at its own boundaries (for example the end of a build); the cache
    /// itself never expires anything.
    pub fn clear(&self) {
        if self.capacity == 0 {
            return;
        }

        let mut slots = self.slots.write();
        for slot in slots.iter_mut() {
            slot.record = None;
            *slot.usage.get_mut() = 0;
        }
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # importcache
//!
//! A fixed-capacity, thread-safe cache mapping import specifiers to previously
//! resolved import records. Built for bulk compilation pipelines where
//! resolution crosses an expensive runtime boundary: resolve a specifier once,
//! then serve every later occurrence from the cache instead of re-invoking the
//! resolver callback.
//!
//! ## Features
//!
//! - **Fixed footprint** - capacity chosen at construction, never resized
//! - **Usage-weighted eviction** - a signed usage heuristic decides which
//!   colliding entry a full probe overwrites
//! - **Reader/writer concurrency** - lookups overlap freely; inserts and
//!   clears take exclusive access
//! - **Clone-based ownership** - the cache only ever stores and hands out its
//!   own deep copies; absent record fields stay absent
//!
//! ## Quick Start
//!
//! ```rust
//! use importcache::{ImportRecord, ResolutionCache};
//!
//! let cache = ResolutionCache::new(256);
//!
//! cache.insert(
//!     &ImportRecord::new("colors.scss")
//!         .with_resolved_path("/project/colors.scss")
//!         .with_source("$red: #ff0000;"),
//! );
//!
//! let hit = cache.get("colors.scss").expect("just inserted");
//! assert_eq!(hit.resolved_path(), Some("/project/colors.scss"));
//! assert!(cache.get("missing.scss").is_none());
//! ```
//!
//! ## Fronting a resolver
//!
//! The [`bridge`] module defines the consumed resolver contract and
//! [`bridge::resolve_import`], which tries a cookie's cache before falling
//! back to the bridge:
//!
//! ```rust
//! use importcache::prelude::*;
//!
//! struct PassthroughResolver;
//!
//! impl ResolutionBridge for PassthroughResolver {
//!     fn resolve(&self, specifier: &str, _: Option<&str>, _: CallbackId) -> BridgeResult {
//!         BridgeResult {
//!             records: vec![ImportRecord::new(specifier).with_source("")],
//!             cacheable: true,
//!         }
//!     }
//! }
//!
//! let cookie = ResolverCookie::new(CallbackId::new(0), 256);
//! let records = resolve_import(
//!     &cookie,
//!     &PassthroughResolver,
//!     "colors.scss",
//!     None,
//!     ResolverMode::SpecifierPath,
//! )?;
//! assert_eq!(records.len(), 1);
//! # Ok::<(), importcache::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`record`] - the [`ImportRecord`] value type and its clone contract
//! - [`cache`] - the open-addressed slot array, probe loop, and eviction
//!   heuristic, behind a reader/writer guard
//! - [`cookie`] - [`ResolverCookie`], pairing an opaque [`CallbackId`] with an
//!   optional cache (capacity 0 disables caching)
//! - [`bridge`] - the consumed resolver contract and the miss-path glue
//! - [`Error`] and [`Result`] - error handling
//!
//! ## Error Handling
//!
//! Cache operations have no error path: an invalid insert is a silent no-op
//! and a miss is a plain [`None`]. The only recoverable error in the crate is
//! [`Error::ImportNotFound`] from the bridge glue. A platform-level failure of
//! the locking primitive is deliberately fatal - the process aborts rather
//! than continuing past a guard that can no longer be trusted.
//!
//! ## What this crate is not
//!
//! No TTL or expiry (hosts clear the cache at their own boundaries), no
//! persistence across runs, no cross-process coordination, and no dynamic
//! resizing.

pub(crate) mod error;

pub mod bridge;
pub mod cache;
pub mod cookie;
pub mod prelude;
pub mod record;

/// The error type for all fallible operations in this crate.
pub use error::Error;

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A resolved import and its clone contract.
///
/// # Example
///
/// ```rust
/// use importcache::ImportRecord;
/// let record = ImportRecord::new("a.scss").with_source("body {}");
/// assert_eq!(record.source_map(), None);
/// ```
pub use record::ImportRecord;

/// The fixed-capacity resolution cache.
///
/// # Example
///
/// ```rust
/// use importcache::{ImportRecord, ResolutionCache};
/// let cache = ResolutionCache::new(64);
/// cache.insert(&ImportRecord::new("a.scss"));
/// assert!(cache.get("a.scss").is_some());
/// ```
pub use cache::ResolutionCache;

/// Resolver registration: opaque callback handle plus optional cache.
pub use cookie::{CallbackId, ResolverCookie};

/// The consumed resolver-bridge contract and cache-fronted resolution.
pub use bridge::{resolve_import, BridgeResult, ResolutionBridge, ResolverMode};

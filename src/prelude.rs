//! # importcache Prelude
//!
//! Convenient re-exports of the types needed to front a resolver with a
//! cache. Import this module to get the whole consumed surface at once.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all importcache operations
pub use crate::Error;

/// The result type used throughout importcache
pub use crate::Result;

// ================================================================================================
// Records and Cache
// ================================================================================================

/// A resolved import record
pub use crate::record::ImportRecord;

/// The fixed-capacity resolution cache
pub use crate::cache::ResolutionCache;

/// Usage-heuristic constants governing eviction order
pub use crate::cache::{USAGE_READ_CREDIT, USAGE_STEP_OVER_COST};

// ================================================================================================
// Resolver Wiring
// ================================================================================================

/// Opaque resolver callback handle and its cookie
pub use crate::cookie::{CallbackId, ResolverCookie};

/// The consumed bridge contract and the cache-fronted miss path
pub use crate::bridge::{resolve_import, BridgeResult, ResolutionBridge, ResolverMode};

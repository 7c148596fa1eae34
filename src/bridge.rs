//! Consumed resolver-bridge contract and the cache-fronted miss path.
//!
//! The bridge is the expensive collaborator this crate exists to avoid: a
//! cross-runtime resolver callback looked up through an external registry by
//! [`CallbackId`]. This module defines only the contract the cache consumes,
//! plus [`resolve_import`], the glue that tries the cookie's cache first and
//! falls back to the bridge on a miss.
//!
//! # Contract
//!
//! When a bridge reports a result as cacheable, its record list contains
//! exactly one entry, and that entry is what gets cloned into the cache keyed
//! by the original specifier. The glue relies on this rather than validating
//! it: a violating empty list is tolerated (nothing is inserted), and entries
//! past the first are never inspected for caching purposes.

use crate::cookie::{CallbackId, ResolverCookie};
use crate::record::ImportRecord;
use crate::{Error, Result};

/// Which field of the previous import a bridge receives as resolution context.
///
/// Resolvers differ in whether they want to resolve relative to the previous
/// import's as-written specifier or to its resolved absolute path; the mode is
/// fixed per resolver registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolverMode {
    /// Pass the previous import's as-written specifier.
    SpecifierPath,
    /// Pass the previous import's resolved absolute path.
    AbsolutePath,
}

/// What a bridge invocation produced.
#[derive(Debug)]
pub struct BridgeResult {
    /// The resolved records, in the order the resolver produced them.
    pub records: Vec<ImportRecord>,
    /// True when the resolution is position-independent and may be cached.
    ///
    /// A resolver should only set this when the specifier resolves the same
    /// way regardless of which file imported it. When true, `records` holds
    /// exactly one entry (see module docs).
    pub cacheable: bool,
}

/// The cross-runtime resolver callback, as consumed by this crate.
///
/// Implementations own the registry that [`CallbackId`] indexes into; the
/// cache side never interprets the handle itself.
pub trait ResolutionBridge {
    /// Resolves `specifier` in the context of `previous_path`, dispatching to
    /// the callback identified by `callback`.
    fn resolve(
        &self,
        specifier: &str,
        previous_path: Option<&str>,
        callback: CallbackId,
    ) -> BridgeResult;
}

/// Resolves an import through the cookie's cache, invoking the bridge only on
/// a miss.
///
/// On a hit, returns a single-entry list holding an independently owned clone
/// of the cached record; the bridge is not invoked. On a miss, the bridge is
/// invoked once with the context field selected by `mode`; if it reports the
/// result cacheable, the first returned record is cloned into the cache keyed
/// by the original `specifier`.
///
/// # Errors
///
/// Returns [`Error::ImportNotFound`] when the bridge produces no records.
pub fn resolve_import<B: ResolutionBridge>(
    cookie: &ResolverCookie,
    bridge: &B,
    specifier: &str,
    previous: Option<&ImportRecord>,
    mode: ResolverMode,
) -> Result<Vec<ImportRecord>> {
    if let Some(cache) = cookie.cache() {
        if let Some(cached) = cache.get(specifier) {
            return Ok(vec![cached]);
        }
    }

    let previous_path = previous.and_then(|record| match mode {
        ResolverMode::SpecifierPath => Some(record.specifier()),
        ResolverMode::AbsolutePath => record.resolved_path(),
    });

    let result = bridge.resolve(specifier, previous_path, cookie.callback());

    if result.cacheable {
        if let (Some(cache), Some(resolved)) = (cookie.cache(), result.records.first()) {
            cache.insert(resolved);
        }
    }

    if result.records.is_empty() {
        return Err(Error::ImportNotFound(specifier.to_string()));
    }

    Ok(result.records)
}

//! Resolver cookie: the per-resolver bundle of callback handle and cache.
//!
//! A cookie associates one resolver registration with its optional
//! [`ResolutionCache`]. The callback handle is opaque here - it indexes into a
//! registry owned by the bridge collaborator, and the cache never interprets
//! or dereferences it.

use std::fmt;

use crate::cache::ResolutionCache;

/// Opaque handle identifying a resolver callback in the bridge's registry.
///
/// The cache side treats this as an uninterpreted token: it is minted by
/// whoever owns the callback registry, carried through the cookie, and handed
/// back to the bridge verbatim on every miss.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackId(pub usize);

impl CallbackId {
    /// Creates a handle from a raw registry index.
    #[must_use]
    pub fn new(index: usize) -> Self {
        CallbackId(index)
    }

    /// Returns the raw registry index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for CallbackId {
    fn from(index: usize) -> Self {
        CallbackId(index)
    }
}

impl fmt::Debug for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackId({})", self.0)
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bundles a resolver's [`CallbackId`] with its optional [`ResolutionCache`].
///
/// The cache is created exactly once, when the cookie is constructed, and is
/// released when the cookie is dropped. A requested capacity of 0 means the
/// resolver runs uncached; [`ResolverCookie::has_cache`] reports which case
/// this cookie is.
pub struct ResolverCookie {
    callback: CallbackId,
    cache: Option<ResolutionCache>,
}

impl ResolverCookie {
    /// Creates a cookie for `callback`, with a cache of `cache_capacity` slots
    /// when the capacity is greater than 0.
    #[must_use]
    pub fn new(callback: CallbackId, cache_capacity: usize) -> Self {
        log::debug!("creating resolver cookie for callback {callback} with cache capacity {cache_capacity}");

        let cache = if cache_capacity > 0 {
            Some(ResolutionCache::new(cache_capacity))
        } else {
            None
        };

        ResolverCookie { callback, cache }
    }

    /// Returns the opaque callback handle this cookie was registered with.
    #[must_use]
    pub fn callback(&self) -> CallbackId {
        self.callback
    }

    /// Returns true iff this cookie carries a cache with capacity greater
    /// than 0.
    #[must_use]
    pub fn has_cache(&self) -> bool {
        self.cache.as_ref().is_some_and(|c| c.capacity() > 0)
    }

    /// Returns the embedded cache, if caching is enabled for this resolver.
    #[must_use]
    pub fn cache(&self) -> Option<&ResolutionCache> {
        self.cache.as_ref()
    }
}

impl fmt::Debug for ResolverCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverCookie")
            .field("callback", &self.callback)
            .field("cache", &self.cache)
            .finish()
    }
}

//! Cache policy hints passed through to transports.

/// Advisory cache behavior for a single request.
///
/// Transports map these onto whatever their cache layer supports; a transport without a cache
/// may ignore the hint entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Follow the caching rules of the protocol (`Cache-Control`, validators).
    #[default]
    UseProtocolCachePolicy,
    /// Skip any locally cached response and load from the origin.
    ReloadIgnoringLocalCacheData,
    /// Skip local and intermediate caches.
    ReloadIgnoringLocalAndRemoteCacheData,
    /// Use cached data regardless of age, loading only on a miss.
    ReturnCacheDataElseLoad,
    /// Use cached data regardless of age and never load on a miss.
    ReturnCacheDataDontLoad,
    /// Revalidate cached data with the origin before using it.
    ReloadRevalidatingCacheData,
}

impl CachePolicy {
    /// Whether the policy allows a transport to answer from a local cache.
    pub fn allows_local_cache(self) -> bool {
        !matches!(
            self,
            Self::ReloadIgnoringLocalCacheData | Self::ReloadIgnoringLocalAndRemoteCacheData
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        assert_eq!(CachePolicy::default(), CachePolicy::UseProtocolCachePolicy);
        assert!(CachePolicy::default().allows_local_cache());
        assert!(!CachePolicy::ReloadIgnoringLocalCacheData.allows_local_cache());
    }
}

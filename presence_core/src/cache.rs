//! Caller-owned memoization of dimension resolution.
//!
//! Resolution is pure, so a cached result is valid as long as the rules it
//! was computed under are unchanged. Rules loaded from documents carry a
//! unique version and are keyed by it; built-in rules, which all share the
//! nil version, are keyed by their serialized content instead.

use presence_rules::{Context, DomainRules, EngineRules, RulesVersion};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::resolver::{resolve_dimension, ResolvedDimension};

/// Default number of entries before the cache is flushed.
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Fingerprint {
    Version(RulesVersion),
    Content(String),
    Absent,
}

impl Fingerprint {
    fn of<T: Serialize>(version: RulesVersion, rules: &T) -> Option<Self> {
        if version != RulesVersion::builtin() {
            return Some(Self::Version(version));
        }
        serde_json::to_string(rules).ok().map(Self::Content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    engine: Fingerprint,
    domain: Fingerprint,
    context: String,
}

/// Hit and miss counters since creation or the last `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoizes `resolve_dimension` for repeated identical inputs.
///
/// When full, the whole cache is dropped before the next insert.
#[derive(Debug, Clone)]
pub struct ResolutionCache {
    entries: HashMap<CacheKey, ResolvedDimension>,
    capacity: usize,
    stats: CacheStats,
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ResolutionCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Resolve through the cache.
    ///
    /// Inputs that cannot be fingerprinted are resolved directly and not
    /// stored.
    pub fn resolve(
        &mut self,
        context: &Context,
        engine: &EngineRules,
        domain: Option<&DomainRules>,
    ) -> ResolvedDimension {
        let Some(key) = Self::key(context, engine, domain) else {
            warn!("Could not fingerprint resolution inputs, bypassing cache");
            return resolve_dimension(context, engine, domain);
        };

        if let Some(hit) = self.entries.get(&key) {
            self.stats.hits += 1;
            debug!(entries = self.entries.len(), "Resolution cache hit");
            return *hit;
        }

        self.stats.misses += 1;
        let resolved = resolve_dimension(context, engine, domain);
        if self.entries.len() >= self.capacity {
            debug!(capacity = self.capacity, "Resolution cache full, flushing");
            self.entries.clear();
        }
        self.entries.insert(key, resolved);
        resolved
    }

    fn key(
        context: &Context,
        engine: &EngineRules,
        domain: Option<&DomainRules>,
    ) -> Option<CacheKey> {
        let engine = Fingerprint::of(engine.version, engine)?;
        let domain = match domain {
            Some(rules) => Fingerprint::of(rules.version, rules)?,
            None => Fingerprint::Absent,
        };
        let context = serde_json::to_string(&context.sanitized()).ok()?;
        Some(CacheKey {
            engine,
            domain,
            context,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presence_rules::{ContentMetrics, Permission};

    fn context(items: f64) -> Context {
        Context::at_depth(1)
            .with_permission(Permission::Write)
            .with_content(ContentMetrics {
                items,
                ..Default::default()
            })
    }

    #[test]
    fn test_hit_returns_same_value() {
        let mut cache = ResolutionCache::default();
        let engine = EngineRules::default();

        let first = cache.resolve(&context(20.0), &engine, None);
        let second = cache.resolve(&context(20.0), &engine, None);

        assert_eq!(first, second);
        assert_eq!(first, resolve_dimension(&context(20.0), &engine, None));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_contexts_miss() {
        let mut cache = ResolutionCache::default();
        let engine = EngineRules::default();

        cache.resolve(&context(1.0), &engine, None);
        cache.resolve(&context(50.0), &engine, None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_sanitized_contexts_share_entry() {
        let mut cache = ResolutionCache::default();
        let engine = EngineRules::default();

        cache.resolve(&context(-3.0), &engine, None);
        cache.resolve(&context(0.0), &engine, None);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_edited_builtin_rules_not_confused() {
        let mut cache = ResolutionCache::default();
        let engine = EngineRules::default();
        let tweaked = EngineRules {
            depth_falloff: 0.5,
            ..Default::default()
        };

        let a = cache.resolve(&context(1.0), &engine, None);
        let b = cache.resolve(&context(1.0), &tweaked, None);
        assert_eq!(cache.stats().misses, 2);
        assert!(b.scale < a.scale);
    }

    #[test]
    fn test_restamped_rules_miss() {
        let mut cache = ResolutionCache::default();
        let mut engine = EngineRules::default();
        engine.restamp();
        cache.resolve(&context(1.0), &engine, None);

        engine.restamp();
        cache.resolve(&context(1.0), &engine, None);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_domain_rules_are_part_of_key() {
        let mut cache = ResolutionCache::default();
        let engine = EngineRules::default();
        let domain = DomainRules {
            motion_by_activity: false,
            ..Default::default()
        };

        cache.resolve(&context(1.0), &engine, None);
        cache.resolve(&context(1.0), &engine, Some(&domain));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_flush_when_full() {
        let mut cache = ResolutionCache::new(2);
        let engine = EngineRules::default();

        cache.resolve(&context(1.0), &engine, None);
        cache.resolve(&context(2.0), &engine, None);
        cache.resolve(&context(3.0), &engine, None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}

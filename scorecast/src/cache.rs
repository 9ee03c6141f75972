//! Optional memoisation of predictions, keyed by the encoded valid quotations. The cache is owned
//! by the caller and lives only as long as its [`CachingPredictor`].

use std::collections::hash_map::Entry;
use std::ops::AddAssign;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::domain::normalise::normalise;
use crate::domain::{OddsEntry, RawOdds};
use crate::predict::{Prediction, Predictor};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    hits: usize,
    misses: usize,
}
impl CacheStats {
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Proportion of lookups served from the cache; zero before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

impl AddAssign<bool> for CacheStats {
    fn add_assign(&mut self, cache_hit: bool) {
        if cache_hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}

type Bytes = Vec<u8>;

#[derive(Debug, Default)]
pub struct CachingPredictor {
    predictor: Predictor,
    cache: FxHashMap<Bytes, Prediction>,
    stats: CacheStats,
}
impl CachingPredictor {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor,
            cache: FxHashMap::default(),
            stats: CacheStats::default(),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Predicts from the raw quotations, reusing an earlier prediction made from the same valid
    /// entries.
    pub fn predict(&mut self, raw: &[RawOdds]) -> Prediction {
        let entries = normalise(raw);
        self.predict_entries(&entries)
    }

    pub fn predict_entries(&mut self, entries: &[OddsEntry]) -> Prediction {
        let key = match bincode::encode_to_vec(entries, bincode::config::standard()) {
            Ok(key) => key,
            Err(err) => {
                debug!("uncacheable entries: {err}");
                return self.predictor.predict_entries(entries);
            }
        };
        let (prediction, cache_hit) = match self.cache.entry(key) {
            Entry::Occupied(entry) => (entry.into_mut(), true),
            Entry::Vacant(entry) => (entry.insert(self.predictor.predict_entries(entries)), false),
        };
        trace!("cache hit: {cache_hit}");
        self.stats += cache_hit;
        prediction.clone()
    }
}

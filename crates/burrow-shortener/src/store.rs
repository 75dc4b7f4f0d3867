use crate::settings::StoreSettings;
use async_trait::async_trait;
use burrow_core::{
    Clock, DurableStore, InitError, ShortCode, ShortenParams, Shortener, StoreError, SystemClock,
    UrlRecord,
};
use burrow_generator::Generator;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, StoreError>;
type Cache = HashMap<ShortCode, UrlRecord>;

/// The URL store.
///
/// Holds every record ever created (active or expired) in memory, keyed by
/// short code, and mirrors each mutation to the durable store:
///
/// - `create` and `delete` take the write lock for their whole sequence,
///   including the durable write, and touch the cache only after the durable
///   write succeeded.
/// - `get` and `list` take the read lock and evaluate expiry against the
///   injected [`Clock`]. Expired records are rejected, never evicted.
pub struct UrlStore<D, G, C = SystemClock> {
    durable: D,
    generator: G,
    clock: C,
    settings: StoreSettings,
    cache: RwLock<Cache>,
}

impl<D: DurableStore, G: Generator> UrlStore<D, G> {
    /// Loads the cache from `durable` using the system clock and default settings.
    pub async fn initialize(durable: D, generator: G) -> std::result::Result<Self, InitError> {
        Self::initialize_with(durable, generator, SystemClock, StoreSettings::default()).await
    }
}

impl<D: DurableStore, G: Generator, C: Clock> UrlStore<D, G, C> {
    /// Loads the cache by draining `durable.scan_all()`.
    ///
    /// Fails with [`InitError`] if the scan fails; a store is never built
    /// around a partial cache.
    pub async fn initialize_with(
        durable: D,
        generator: G,
        clock: C,
        settings: StoreSettings,
    ) -> std::result::Result<Self, InitError> {
        let records = durable.scan_all().await.map_err(InitError::CacheLoad)?;
        let cache: Cache = records
            .into_iter()
            .map(|record| (record.code.clone(), record))
            .collect();
        debug!(records = cache.len(), "url cache loaded");

        Ok(Self {
            durable,
            generator,
            clock,
            settings,
            cache: RwLock::new(cache),
        })
    }

    /// Number of cached records, expired ones included.
    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }

    /// Draws candidates until one is not in `cache`.
    ///
    /// The cache holds every issued code, expired or not, so a free code here
    /// has never been handed out.
    fn next_free_code(&self, cache: &Cache) -> Result<ShortCode> {
        let max_attempts = self.settings.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let candidate = self.generator.generate();
            if !cache.contains_key(&candidate) {
                return Ok(candidate);
            }
            debug!(code = %candidate, attempt, "generated short code is already taken");
        }

        Err(StoreError::Exhausted {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl<D: DurableStore, G: Generator, C: Clock> Shortener for UrlStore<D, G, C> {
    async fn create(&self, params: ShortenParams) -> Result<ShortCode> {
        let mut cache = self.cache.write().await;

        let code = self.next_free_code(&cache)?;
        let created_at = self.clock.now();
        let expires_at = params.expiration.expires_at(created_at)?;

        let record = UrlRecord {
            code: code.clone(),
            target_url: params.target_url,
            title: params.title,
            created_at,
            expires_at,
        };

        self.durable.insert(&record).await?;
        cache.insert(code.clone(), record);

        trace!(code = %code, "short url created");
        Ok(code)
    }

    async fn get(&self, code: &ShortCode) -> Result<UrlRecord> {
        let cache = self.cache.read().await;

        let Some(record) = cache.get(code) else {
            trace!(code = %code, "short code not found");
            return Err(StoreError::NotFound(code.to_string()));
        };

        if !record.is_active_at(self.clock.now()) {
            trace!(code = %code, "short code has expired");
            return Err(StoreError::Expired(code.to_string()));
        }

        Ok(record.clone())
    }

    async fn list(&self) -> Result<Vec<UrlRecord>> {
        let cache = self.cache.read().await;
        let now = self.clock.now();

        let mut records: Vec<UrlRecord> = cache
            .values()
            .filter(|record| record.is_active_at(now))
            .cloned()
            .collect();
        // newest first; codes break ties between records created in the same instant
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });

        Ok(records)
    }

    /// Removes the record from storage and cache. The code leaves the cache,
    /// so the generator may hand it out again later.
    async fn delete(&self, code: &ShortCode) -> Result<()> {
        let mut cache = self.cache.write().await;

        if !cache.contains_key(code) {
            return Err(StoreError::NotFound(code.to_string()));
        }

        self.durable.remove(code).await?;
        cache.remove(code);

        trace!(code = %code, "short url deleted");
        Ok(())
    }
}

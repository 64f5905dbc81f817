//! In-memory implementation of the short URL store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{CreateShortUrlParams, ShortUrl};
use crate::domain::repositories::{ShortUrlStore, StoreResult, ensure_destination};
use crate::domain::slug::{InsertOutcome, SlugAllocator};

/// Short URL store backed by a sharded concurrent map.
///
/// `DashMap::entry` keeps the shard locked between the vacancy check and the
/// insert, so two concurrent creations can never claim the same slug.
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryShortUrlStore {
    records: DashMap<String, ShortUrl>,
    allocator: SlugAllocator,
}

impl InMemoryShortUrlStore {
    /// Creates an empty store with the default slug policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with a custom slug policy.
    pub fn with_allocator(allocator: SlugAllocator) -> Self {
        Self {
            records: DashMap::new(),
            allocator,
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn try_insert(&self, slug: String, destination: &str) -> InsertOutcome {
        match self.records.entry(slug) {
            Entry::Occupied(_) => InsertOutcome::SlugTaken,
            Entry::Vacant(vacant) => {
                let short_url =
                    ShortUrl::new(vacant.key().clone(), destination.to_string(), Utc::now());
                vacant.insert(short_url.clone());
                InsertOutcome::Inserted(short_url)
            }
        }
    }
}

#[async_trait]
impl ShortUrlStore for InMemoryShortUrlStore {
    async fn create_short_url(&self, params: CreateShortUrlParams) -> StoreResult<ShortUrl> {
        ensure_destination(&params)?;
        let destination = params.destination.trim();

        self.allocator
            .allocate(|slug| std::future::ready(Ok(self.try_insert(slug, destination))))
            .await
    }

    async fn get_short_url_by_slug(&self, slug: &str) -> StoreResult<Option<ShortUrl>> {
        Ok(self.records.get(slug).map(|entry| entry.value().clone()))
    }
}

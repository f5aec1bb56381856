use std::time::Instant;

use async_trait::async_trait;
use dns_lib::{
    interface::cache::main_cache::{AsyncMainCache, MainCache},
    query::question::Question,
    resource_record::resource_record::ResourceRecord,
};
use tokio::sync::RwLock;

use crate::synchronous::main_cache::MainQuestionCache;

/// A [`MainQuestionCache`] behind a reader-writer lock.
///
/// Lookups share the read lock. The write lock is only taken to insert, or to evict an entry that
/// was found to be expired.
#[derive(Default, Debug)]
pub struct AsyncMainQuestionCache {
    cache: RwLock<MainQuestionCache>,
}

impl AsyncMainQuestionCache {
    #[inline]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(MainQuestionCache::new()),
        }
    }

    #[inline]
    pub async fn contains(&self, question: &Question) -> bool {
        self.cache.read().await.contains(question)
    }
}

#[async_trait]
impl AsyncMainCache for AsyncMainQuestionCache {
    async fn get_at(&self, question: &Question, now: Instant) -> Option<ResourceRecord> {
        let read_cache = self.cache.read().await;
        match read_cache.peek(question) {
            Some(record) if !record.is_expired_at(now) => return Some(record.clone()),
            Some(_) => (),
            None => return None,
        }
        drop(read_cache);

        // Another task may have replaced the entry between the locks, so the lookup is repeated
        // under the write lock.
        self.cache.write().await.get_at(question, now)
    }

    async fn insert_at(&self, question: Question, record: ResourceRecord, now: Instant) {
        self.cache.write().await.insert_at(question, record, now);
    }

    async fn len(&self) -> usize {
        self.cache.read().await.len()
    }
}

use std::time::Instant;

use async_trait::async_trait;

use crate::{query::question::Question, resource_record::resource_record::ResourceRecord};

/// A question-keyed record cache.
///
/// Entries are only ever removed lazily: a lookup that finds an expired entry removes it and
/// reports a miss.
pub trait MainCache {
    /// The record cached for `question`, if one exists and is still fresh at `now`.
    fn get_at(&mut self, question: &Question, now: Instant) -> Option<ResourceRecord>;

    /// Caches `record` for `question`. A fresh entry that already exists is kept; an entry that
    /// has expired by `now` is replaced.
    fn insert_at(&mut self, question: Question, record: ResourceRecord, now: Instant);

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn get(&mut self, question: &Question) -> Option<ResourceRecord> {
        self.get_at(question, Instant::now())
    }

    #[inline]
    fn insert_record(&mut self, question: Question, record: ResourceRecord) {
        self.insert_at(question, record, Instant::now())
    }
}

/// A [`MainCache`] that can be shared between tasks.
#[async_trait]
pub trait AsyncMainCache {
    async fn get_at(&self, question: &Question, now: Instant) -> Option<ResourceRecord>;
    async fn insert_at(&self, question: Question, record: ResourceRecord, now: Instant);
    async fn len(&self) -> usize;

    #[inline]
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    #[inline]
    async fn get(&self, question: &Question) -> Option<ResourceRecord> {
        self.get_at(question, Instant::now()).await
    }

    #[inline]
    async fn insert_record(&self, question: Question, record: ResourceRecord) {
        self.insert_at(question, record, Instant::now()).await
    }
}

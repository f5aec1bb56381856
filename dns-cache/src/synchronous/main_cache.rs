use std::{collections::{hash_map::Entry, HashMap}, time::Instant};

use dns_lib::{
    interface::cache::main_cache::MainCache,
    query::question::Question,
    resource_record::resource_record::ResourceRecord,
};

/// Maps each question to the single record learned for it.
#[derive(Default, Debug)]
pub struct MainQuestionCache {
    cache: HashMap<Question, ResourceRecord>,
}

impl MainQuestionCache {
    #[inline]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// The stored entry for `question` whether or not it has expired. Does not evict.
    #[inline]
    pub fn peek(&self, question: &Question) -> Option<&ResourceRecord> {
        self.cache.get(question)
    }

    #[inline]
    pub fn contains(&self, question: &Question) -> bool {
        self.cache.contains_key(question)
    }
}

impl MainCache for MainQuestionCache {
    fn get_at(&mut self, question: &Question, now: Instant) -> Option<ResourceRecord> {
        let record = self.cache.get(question)?;
        if !record.is_expired_at(now) {
            return Some(record.clone());
        }

        self.cache.remove(question);
        None
    }

    fn insert_at(&mut self, question: Question, record: ResourceRecord, now: Instant) {
        match self.cache.entry(question) {
            Entry::Occupied(mut entry) => {
                // A live entry wins over the new record. Only a stale one is replaced.
                if entry.get().is_expired_at(now) {
                    entry.insert(record);
                }
            },
            Entry::Vacant(entry) => {
                entry.insert(record);
            },
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.cache.len()
    }
}

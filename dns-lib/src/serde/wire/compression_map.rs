use std::collections::HashMap;

use crate::types::label::Label;

/// Offsets of the names written so far during a single encode.
///
/// Keys are label sequences, so every suffix of a written name can be found. Lookups are exact:
/// no case folding is performed.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CompressionMap {
    map: HashMap<Vec<Label>, u16>,
}

impl CompressionMap {
    /// The largest offset a 14-bit compression pointer can hold.
    pub const MAX_OFFSET: usize = 0b0011_1111_1111_1111;

    #[inline]
    pub fn new() -> CompressionMap {
        Self { map: HashMap::new() }
    }

    /// Records `labels` at `offset`. The first offset recorded for a sequence is kept, and offsets
    /// that do not fit in a pointer are ignored.
    #[inline]
    pub fn insert_slice_labels(&mut self, labels: &[Label], offset: usize) {
        if offset > Self::MAX_OFFSET {
            return;
        }
        self.map.entry(labels.to_vec()).or_insert(offset as u16);
    }

    #[inline]
    pub fn find_from_slice_labels(&self, labels: &[Label]) -> Option<u16> {
        self.map.get(labels).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

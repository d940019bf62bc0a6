//! Retarget window lookup
//!
//! This module walks back through the header chain to find the first
//! header of a retarget window.

use log::info;
use retarget_core::{DifficultyError, DifficultyResult, HeaderLookup, HeaderRef, NetworkProfile};
use std::time::{Duration, Instant};

/// Traversals slower than this are logged.
const SLOW_TRAVERSAL: Duration = Duration::from_millis(50);

/// Follows predecessor links through a [`HeaderLookup`].
pub struct ChainCursor<'a, L: HeaderLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: HeaderLookup + ?Sized> ChainCursor<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// Resolves the predecessor of `header`.
    pub fn predecessor(&self, header: &HeaderRef) -> DifficultyResult<HeaderRef> {
        self.lookup.get_header(&header.prev_hash).ok_or(DifficultyError::ChainTooShort {
            from_height: header.height,
            steps: 1,
            walked: 0,
            missing: header.prev_hash,
        })
    }

    /// Returns the header `steps` predecessor links behind `start`.
    pub fn walk_back(&self, start: &HeaderRef, steps: u64) -> DifficultyResult<HeaderRef> {
        let mut cursor = *start;
        for walked in 0..steps {
            cursor = self.lookup.get_header(&cursor.prev_hash).ok_or(DifficultyError::ChainTooShort {
                from_height: start.height,
                steps,
                walked,
                missing: cursor.prev_hash,
            })?;
        }
        Ok(cursor)
    }
}

/// Walks `steps` predecessor links back from `start`.
pub fn walk_back<L: HeaderLookup + ?Sized>(start: &HeaderRef, steps: u64, lookup: &L) -> DifficultyResult<HeaderRef> {
    ChainCursor::new(lookup).walk_back(start, steps)
}

/// First and last header of a retarget window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetargetWindow {
    /// Header the window is measured from
    pub first: HeaderRef,
    /// Predecessor of the block being validated
    pub last: HeaderRef,
}

impl RetargetWindow {
    pub fn new(first: HeaderRef, last: HeaderRef) -> Self {
        Self { first, last }
    }

    /// Resolves the window ending at `last`.
    pub fn fetch<L: HeaderLookup + ?Sized>(
        last: &HeaderRef,
        profile: &NetworkProfile,
        lookup: &L,
    ) -> DifficultyResult<Self> {
        let steps = profile.blocks_to_go_back(last.height);

        let started = Instant::now();
        let first = walk_back(last, steps, lookup)?;
        let elapsed = started.elapsed();
        if elapsed > SLOW_TRAVERSAL {
            info!("Difficulty transition traversal took {:?}", elapsed);
        }

        Ok(Self::new(first, *last))
    }

    /// Seconds between the two window ends. Negative when timestamps went
    /// backwards.
    pub fn timespan(&self) -> i64 {
        self.last.timestamp as i64 - self.first.timestamp as i64
    }
}

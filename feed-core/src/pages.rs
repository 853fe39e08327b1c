//! Remote page counter and cache scan position.
//!
//! Tracks two independent walks: the 1-based page number handed to the
//! remote API, and the resume position of a forward scan over the local
//! cache. Both rewind together when a refresh settles.

use feed_types::{PageNumber, ScanCursor};

/// Pagination bookkeeping for one reader.
///
/// The page counter advances *before* a fetch is issued, so a failed
/// fetch still consumes its page number; a retry continues with the page
/// after the one that failed rather than re-requesting it.
#[derive(Debug, Clone)]
pub struct PageTracker {
    current: PageNumber,
    scan: Option<ScanCursor>,
}

impl PageTracker {
    /// Create a tracker positioned at the first page with no scan started.
    pub fn new() -> Self {
        Self {
            current: PageNumber::FIRST,
            scan: None,
        }
    }

    /// The page most recently handed out.
    pub fn current(&self) -> PageNumber {
        self.current
    }

    /// Advance to the next page and return it.
    pub fn advance(&mut self) -> PageNumber {
        self.current = self.current.next();
        self.current
    }

    /// Rewind to the first page and forget the cache scan position.
    pub fn reset(&mut self) {
        self.current = PageNumber::FIRST;
        self.scan = None;
    }

    /// Where the cache scan left off, if one is underway.
    pub fn scan_position(&self) -> Option<ScanCursor> {
        self.scan
    }

    /// Record where a cache scan stopped so the next read resumes after it.
    pub fn mark_scanned(&mut self, cursor: ScanCursor) {
        self.scan = Some(cursor);
    }
}

impl Default for PageTracker {
    fn default() -> Self {
        Self::new()
    }
}

use std::num::NonZeroUsize;
use std::slice;

use crate::workflow::{DisplayRecord, Matcher, PrefixMatcher};

pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(capacity) => capacity,
    None => unreachable!(),
};
pub const DEFAULT_TITLE: &str = "No matches found...";

/// Bounded, insertion-ordered list of records for one plugin invocation.
///
/// Until the first record is added the set holds a single placeholder row.
/// The first record replaces that row in place, every later one is appended.
pub struct ResultSet {
    capacity: NonZeroUsize,
    contents: Contents,
}

enum Contents {
    /// Nothing added yet.
    Placeholder(DisplayRecord),

    /// At least one record added, never more than `capacity`.
    Records(Vec<DisplayRecord>),
}

impl ResultSet {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        let placeholder = DisplayRecord {
            uid: "default".into(),
            title: DEFAULT_TITLE.into(),
            valid: false,
            ..Default::default()
        };

        Self {
            capacity,
            contents: Contents::Placeholder(placeholder),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of records added by callers. The placeholder does not count.
    pub fn count(&self) -> usize {
        match &self.contents {
            Contents::Placeholder(_) => 0,
            Contents::Records(records) => records.len(),
        }
    }

    /// The rows to render, in insertion order. Never empty.
    pub fn records(&self) -> &[DisplayRecord] {
        match &self.contents {
            Contents::Placeholder(placeholder) => slice::from_ref(placeholder),
            Contents::Records(records) => records,
        }
    }

    /// Adds a record, silently dropping it once the set is full.
    pub fn add(&mut self, record: DisplayRecord) {
        if self.count() >= self.capacity() {
            return;
        }

        match &mut self.contents {
            Contents::Placeholder(_) => self.contents = Contents::Records(vec![record]),
            Contents::Records(records) => records.push(record),
        }
    }

    /// Adds the record only if its title starts with `query`, see [`PrefixMatcher`].
    pub fn add_if_matches(&mut self, query: &str, record: DisplayRecord) {
        self.add_matching(&PrefixMatcher::default(), query, record)
    }

    pub fn add_matching(&mut self, matcher: &dyn Matcher, query: &str, record: DisplayRecord) {
        if matcher.matches(query, &record.title) {
            self.add(record);
        }
    }

    /// Replaces the placeholder's title. Has no effect once a record was added.
    pub fn set_default_title(&mut self, title: impl Into<String>) {
        if let Contents::Placeholder(placeholder) = &mut self.contents {
            placeholder.title = title.into();
        }
    }
}

impl Default for ResultSet {
    fn default() -> Self {
        Self::new()
    }
}

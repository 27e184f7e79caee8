pub use environment::*;
pub use feedback::*;
pub use matchers::*;
pub use providers::*;
pub use results::*;

mod environment;
mod feedback;
mod matchers;
mod providers;
mod results;

/// A single row of the feedback document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayRecord {
    /// Should be unique within a result set, but nothing enforces it.
    pub uid: String,

    /// Passed back to the host when the row is actioned.
    pub arg: String,

    /// Primary label, also the target of query filtering.
    pub title: String,

    pub subtitle: String,
    pub icon: String,

    /// Whether the host may action this row. Rendered as `yes` / `no`.
    pub valid: bool,

    /// Substituted into the host's query box on tab completion.
    pub autocomplete: String,

    /// Host-specific rendering hint, passed through untouched.
    pub kind: String,
}

/// A raw search hit, before it is turned into a [`DisplayRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub summary: String,
}

pub trait Matcher {
    /// Returns true if a record with the given title should be shown for `query`.
    fn matches(&self, query: &str, title: &str) -> bool;
}

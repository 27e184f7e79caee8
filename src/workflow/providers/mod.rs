use std::error::Error;

pub use package_index::{PackageIndex, DEFAULT_ENDPOINT};

use crate::workflow::Candidate;

mod package_index;

pub trait Provider {
    fn title(&self) -> String {
        "Unknown".into()
    }

    /// Runs the query against the source and returns its candidates in source order.
    fn search(&self, query: &str) -> Result<Vec<Candidate>, Box<dyn Error + Send + Sync>>;
}

/// Runs the query, reducing any failure of the provider to an empty result.
pub fn search_or_empty(provider: &dyn Provider, query: &str) -> Vec<Candidate> {
    match provider.search(query) {
        Ok(candidates) => {
            log::debug!("{} returned {} candidates", provider.title(), candidates.len());
            candidates
        }

        Err(err) => {
            log::warn!("{} search for {:?} failed: {}", provider.title(), query, err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Provider for Failing {
        fn search(&self, _query: &str) -> Result<Vec<Candidate>, Box<dyn Error + Send + Sync>> {
            Err("boom".into())
        }
    }

    struct Fixed(Vec<Candidate>);

    impl Provider for Fixed {
        fn search(&self, _query: &str) -> Result<Vec<Candidate>, Box<dyn Error + Send + Sync>> {
            Ok(self.0.clone())
        }
    }

    /// Providers may hold non thread-safe state.
    struct Counting(std::rc::Rc<std::cell::Cell<usize>>);

    impl Provider for Counting {
        fn search(&self, _query: &str) -> Result<Vec<Candidate>, Box<dyn Error + Send + Sync>> {
            self.0.set(self.0.get() + 1);
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_single_threaded_provider() {
        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let provider = Counting(calls.clone());

        assert!(search_or_empty(&provider, "vapor").is_empty());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failure_is_empty() {
        assert!(search_or_empty(&Failing, "vapor").is_empty());
    }

    #[test]
    fn test_success_is_passed_through() {
        let candidate = Candidate {
            url: "https://github.com/vapor/vapor".into(),
            summary: "A server-side Swift web framework.".into(),
        };

        let provider = Fixed(vec![candidate.clone()]);

        assert_eq!(search_or_empty(&provider, "vapor"), vec![candidate]);
    }
}

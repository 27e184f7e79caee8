use std::error::Error;
use std::time::Duration;

use serde::Deserialize;

use crate::workflow::{Candidate, Provider};

pub const DEFAULT_ENDPOINT: &str = "https://swiftpackageindex.com";

/// Searches the Swift Package Index.
pub struct PackageIndex {
    endpoint: String,
    agent: ureq::Agent,
}

impl PackageIndex {
    pub fn new_with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Provider for PackageIndex {
    fn title(&self) -> String {
        "Swift Package Index".into()
    }

    fn search(&self, query: &str) -> Result<Vec<Candidate>, Box<dyn Error + Send + Sync>> {
        let url = format!("{}/api/search", self.endpoint.trim_end_matches('/'));

        let response: Response = self.agent.get(&url).query("query", query).call()?.into_json()?;

        if response.has_more_results {
            log::debug!("more results available than the first page");
        }

        Ok(response.results.into_iter().map(Into::into).collect())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    #[serde(default)]
    has_more_results: bool,
    results: Vec<Package>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Package {
    #[serde(rename = "packageURL")]
    package_url: String,
    #[serde(default)]
    summary: String,
}

impl From<Package> for Candidate {
    fn from(package: Package) -> Self {
        Candidate {
            url: package.package_url,
            summary: package.summary,
        }
    }
}

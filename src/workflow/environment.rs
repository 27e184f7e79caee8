use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

const CACHE_ROOT: &str = "Library/Caches/com.runningwithcrayons.Alfred-2/Workflow Data";
const DATA_ROOT: &str = "Library/Application Support/Alfred 2/Workflow Data";

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("could not determine the workflow directory")]
    WorkflowDir(#[source] io::Error),

    #[error("failed to read {}", path.display())]
    ReadPlist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}", path.display())]
    ParsePlist {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("no bundleid found in {}", path.display())]
    MissingBundleId { path: PathBuf },

    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Values that take precedence over what would otherwise be derived.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub bundle_id: Option<String>,
    pub cache: Option<PathBuf>,
    pub data: Option<PathBuf>,
}

/// Identity and on-disk locations of the running workflow.
///
/// Resolved once at startup. Both the cache and the data directory exist
/// once resolution succeeded.
#[derive(Clone, Debug)]
pub struct Workflow {
    bundle_id: String,
    cache: PathBuf,
    data: PathBuf,
    path: PathBuf,
    home: PathBuf,
}

impl Workflow {
    /// Resolves the workflow from the user's home and the current directory.
    pub fn from_env(overrides: Overrides) -> Result<Self, EnvironmentError> {
        let home = dirs::home_dir().ok_or(EnvironmentError::NoHomeDir)?;
        let path = std::env::current_dir().map_err(EnvironmentError::WorkflowDir)?;
        Self::resolve(home, path, overrides)
    }

    pub fn resolve(
        home: PathBuf,
        path: PathBuf,
        overrides: Overrides,
    ) -> Result<Self, EnvironmentError> {
        let bundle_id = match overrides.bundle_id {
            Some(bundle_id) => bundle_id,
            None => read_bundle_id(&path.join("info.plist"))?,
        };

        let cache = overrides
            .cache
            .unwrap_or_else(|| home.join(CACHE_ROOT).join(&bundle_id));

        let data = overrides
            .data
            .unwrap_or_else(|| home.join(DATA_ROOT).join(&bundle_id));

        ensure_dir(&cache)?;
        ensure_dir(&data)?;

        Ok(Self {
            bundle_id,
            cache,
            data,
            path,
            home,
        })
    }

    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }

    pub fn cache(&self) -> &Path {
        &self.cache
    }

    pub fn data(&self) -> &Path {
        &self.data
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}

fn ensure_dir(path: &Path) -> Result<(), EnvironmentError> {
    fs::create_dir_all(path).map_err(|source| EnvironmentError::CreateDir {
        path: path.to_owned(),
        source,
    })
}

fn read_bundle_id(path: &Path) -> Result<String, EnvironmentError> {
    let content = fs::read_to_string(path).map_err(|source| EnvironmentError::ReadPlist {
        path: path.to_owned(),
        source,
    })?;

    let bundle_id = plist_string(&content, "bundleid").map_err(|source| {
        EnvironmentError::ParsePlist {
            path: path.to_owned(),
            source,
        }
    })?;

    bundle_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| EnvironmentError::MissingBundleId {
            path: path.to_owned(),
        })
}

enum Reading {
    Nothing,
    Key,
    String,
}

/// Looks up a string value in the top level dictionary of an XML property list.
fn plist_string(xml: &str, wanted: &str) -> Result<Option<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut depth = 0usize;
    let mut reading = Reading::Nothing;
    let mut last_key: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(tag) => {
                let name = tag.name();
                let name = name.as_ref();

                if depth == 1 {
                    reading = match name {
                        b"key" => Reading::Key,
                        b"string" => Reading::String,
                        _ => Reading::Nothing,
                    };

                    // a nested value ends the key's scope
                    if !matches!(reading, Reading::String) {
                        last_key = None;
                    }
                }

                if name == b"dict" {
                    depth += 1;
                }
            }

            Event::Text(text) => match reading {
                Reading::Key => last_key = Some(text.unescape()?.into_owned()),
                Reading::String if last_key.as_deref() == Some(wanted) => {
                    return Ok(Some(text.unescape()?.into_owned()));
                }
                _ => (),
            },

            Event::End(tag) => {
                if tag.name().as_ref() == b"dict" {
                    depth = depth.saturating_sub(1);
                }

                if depth == 1 && tag.name().as_ref() == b"string" {
                    last_key = None;
                }

                reading = Reading::Nothing;
            }

            Event::Empty(_) if depth == 1 => last_key = None,

            Event::Eof => return Ok(None),

            _ => (),
        }
    }
}

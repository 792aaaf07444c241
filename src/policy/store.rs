//! File-backed policy storage at `<root>/<locale>/hazardousGoodsPolicy.json`.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::document::PolicyDocument;
use crate::locale::LocaleTag;

pub const POLICY_FILE_NAME: &str = "hazardousGoodsPolicy.json";

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("no policy document for locale '{locale}' at {}", .path.display())]
    NotFound { locale: LocaleTag, path: PathBuf },
    #[error("failed to read policy document {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed policy document {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of localized policy documents.
pub trait PolicyStore: Send + Sync {
    fn load(&self, locale: LocaleTag) -> Result<PolicyDocument, PolicyError>;
}

/// Reads documents from a content root on every call.
#[derive(Debug, Clone)]
pub struct FsPolicyStore {
    root: PathBuf,
}

impl FsPolicyStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn document_path(&self, locale: LocaleTag) -> PathBuf {
        self.root.join(locale.as_str()).join(POLICY_FILE_NAME)
    }

    /// Locales from `catalog` that have no document file.
    pub fn missing_locales(&self, catalog: &[LocaleTag]) -> Vec<LocaleTag> {
        catalog
            .iter()
            .copied()
            .filter(|locale| !self.document_path(*locale).is_file())
            .collect()
    }
}

impl PolicyStore for FsPolicyStore {
    fn load(&self, locale: LocaleTag) -> Result<PolicyDocument, PolicyError> {
        let path = self.document_path(locale);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PolicyError::NotFound { locale, path })
            }
            Err(source) => return Err(PolicyError::Io { path, source }),
        };
        serde_json::from_slice(&data).map_err(|source| PolicyError::Malformed { path, source })
    }
}

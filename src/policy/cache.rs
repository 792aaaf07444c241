//! In-memory cache over a policy store.
//!
//! Documents are immutable for the life of a deployment, so successful loads
//! are kept forever. Failures are never cached.

use std::collections::HashMap;
use std::sync::RwLock;

use super::document::PolicyDocument;
use super::store::{PolicyError, PolicyStore};
use crate::locale::LocaleTag;

pub struct CachedPolicyStore<S> {
    inner: S,
    documents: RwLock<HashMap<LocaleTag, PolicyDocument>>,
}

impl<S: PolicyStore> CachedPolicyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.documents.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: PolicyStore> PolicyStore for CachedPolicyStore<S> {
    fn load(&self, locale: LocaleTag) -> Result<PolicyDocument, PolicyError> {
        // Poisoned locks fall through to the inner store.
        if let Some(doc) = self
            .documents
            .read()
            .ok()
            .and_then(|m| m.get(&locale).cloned())
        {
            return Ok(doc);
        }

        let doc = self.inner.load(locale)?;
        if let Ok(mut m) = self.documents.write() {
            m.insert(locale, doc.clone());
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::store::{FsPolicyStore, POLICY_FILE_NAME};
    use std::fs;
    use tempfile::TempDir;

    const DOC: &str = r#"{"Code":"US","Alert":"a","Title":"t","Body":["x","y"]}"#;

    fn doc_path(dir: &TempDir) -> std::path::PathBuf {
        let locale_dir = dir.path().join("en-US");
        fs::create_dir_all(&locale_dir).unwrap();
        locale_dir.join(POLICY_FILE_NAME)
    }

    #[test]
    fn test_hit_survives_file_removal() {
        let dir = TempDir::new().unwrap();
        let path = doc_path(&dir);
        fs::write(&path, DOC).unwrap();

        let cache = CachedPolicyStore::new(FsPolicyStore::new(dir.path()));
        let first = cache.load(LocaleTag::DEFAULT).unwrap();
        fs::remove_file(&path).unwrap();
        let second = cache.load(LocaleTag::DEFAULT).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failures_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = doc_path(&dir);

        let cache = CachedPolicyStore::new(FsPolicyStore::new(dir.path()));
        assert!(cache.load(LocaleTag::DEFAULT).is_err());
        assert!(cache.is_empty());

        fs::write(&path, DOC).unwrap();
        assert_eq!(cache.load(LocaleTag::DEFAULT).unwrap().code, "US");
    }
}

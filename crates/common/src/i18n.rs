//! Translation catalog keyed by the literal English message.
//!
//! Catalogs are flat JSON objects stored as `{lang_dir}/{locale}.json`.
//! Unknown keys fall back to the key itself, so English needs no catalog.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("invalid catalog {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
}

#[derive(Debug, Clone, Default)]
pub struct Translator {
    locale: String,
    catalog: HashMap<String, String>,
}

impl Translator {
    /// Translator that returns every key unchanged.
    pub fn identity() -> Self {
        Self { locale: "en".into(), catalog: HashMap::new() }
    }

    pub fn from_json_str(locale: &str, json: &str) -> Result<Self, serde_json::Error> {
        let catalog: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { locale: locale.to_string(), catalog })
    }

    /// Load `{lang_dir}/{locale}.json`. A missing file yields an identity
    /// translator; a malformed one is an error.
    pub fn load(lang_dir: impl AsRef<Path>, locale: &str) -> Result<Self, CatalogError> {
        let path = lang_dir.as_ref().join(format!("{locale}.json"));
        let shown = path.display().to_string();
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %shown, %locale, "translation catalog not found; using message keys");
                return Ok(Self { locale: locale.to_string(), catalog: HashMap::new() });
            }
            Err(source) => return Err(CatalogError::Io { path: shown, source }),
        };
        let t = Self::from_json_str(locale, &content)
            .map_err(|source| CatalogError::Parse { path: shown.clone(), source })?;
        debug!(path = %shown, entries = t.catalog.len(), "translation catalog loaded");
        Ok(t)
    }

    pub fn locale(&self) -> &str { &self.locale }

    pub fn translate(&self, key: &str) -> String {
        self.catalog.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn catalog_entries_override_keys() {
        let t = Translator::from_json_str("bn", r#"{"Organization is Restored": "সংস্থা পুনরুদ্ধার করা হয়েছে"}"#).unwrap();
        assert_eq!(t.translate("Organization is Restored"), "সংস্থা পুনরুদ্ধার করা হয়েছে");
        assert_eq!(t.translate("Organization is Trashed"), "Organization is Trashed");
        assert_eq!(t.locale(), "bn");
    }

    #[test]
    fn missing_catalog_falls_back_to_keys() {
        let dir = tempfile::tempdir().unwrap();
        let t = Translator::load(dir.path(), "fr").unwrap();
        assert_eq!(t.locale(), "fr");
        assert_eq!(t.translate("New Market Created"), "New Market Created");
    }

    #[test]
    fn catalog_is_read_from_lang_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("de.json")).unwrap();
        f.write_all(br#"{"New Market Created": "Neuer Markt erstellt"}"#).unwrap();
        let t = Translator::load(dir.path(), "de").unwrap();
        assert_eq!(t.translate("New Market Created"), "Neuer Markt erstellt");
    }

    #[test]
    fn malformed_catalog_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("es.json"), "[1, 2]").unwrap();
        assert!(matches!(Translator::load(dir.path(), "es"), Err(CatalogError::Parse { .. })));
    }
}

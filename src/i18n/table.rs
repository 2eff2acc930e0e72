//! ISO-639-3 language table: code to English language name.
//!
//! The table is built from the `iso-codes` JSON document
//! (`share/iso-codes/json/iso_639-3.json`) and is immutable once constructed.
//! Each entry's `name` is indexed under both its `alpha_2` and `alpha_3`
//! codes, lowercased. Later entries overwrite earlier ones on collision.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Path of the ISO-639-3 data file relative to the iso-codes prefix.
pub const ISO_639_3_RELATIVE_PATH: &str = "share/iso-codes/json/iso_639-3.json";

/// Errors raised while loading the language table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The data file exists but could not be read.
    #[error("failed to read ISO-639-3 data file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The data file is not a valid ISO-639-3 JSON document.
    #[error("failed to parse ISO-639-3 data file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level shape of `iso_639-3.json`.
#[derive(Debug, Deserialize)]
struct IsoCodesDocument {
    #[serde(rename = "639-3")]
    languages: Vec<Value>,
}

/// Read a string member of an entry. Missing or non-string members are `None`.
fn string_member<'v>(entry: &'v Map<String, Value>, key: &str) -> Option<&'v str> {
    entry.get(key).and_then(Value::as_str)
}

/// Mapping from lowercase ISO-639 code to canonical English language name.
///
/// Values are the raw names from the data file, never translated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTable {
    names: HashMap<String, String>,
}

impl LanguageTable {
    /// Load the table from an `iso_639-3.json` file.
    ///
    /// A path that is not a regular file (missing, a directory, or below a
    /// prefix component that is itself a file) is not an error: a warning is
    /// logged and an empty table is returned, so every lookup resolves to "Other".
    ///
    /// # Arguments
    /// * `path` - Location of the ISO-639-3 JSON data file
    ///
    /// # Returns
    /// * `Ok(LanguageTable)` with every `alpha_2`/`alpha_3` code indexed
    /// * `Ok` with an empty table if the file does not exist
    ///
    /// # Errors
    /// * `TableError::Io` if the file exists but cannot be read
    /// * `TableError::Parse` if the contents are not a valid document
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();

        if !path.is_file() {
            warn!(
                "ISO-639-3 data file {} does not exist, language names will not be resolved",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_json_str(&contents).map_err(|source| TableError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            "Loaded {} language codes from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Build the table from an in-memory JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let document: IsoCodesDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(document))
    }

    /// Build the table from any reader yielding a JSON document.
    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        let document: IsoCodesDocument = serde_json::from_reader(reader)?;
        Ok(Self::from_document(document))
    }

    fn from_document(document: IsoCodesDocument) -> Self {
        let mut names = HashMap::with_capacity(document.languages.len() * 2);

        for (index, value) in document.languages.iter().enumerate() {
            let Some(entry) = value.as_object() else {
                debug!("Skipping non-object ISO-639-3 entry #{}", index);
                continue;
            };

            let Some(name) = string_member(entry, "name") else {
                debug!("Skipping ISO-639-3 entry #{} without a name", index);
                continue;
            };

            for key in ["alpha_2", "alpha_3"] {
                if let Some(code) = string_member(entry, key) {
                    names.insert(code.to_lowercase(), name.to_string());
                }
            }
        }

        Self { names }
    }

    /// Look up the English name for a code.
    ///
    /// # Arguments
    /// * `code` - A 2- or 3-letter ISO-639 code, matched case-insensitively
    ///
    /// # Returns
    /// * `Some(&str)` with the untranslated name if the code is indexed
    /// * `None` if the code is not in the table
    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(&code.to_lowercase()).map(String::as_str)
    }

    /// Check whether a code is present.
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Number of indexed codes (2- and 3-letter codes counted separately).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over `(code, name)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for LanguageTable
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let names = iter
            .into_iter()
            .map(|(code, name)| (code.as_ref().to_lowercase(), name.into()))
            .collect();
        Self { names }
    }
}

/// A language table that is read from disk on first use.
///
/// The file is read at most once, even when `get` races across threads.
/// A load error is kept and returned on every later call.
#[derive(Debug)]
pub struct LazyLanguageTable {
    path: PathBuf,
    table: OnceLock<Result<LanguageTable, TableError>>,
}

impl LazyLanguageTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceLock::new(),
        }
    }

    /// Path of the backing data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the load has already happened.
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Get the table, loading it on the first call.
    pub fn get(&self) -> Result<&LanguageTable, &TableError> {
        self.table
            .get_or_init(|| LanguageTable::load(&self.path))
            .as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const FIXTURE: &str = r#"{
        "639-3": [
            {"alpha_3": "kor", "alpha_2": "ko", "name": "Korean", "scope": "I", "type": "L"},
            {"alpha_3": "mai", "name": "Maithili", "scope": "I", "type": "L"},
            {"alpha_3": "zho", "alpha_2": "zh", "name": "Chinese", "scope": "M", "type": "L"}
        ]
    }"#;

    fn write_fixture(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write fixture");
        file
    }

    // ==================== Parsing Tests ====================

    #[test]
    fn test_from_json_indexes_both_codes() {
        let table = LanguageTable::from_json_str(FIXTURE).expect("Should parse");

        assert_eq!(table.get("ko"), Some("Korean"));
        assert_eq!(table.get("kor"), Some("Korean"));
        assert_eq!(table.get("zh"), Some("Chinese"));
        assert_eq!(table.get("zho"), Some("Chinese"));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_from_json_alpha_3_only() {
        let table = LanguageTable::from_json_str(FIXTURE).expect("Should parse");
        assert_eq!(table.get("mai"), Some("Maithili"));
    }

    #[test]
    fn test_keys_are_lowercased() {
        let json = r#"{"639-3": [{"alpha_2": "EN", "alpha_3": "Eng", "name": "English"}]}"#;
        let table = LanguageTable::from_json_str(json).expect("Should parse");

        assert!(table.iter().all(|(code, _)| code == code.to_lowercase()));
        assert_eq!(table.get("en"), Some("English"));
        assert_eq!(table.get("eng"), Some("English"));
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let table = LanguageTable::from_json_str(FIXTURE).expect("Should parse");
        assert_eq!(table.get("KO"), Some("Korean"));
        assert_eq!(table.get("Kor"), Some("Korean"));
    }

    #[test]
    fn test_later_entry_wins_on_collision() {
        let json = r#"{"639-3": [
            {"alpha_2": "xx", "name": "First"},
            {"alpha_2": "xx", "name": "Second"}
        ]}"#;
        let table = LanguageTable::from_json_str(json).expect("Should parse");
        assert_eq!(table.get("xx"), Some("Second"));
    }

    #[test]
    fn test_entry_without_name_is_skipped() {
        let json = r#"{"639-3": [
            {"alpha_2": "aa", "alpha_3": "aar"},
            {"alpha_3": "mai", "name": "Maithili"}
        ]}"#;
        let table = LanguageTable::from_json_str(json).expect("Should parse");

        assert!(!table.contains("aa"));
        assert!(!table.contains("aar"));
        assert_eq!(table.get("mai"), Some("Maithili"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_mistyped_code_keeps_other_fields() {
        let json = r#"{"639-3": [{"name": "Korean", "alpha_2": 5, "alpha_3": "kor"}]}"#;
        let table = LanguageTable::from_json_str(json).expect("Should parse");

        assert_eq!(table.get("kor"), Some("Korean"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_non_string_name_is_skipped() {
        let json = r#"{"639-3": [{"name": 7, "alpha_3": "kor"}]}"#;
        let table = LanguageTable::from_json_str(json).expect("Should parse");
        assert!(table.is_empty());
    }

    #[test]
    fn test_non_object_entry_is_skipped() {
        let json = r#"{"639-3": [42, "kor", {"alpha_3": "kor", "name": "Korean"}]}"#;
        let table = LanguageTable::from_json_str(json).expect("Should parse");
        assert_eq!(table.get("kor"), Some("Korean"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_entry_without_codes_adds_nothing() {
        let json = r#"{"639-3": [{"name": "Nameless"}]}"#;
        let table = LanguageTable::from_json_str(json).expect("Should parse");
        assert!(table.is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(LanguageTable::from_json_str("{\"639-3\": [").is_err());
    }

    #[test]
    fn test_missing_root_key_is_error() {
        assert!(LanguageTable::from_json_str(r#"{"639-2": []}"#).is_err());
    }

    #[test]
    fn test_from_reader() {
        let table = LanguageTable::from_reader(FIXTURE.as_bytes()).expect("Should parse");
        assert_eq!(table.get("ko"), Some("Korean"));
    }

    #[test]
    fn test_from_iterator_lowercases_codes() {
        let table: LanguageTable = [("ZH", "Mandarin Chinese")].into_iter().collect();
        assert_eq!(table.get("zh"), Some("Mandarin Chinese"));
        assert!(table.iter().all(|(code, _)| code == "zh"));
    }

    // ==================== load Tests ====================

    #[test]
    fn test_load_from_file() {
        let file = write_fixture(FIXTURE);
        let table = LanguageTable::load(file.path()).expect("Should load");
        assert_eq!(table.get("kor"), Some("Korean"));
    }

    #[test]
    fn test_load_missing_file_yields_empty_table() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let table = LanguageTable::load(dir.path().join("iso_639-3.json"))
            .expect("Missing file should not be an error");
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let file = write_fixture("not json");
        let err = LanguageTable::load(file.path()).unwrap_err();

        assert!(matches!(err, TableError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_load_directory_yields_empty_table() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let table = LanguageTable::load(dir.path()).expect("Directory should not be an error");
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_below_file_prefix_yields_empty_table() {
        let prefix = write_fixture("not a directory");
        let path = prefix.path().join(ISO_639_3_RELATIVE_PATH);

        let table = LanguageTable::load(&path).expect("Prefix file should not be an error");
        assert!(table.is_empty());
    }

    // ==================== LazyLanguageTable Tests ====================

    #[test]
    fn test_lazy_table_loads_on_first_get() {
        let file = write_fixture(FIXTURE);
        let lazy = LazyLanguageTable::new(file.path());

        assert!(!lazy.is_loaded());
        let table = lazy.get().expect("Should load");
        assert_eq!(table.get("ko"), Some("Korean"));
        assert!(lazy.is_loaded());
    }

    #[test]
    fn test_lazy_table_is_loaded_once() {
        let file = write_fixture(FIXTURE);
        let path = file.path().to_path_buf();
        let lazy = LazyLanguageTable::new(&path);

        let first = lazy.get().expect("Should load");
        drop(file);
        assert!(!path.exists());

        let second = lazy.get().expect("Should still be loaded");
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.get("kor"), Some("Korean"));
    }

    #[test]
    fn test_lazy_table_shared_across_threads() {
        let file = write_fixture(FIXTURE);
        let lazy = LazyLanguageTable::new(file.path());

        let addresses: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let table = lazy.get().expect("Should load");
                        table as *const LanguageTable as usize
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("Thread panicked"))
                .collect()
        });

        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_lazy_table_keeps_error() {
        let file = write_fixture("[]");
        let lazy = LazyLanguageTable::new(file.path());

        assert!(lazy.get().is_err());
        assert!(lazy.get().is_err());
    }
}

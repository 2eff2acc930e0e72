//! Language name resolution for locale identifiers.
//!
//! All language-table, catalog and locale logic is contained here.
//!
//! # Architecture
//!
//! - `table`: ISO-639-3 code table loaded from the iso-codes JSON data file
//! - `catalog`: `Translator` trait and message catalogs (identity and in-memory)
//! - `locale`: locale identifier helpers (primary subtag, fallback chain)
//! - `names`: `get_language_name` lookup tying the table and catalogs together
//!
//! # Example
//!
//! ```rust,ignore
//! use language_names::i18n::{LanguageNames, LanguageTable, MessageCatalog};
//!
//! let table = LanguageTable::load("/usr/share/iso-codes/json/iso_639-3.json")?;
//! let catalog = MessageCatalog::new();
//! let names = LanguageNames::new(&table, &catalog, "de_DE");
//!
//! let name = names.get_language_name("zh_CN");
//! ```

mod catalog;
mod locale;
mod names;
mod table;

pub use catalog::{
    CatalogError, IdentityTranslator, MessageCatalog, Translator, DEFAULT_APP_DOMAIN,
    ISO_639_3_DOMAIN,
};
pub use locale::{fallback_chain, is_untranslated_locale, primary_subtag, strip_codeset};
pub use names::{get_language_name, untranslated_language_name, LanguageNames, OTHER};
pub use table::{LanguageTable, LazyLanguageTable, TableError, ISO_639_3_RELATIVE_PATH};

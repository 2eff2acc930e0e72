//! Resolve locale identifiers such as `zh_CN` to display language names
//! using the ISO-639-3 table shipped with iso-codes.

pub mod config;
pub mod i18n;

pub use i18n::{get_language_name, LanguageNames, LanguageTable, MessageCatalog, Translator};

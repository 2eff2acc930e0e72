//! Locale to display language name lookup.

use crate::i18n::catalog::{Translator, DEFAULT_APP_DOMAIN, ISO_639_3_DOMAIN};
use crate::i18n::locale::primary_subtag;
use crate::i18n::table::LanguageTable;

/// Placeholder returned when a locale's language is not in the table.
pub const OTHER: &str = "Other";

/// Resolves locale identifiers to language names for one display locale.
///
/// Holds borrowed, already-built collaborators: the table and translator are
/// constructed once by the caller and shared read-only.
///
/// # Example
/// ```
/// use language_names::i18n::{IdentityTranslator, LanguageNames, LanguageTable};
///
/// let table: LanguageTable = [("zh", "Mandarin Chinese")].into_iter().collect();
/// let names = LanguageNames::new(&table, &IdentityTranslator, "C");
///
/// assert_eq!(names.get_language_name("zh_CN"), "Mandarin Chinese");
/// assert_eq!(names.get_language_name("xx"), "Other");
/// ```
#[derive(Debug)]
pub struct LanguageNames<'a, T: Translator + ?Sized> {
    table: &'a LanguageTable,
    translator: &'a T,
    display_locale: String,
    app_domain: String,
}

impl<'a, T: Translator + ?Sized> LanguageNames<'a, T> {
    pub fn new(
        table: &'a LanguageTable,
        translator: &'a T,
        display_locale: impl Into<String>,
    ) -> Self {
        Self {
            table,
            translator,
            display_locale: display_locale.into(),
            app_domain: DEFAULT_APP_DOMAIN.to_string(),
        }
    }

    /// Use a different catalog domain for the "Other" placeholder.
    pub fn with_app_domain(mut self, domain: impl Into<String>) -> Self {
        self.app_domain = domain.into();
        self
    }

    pub fn display_locale(&self) -> &str {
        &self.display_locale
    }

    pub fn app_domain(&self) -> &str {
        &self.app_domain
    }

    pub fn table(&self) -> &'a LanguageTable {
        self.table
    }

    /// English name for the locale's language, or `"Other"`. No catalog is consulted.
    pub fn untranslated_language_name(&self, locale: &str) -> &'a str {
        untranslated_language_name(self.table, locale)
    }

    /// Display name for the locale's language in the display locale.
    ///
    /// The region (anything after the first `_`) is ignored and the code is
    /// matched case-insensitively.
    ///
    /// # Arguments
    /// * `locale` - A locale identifier such as `"zh_CN"` or `"mai"`
    ///
    /// # Returns
    /// * The language name translated through the `iso_639-3` domain, or the
    ///   English name when no translation exists
    /// * "Other" translated through the app domain if the code is unknown
    pub fn get_language_name(&self, locale: &str) -> String {
        resolve(
            self.table,
            self.translator,
            &self.app_domain,
            &self.display_locale,
            locale,
        )
    }
}

/// English name for the locale's language, or `"Other"`.
pub fn untranslated_language_name<'t>(table: &'t LanguageTable, locale: &str) -> &'t str {
    table.get(primary_subtag(locale)).unwrap_or(OTHER)
}

/// Display name for `locale`, translated into `display_locale`.
///
/// Uses [`DEFAULT_APP_DOMAIN`] for the "Other" placeholder.
pub fn get_language_name<T: Translator + ?Sized>(
    table: &LanguageTable,
    translator: &T,
    display_locale: &str,
    locale: &str,
) -> String {
    resolve(table, translator, DEFAULT_APP_DOMAIN, display_locale, locale)
}

fn resolve<T: Translator + ?Sized>(
    table: &LanguageTable,
    translator: &T,
    app_domain: &str,
    display_locale: &str,
    locale: &str,
) -> String {
    match table.get(primary_subtag(locale)) {
        Some(name) => translator
            .translate(ISO_639_3_DOMAIN, name, display_locale)
            .into_owned(),
        None => translator
            .translate(app_domain, OTHER, display_locale)
            .into_owned(),
    }
}

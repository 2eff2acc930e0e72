//! Locale identifier helpers.
//!
//! Locale strings are treated as opaque POSIX-style identifiers such as
//! `"zh_CN"`, `"pt_BR.UTF-8"` or `"sr_RS@latin"`. Only the pieces needed for
//! language-name lookup and catalog fallback are interpreted here.

/// Get the primary language subtag of a locale.
///
/// Returns everything before the first `_`, or the whole string when there
/// is no `_`. The result is not case-normalized.
///
/// # Example
/// ```
/// use language_names::i18n::primary_subtag;
///
/// assert_eq!(primary_subtag("zh_CN"), "zh");
/// assert_eq!(primary_subtag("mai"), "mai");
/// ```
pub fn primary_subtag(locale: &str) -> &str {
    locale.split_once('_').map_or(locale, |(lang, _)| lang)
}

/// Strip the `.codeset` and `@modifier` suffixes from a locale.
///
/// `"de_DE.UTF-8@euro"` becomes `"de_DE"`.
pub fn strip_codeset(locale: &str) -> &str {
    let end = locale.find(&['.', '@'][..]).unwrap_or(locale.len());
    &locale[..end]
}

/// Whether the locale is the untranslated `C`/`POSIX` locale.
pub fn is_untranslated_locale(locale: &str) -> bool {
    matches!(strip_codeset(locale), "" | "C" | "POSIX")
}

/// Catalog lookup order for a display locale, most specific first.
///
/// `"zh_CN.UTF-8"` yields `["zh_CN", "zh"]`. The `C` and `POSIX` locales
/// yield nothing, so every lookup falls back to the source string.
pub fn fallback_chain(locale: &str) -> Vec<&str> {
    if is_untranslated_locale(locale) {
        return Vec::new();
    }

    let full = strip_codeset(locale);
    let lang = primary_subtag(full);

    let mut chain = vec![full];
    if lang != full && !lang.is_empty() {
        chain.push(lang);
    }
    chain
}

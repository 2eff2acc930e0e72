//! Message catalogs: translating source strings into a display locale.
//!
//! Translation goes through the [`Translator`] trait, which mirrors gettext's
//! domain lookup: `translate(domain, text, locale)`. If nothing is registered
//! for the text, the text itself comes back unchanged.
//!
//! Two implementations are provided:
//!
//! - [`IdentityTranslator`]: never translates (useful in tests and for the
//!   `C` locale)
//! - [`MessageCatalog`]: in-memory catalog, optionally loaded from
//!   `<domain>.json` files, with `zh_CN` -> `zh` locale fallback

use crate::i18n::locale::fallback_chain;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Catalog domain holding translations of ISO-639-3 language names.
pub const ISO_639_3_DOMAIN: &str = "iso_639-3";

/// Default domain for this application's own strings (e.g. "Other").
pub const DEFAULT_APP_DOMAIN: &str = "language-names";

/// Translates source strings within a catalog domain.
pub trait Translator {
    /// Translate `text` from `domain` into `locale`.
    ///
    /// Returns `text` unchanged when no translation is registered.
    fn translate<'a>(&'a self, domain: &str, text: &'a str, locale: &str) -> Cow<'a, str>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate<'a>(&'a self, domain: &str, text: &'a str, locale: &str) -> Cow<'a, str> {
        (**self).translate(domain, text, locale)
    }
}

/// Translator that returns every string untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate<'a>(&'a self, _domain: &str, text: &'a str, _locale: &str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// Errors raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read message catalog {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse message catalog {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// msgid -> msgstr
type Messages = HashMap<String, String>;

/// In-memory message catalog keyed by domain, then locale, then msgid.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    domains: HashMap<String, HashMap<String, Messages>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `<dir>/<domain>.json` for each domain.
    ///
    /// Missing files are logged and leave the domain empty.
    pub fn from_dir(dir: impl AsRef<Path>, domains: &[&str]) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut catalog = Self::new();

        for domain in domains {
            catalog.load_domain(domain, dir.join(format!("{}.json", domain)))?;
        }

        Ok(catalog)
    }

    /// Register a single translation.
    pub fn insert(
        &mut self,
        domain: impl Into<String>,
        locale: impl Into<String>,
        msgid: impl Into<String>,
        msgstr: impl Into<String>,
    ) {
        self.domains
            .entry(domain.into())
            .or_default()
            .entry(locale.into())
            .or_default()
            .insert(msgid.into(), msgstr.into());
    }

    /// Merge a domain's translations from a JSON file.
    ///
    /// The file maps locales to msgid/msgstr objects:
    /// `{"de": {"Other": "Andere"}, "zh_CN": {"Other": "其他"}}`.
    /// A missing file only logs a warning.
    pub fn load_domain(&mut self, domain: &str, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "Message catalog {} does not exist, domain '{}' stays untranslated",
                    path.display(),
                    domain
                );
                return Ok(());
            }
            Err(source) => {
                return Err(CatalogError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let locales: HashMap<String, Messages> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let count: usize = locales.values().map(HashMap::len).sum();
        let entry = self.domains.entry(domain.to_string()).or_default();
        for (locale, messages) in locales {
            entry.entry(locale).or_default().extend(messages);
        }

        info!(
            "Loaded {} messages for domain '{}' from {}",
            count,
            domain,
            path.display()
        );
        Ok(())
    }

    /// Find a translation, walking the locale fallback chain.
    ///
    /// Empty msgstr values count as untranslated, as in gettext.
    ///
    /// # Arguments
    /// * `domain` - Catalog domain (e.g. `ISO_639_3_DOMAIN`)
    /// * `msgid` - Source string to translate
    /// * `locale` - Display locale; `"zh_CN"` also tries `"zh"`
    ///
    /// # Returns
    /// * `Some(&str)` with the most specific translation found
    /// * `None` if no locale in the chain translates `msgid`
    pub fn lookup(&self, domain: &str, msgid: &str, locale: &str) -> Option<&str> {
        let locales = self.domains.get(domain)?;

        fallback_chain(locale).into_iter().find_map(|candidate| {
            locales
                .get(candidate)
                .and_then(|messages| messages.get(msgid))
                .filter(|msgstr| !msgstr.is_empty())
                .map(String::as_str)
        })
    }

    /// Whether no translations are registered in any domain.
    pub fn is_empty(&self) -> bool {
        self.domains
            .values()
            .all(|locales| locales.values().all(HashMap::is_empty))
    }
}

impl Translator for MessageCatalog {
    fn translate<'a>(&'a self, domain: &str, text: &'a str, locale: &str) -> Cow<'a, str> {
        match self.lookup(domain, text, locale) {
            Some(translated) => Cow::Borrowed(translated),
            None => Cow::Borrowed(text),
        }
    }
}

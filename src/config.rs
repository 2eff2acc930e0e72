use crate::i18n::{
    strip_codeset, LanguageTable, MessageCatalog, DEFAULT_APP_DOMAIN, ISO_639_3_DOMAIN,
    ISO_639_3_RELATIVE_PATH,
};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Default iso-codes installation prefix.
pub const DEFAULT_ISOCODES_PREFIX: &str = "/usr";

/// Locale-selection variables in gettext priority order.
const LOCALE_ENV_VARS: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Clone)]
pub struct Config {
    // Data file
    pub isocodes_prefix: PathBuf,
    pub iso_639_json: Option<PathBuf>,

    // Display
    pub display_locale: String,

    // Catalogs
    pub app_domain: String,
    pub catalog_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            isocodes_prefix: PathBuf::from(DEFAULT_ISOCODES_PREFIX),
            iso_639_json: None,
            display_locale: "C".to_string(),
            app_domain: DEFAULT_APP_DOMAIN.to_string(),
            catalog_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let app_domain = match std::env::var("LANGUAGE_NAMES_DOMAIN") {
            Ok(domain) if domain.trim().is_empty() => {
                bail!("LANGUAGE_NAMES_DOMAIN must not be empty")
            }
            Ok(domain) => domain,
            Err(_) => DEFAULT_APP_DOMAIN.to_string(),
        };

        Ok(Self {
            // Data file
            isocodes_prefix: env_var("ISOCODES_PREFIX")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ISOCODES_PREFIX)),
            iso_639_json: env_var("ISO_639_JSON").map(PathBuf::from),

            // Display
            display_locale: display_locale_from_env(),

            // Catalogs
            app_domain,
            catalog_dir: env_var("LANGUAGE_NAMES_CATALOG_DIR").map(PathBuf::from),
        })
    }

    /// Path of the ISO-639-3 JSON file: the explicit override if set,
    /// otherwise `<prefix>/share/iso-codes/json/iso_639-3.json`.
    pub fn iso_639_3_path(&self) -> PathBuf {
        self.iso_639_json
            .clone()
            .unwrap_or_else(|| self.isocodes_prefix.join(ISO_639_3_RELATIVE_PATH))
    }

    /// Load the language table from the configured data file.
    pub fn load_table(&self) -> Result<LanguageTable> {
        let path = self.iso_639_3_path();
        LanguageTable::load(&path)
            .with_context(|| format!("Failed to load language table from {}", path.display()))
    }

    /// Load the language-name and application catalogs, if a catalog
    /// directory is configured. Otherwise the catalog is empty and every
    /// string is returned untranslated.
    pub fn load_catalog(&self) -> Result<MessageCatalog> {
        match &self.catalog_dir {
            Some(dir) => {
                MessageCatalog::from_dir(dir, &[ISO_639_3_DOMAIN, self.app_domain.as_str()])
                    .context("Failed to load message catalogs")
            }
            None => Ok(MessageCatalog::new()),
        }
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve the display locale.
///
/// `LANGUAGE_NAMES_LOCALE` wins, then the gettext variables. `LANGUAGE` may
/// be a colon-separated list; its first entry is used. Codeset and modifier
/// suffixes are dropped. Defaults to `C`.
fn display_locale_from_env() -> String {
    let raw = env_var("LANGUAGE_NAMES_LOCALE").or_else(|| {
        LOCALE_ENV_VARS.iter().find_map(|name| {
            env_var(name).and_then(|value| {
                value
                    .split(':')
                    .find(|entry| !entry.is_empty())
                    .map(str::to_string)
            })
        })
    });

    raw.map(|locale| strip_codeset(&locale).to_string())
        .filter(|locale| !locale.is_empty())
        .unwrap_or_else(|| "C".to_string())
}

//! Print display language names for locale identifiers.
//!
//! Usage:
//!   language-names zh_CN ko mai            # Translated names
//!   language-names --untranslated zh_CN    # Raw ISO-639-3 names
//!
//! Optional environment variables:
//! - ISOCODES_PREFIX (defaults to /usr)
//! - ISO_639_JSON (overrides the full data file path)
//! - LANGUAGE_NAMES_LOCALE (defaults to LANGUAGE/LC_ALL/LC_MESSAGES/LANG, then C)
//! - LANGUAGE_NAMES_DOMAIN (defaults to language-names)
//! - LANGUAGE_NAMES_CATALOG_DIR (directory of <domain>.json catalogs)

use anyhow::{bail, Result};
use language_names::{config::Config, LanguageNames};
use tracing::info;

fn print_usage() {
    eprintln!("Usage: language-names [--untranslated] <locale>...");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  language-names zh_CN ko mai");
    eprintln!("  language-names --untranslated ja_JP");
}

/// Parsed command-line arguments
#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    untranslated: bool,
    locales: Vec<String>,
}

/// Parse arguments (without the program name). Unknown flags are rejected.
fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut untranslated = false;
    let mut locales = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--untranslated" => untranslated = true,
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            locale => locales.push(locale.to_string()),
        }
    }

    if locales.is_empty() {
        bail!("No locale given");
    }

    Ok(CliArgs {
        untranslated,
        locales,
    })
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_names=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().skip(1).collect();
    let CliArgs {
        untranslated,
        locales,
    } = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            print_usage();
            return Err(e);
        }
    };

    let config = Config::from_env()?;
    info!(
        "Resolving {} locale(s) for display locale {}",
        locales.len(),
        config.display_locale
    );

    let table = config.load_table()?;
    let catalog = config.load_catalog()?;
    let names = LanguageNames::new(&table, &catalog, config.display_locale.as_str())
        .with_app_domain(config.app_domain.as_str());

    for locale in &locales {
        let name = if untranslated {
            names.untranslated_language_name(locale).to_string()
        } else {
            names.get_language_name(locale)
        };
        println!("{}\t{}", locale, name);
    }

    Ok(())
}

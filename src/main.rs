//! Command-line front end for the translation catalogs
//!
//! Usage:
//!   locale-catalog languages          # List languages with a translation resource
//!   locale-catalog current            # Show the active language
//!   locale-catalog get <key>...       # Look up keys in the active language
//!   locale-catalog use <language>     # Switch language and persist the choice
//!   locale-catalog check [language]   # Audit a catalog against the baseline
//!
//! Configuration comes from the environment (see `config.rs`); a `.env` file
//! in the working directory is loaded first.

use anyhow::{bail, Context, Result};
use locale_catalog::config::Config;
use locale_catalog::i18n::{CatalogLoader, CatalogValidator, LanguageCode, LocaleManager};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_catalog=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let config = Config::from_env()?;
    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "languages" => languages_command(&config),
        "current" => current_command(&config),
        "get" => get_command(&config, rest),
        "use" => use_command(&config, rest),
        "check" => check_command(&config, rest),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Usage: locale-catalog <command> [args]");
    println!();
    println!("Commands:");
    println!("  languages          List languages with a translation resource");
    println!("  current            Show the active language");
    println!("  get <key>...       Look up keys in the active language");
    println!("  use <language>     Switch language and persist the choice");
    println!("  check [language]   Audit a catalog against the baseline language");
}

fn languages_command(config: &Config) -> Result<()> {
    let manager = LocaleManager::from_config(config);
    let active = manager.active_language();

    for code in manager.available_languages() {
        let marker = if code == active { "*" } else { " " };
        println!("{} {}", marker, code);
    }
    Ok(())
}

fn current_command(config: &Config) -> Result<()> {
    let manager = LocaleManager::from_config(config);
    match manager.catalog() {
        Some(catalog) => println!("{} ({} keys)", manager.active_language(), catalog.len()),
        None => println!("{} (no translation resource)", manager.active_language()),
    }
    Ok(())
}

fn get_command(config: &Config, keys: &[String]) -> Result<()> {
    if keys.is_empty() {
        bail!("get requires at least one key");
    }

    let manager = LocaleManager::from_config(config);
    for key in keys {
        println!("{}", manager.lookup(key));
    }
    Ok(())
}

fn use_command(config: &Config, args: &[String]) -> Result<()> {
    let Some(language) = args.first() else {
        bail!("use requires a language");
    };

    let mut manager = LocaleManager::from_config(config);
    manager.set_active_language(language.as_str());
    if !manager.has_catalog() {
        eprintln!(
            "Warning: no translation resource for '{}'; lookups will report it",
            language
        );
    }

    manager
        .persist()
        .context("Failed to persist language selection")?;
    info!("Now using '{}'", manager.active_language());
    Ok(())
}

fn check_command(config: &Config, args: &[String]) -> Result<()> {
    let manager = LocaleManager::from_config(config);
    let code = args
        .first()
        .map(|arg| LanguageCode::new(arg.as_str()))
        .unwrap_or_else(|| manager.active_language().clone());

    let loader = CatalogLoader::new(manager.bundle(), manager.index());
    let document = loader
        .load_document(&code)
        .with_context(|| format!("Cannot check '{}'", code))?;

    let reference = if &code != manager.baseline() {
        loader.load(manager.baseline()).ok()
    } else {
        None
    };

    let report = CatalogValidator::validate(&document, reference.as_ref());
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    for error in &report.errors {
        println!("error: {}", error);
    }

    if report.has_errors() {
        std::process::exit(1);
    }
    println!(
        "'{}' is clean ({} warnings)",
        code,
        report.warnings.len()
    );
    Ok(())
}

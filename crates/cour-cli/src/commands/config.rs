use anyhow::{Context, Result};
use toml_edit::DocumentMut;

use crate::config::{self, Config, KNOWN_KEYS};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let config_path = config::config_file_path();
    println!("Config file: {}", config_path.display());
    println!(
        "File exists: {}\n",
        if config_path.exists() { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  database_path: {}", config.database_path.display());
    println!("  logging.level: {:?}", config.logging.level());
    println!("  logging.coloured: {}", config.logging.coloured());
    println!("  logging.output: {:?}", config.logging.output());

    println!("\nPriority: CLI args > ENV vars (COUR_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value, or print the whole file.
pub fn get_config(config: &Config, key: Option<String>) -> Result<()> {
    let Some(key) = key else {
        let config_path = config::config_file_path();
        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'cour config init' to create it.");
        }
        return Ok(());
    };

    match key.as_str() {
        "database_path" => println!("{}", config.database_path.display()),
        "logging.level" => println!("{:?}", config.logging.level()),
        "logging.coloured" => println!("{}", config.logging.coloured()),
        _ => unknown_key(&key)?,
    }
    Ok(())
}

/// Set a config value, keeping the rest of the file (comments included).
pub fn set_config(key: &str, value: &str) -> Result<()> {
    let config_path = config::config_file_path();
    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let updated = apply_setting(&contents, key, value)?;
    std::fs::write(&config_path, updated).context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, value);
    println!("  in {}", config_path.display());

    Ok(())
}

fn apply_setting(contents: &str, key: &str, value: &str) -> Result<String> {
    let mut doc = contents
        .parse::<DocumentMut>()
        .context("Failed to parse config file")?;

    match key {
        "database_path" => doc["database_path"] = toml_edit::value(value),
        "logging.level" => doc["logging"]["level"] = toml_edit::value(value),
        "logging.coloured" => {
            let coloured: bool = value
                .parse()
                .with_context(|| format!("logging.coloured must be true or false, got {value:?}"))?;
            doc["logging"]["coloured"] = toml_edit::value(coloured);
        }
        _ => unknown_key(key)?,
    }

    Ok(doc.to_string())
}

fn unknown_key(key: &str) -> Result<()> {
    anyhow::bail!(
        "Unknown config key: {}\n\nValid keys: {}",
        key,
        KNOWN_KEYS.join(", ")
    )
}

pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure cour.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::core::store::{SettingsProvider, SettingsStore};
use crate::core::version;

pub fn list_sections(config_path: PathBuf) -> Result<()> {
    let store = SettingsStore::new(config_path);
    let doc = store.load()?;

    match doc.version() {
        Some(stamp) => println!("Document version: {}", stamp.bright_yellow()),
        None => println!("Document version: {}", "(not stamped yet)".dimmed()),
    }

    if doc.is_empty() {
        println!("No sections stored.");
        return Ok(());
    }

    for name in doc.section_names() {
        println!("  📁 {name}");
    }
    Ok(())
}

pub fn show_section(config_path: PathBuf, name: &str, format: &str) -> Result<()> {
    let store = SettingsStore::new(config_path);
    let doc = store.load()?;
    let section = doc.section(name);

    let content = match format {
        "json" => {
            serde_json::to_string_pretty(section.values()).context("Failed to serialize to JSON")?
        }
        "yaml" => serde_yaml::to_string(section.values()).context("Failed to serialize to YAML")?,
        "toml" | _ => {
            toml::to_string_pretty(section.values()).context("Failed to serialize to TOML")?
        }
    };

    println!("{content}");
    Ok(())
}

pub fn set_value(
    config_path: PathBuf,
    section_name: String,
    key: String,
    raw_value: String,
) -> Result<()> {
    let store = SettingsStore::new(config_path);
    let value = parse_value(&raw_value);

    store.update(|doc| {
        let mut section = doc.section(&section_name);
        section.set(key, value);
        doc.replace_section(section);
    })?;

    println!("✓ Updated section '{section_name}'");
    Ok(())
}

pub fn remove_section(config_path: PathBuf, name: String) -> Result<()> {
    let store = SettingsStore::new(config_path);

    let mut removed = false;
    store.update(|doc| {
        removed = doc.remove_section(&name);
    })?;

    if removed {
        println!("✓ Removed section '{name}'");
    } else {
        println!("Section '{name}' was not present.");
    }
    Ok(())
}

pub fn version_report(config_path: PathBuf) -> Result<()> {
    println!();
    println!("{}", "Version Check: ".cyan().bold());
    println!(
        "├─ Build identity: {}",
        version::build_identity().bright_yellow().bold()
    );

    let store = SettingsStore::new(config_path);
    let doc = store.load()?;

    match doc.version() {
        Some(stamp) => {
            println!("├─ Document stamp: {}", stamp.bright_green().bold());
            if version::matches_current(stamp) {
                println!(
                    "{}",
                    "└─ Document was written by this build.".green().bold()
                );
            } else {
                println!(
                    "└─ Document was written by a different build ({})",
                    stamp.red()
                );
            }
        }
        None => {
            // Friendly message, not an error
            println!(
                "{}",
                "└─ No stamped document found. This looks like a clean install."
                    .bright_blue()
                    .bold()
            );
        }
    }
    Ok(())
}

// `set` accepts bare scalars ("8", "true", "[1, 2]") as their natural TOML
// type and falls back to a plain string for anything that does not parse.
fn parse_value(raw: &str) -> toml::Value {
    let probe = format!("v = {raw}");
    match toml::from_str::<toml::Table>(&probe) {
        Ok(mut table) => table
            .remove("v")
            .unwrap_or_else(|| toml::Value::String(raw.to_string())),
        Err(_) => toml::Value::String(raw.to_string()),
    }
}

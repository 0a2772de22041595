//! Configure command: write the per-user configuration file.

use anyhow::{Context, Result};
use colored::Colorize;
use kiln_client::config::{
    API_KEY_VAR, API_URL_VAR, ClientConfig, ORG_VAR, config_file_path, write_config_value,
};

/// Print current values and persist any provided ones.
pub fn execute(api_key: Option<String>, api_url: Option<String>, org: Option<String>) -> Result<()> {
    let current = ClientConfig::from_env();

    if let Some(ref org) = current.org {
        println!("Current org: {}", org.cyan());
    }
    if let Some(org) = org {
        println!("Setting org to {}", org.cyan());
        write_config_value(ORG_VAR, &org).context("Failed to write configuration")?;
    }

    println!("Current API URL: {}", current.api_url.cyan());
    if let Some(api_url) = api_url {
        println!("Setting API URL to {}", api_url.cyan());
        write_config_value(API_URL_VAR, &api_url).context("Failed to write configuration")?;
    }

    let key_state = if current.api_key.is_empty() { "not in".red() } else { "in".green() };
    println!("API key: {} config (file or env)", key_state);
    if let Some(api_key) = api_key {
        println!("Setting API key");
        write_config_value(API_KEY_VAR, &api_key).context("Failed to write configuration")?;
    } else if current.api_key.is_empty() {
        println!(
            "{}",
            format!(
                "No API key configured. Pass --api-key, or set {} at runtime.",
                API_KEY_VAR
            )
            .yellow()
        );
    }

    println!("Config file: {}", config_file_path().display().to_string().dimmed());
    Ok(())
}

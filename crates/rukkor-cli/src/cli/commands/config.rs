//! Config command handlers.

use anyhow::Result;
use rukkor_core::config::{Config, paths};

pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let path = paths::config_path();
    Config::init(&path)?;
    println!("Created {}", path.display());
    Ok(())
}

pub fn set_url(url: &str) -> Result<()> {
    Config::save_api_base_url(url)?;
    println!("api_base_url = {url}");
    Ok(())
}

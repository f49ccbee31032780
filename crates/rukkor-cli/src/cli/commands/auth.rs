//! Auth command handlers.
//!
//! Scriptable surface over the same core client the TUI uses. Local
//! validation runs before any network call, exactly like the screens.

use anyhow::Result;
use rukkor_core::api::AuthClient;
use rukkor_core::config::Config;
use rukkor_core::session::{SessionStore, mask_token};
use rukkor_core::validate;

fn bail_on_validation(errors: validate::ValidationErrors) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors.values().cloned().collect::<Vec<_>>().join("; ");
    anyhow::bail!("{joined}")
}

pub async fn login(config: &Config, email: &str, password: &str) -> Result<()> {
    bail_on_validation(validate::validate_login(email, password))?;

    let client = AuthClient::new(config.auth_base_url(), SessionStore::new());
    let (user, token) = client.login(email, password).await?;
    client.session().save_token(&token)?;

    println!(
        "✓ Logged in as {} (token: {})",
        user.email,
        mask_token(&token)
    );
    Ok(())
}

pub async fn verify_otp(config: &Config, otp: &str, email: &str) -> Result<()> {
    bail_on_validation(validate::validate_otp(otp))?;

    let client = AuthClient::new(config.auth_base_url(), SessionStore::new());
    let token = client.verify_otp(otp, email).await?;
    client.session().save_token(&token)?;

    println!("✓ OTP verified (token: {})", mask_token(&token));
    Ok(())
}

pub fn logout() -> Result<()> {
    let store = SessionStore::new();
    if store.clear_token()? {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub fn status() -> Result<()> {
    let store = SessionStore::new();
    match store.load_token()? {
        Some(token) => println!("Logged in (token: {})", mask_token(&token)),
        None => println!("Logged out."),
    }
    Ok(())
}

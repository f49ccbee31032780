//! Auth effect handlers.
//!
//! Pure async functions that call the backend client and return the result
//! event. Successful login/OTP responses persist the token to the session
//! store before the event is reported, so the stored token and the state
//! machine never disagree about a completed request.

use rukkor_core::api::{AuthClient, RegisterFields};

use crate::events::{AuthUiEvent, UiEvent};

pub async fn login(client: AuthClient, email: String, password: String) -> UiEvent {
    let result = match client.login(&email, &password).await {
        Ok((user, token)) => match client.session().save_token(&token) {
            Ok(()) => Ok((user, token)),
            Err(e) => Err(format!("Failed to persist session: {e}")),
        },
        Err(e) => Err(e.to_string()),
    };
    UiEvent::Auth(AuthUiEvent::LoginFinished(result))
}

pub async fn signup(client: AuthClient, fields: RegisterFields) -> UiEvent {
    let result = client.register(&fields).await.map_err(|e| e.to_string());
    UiEvent::Auth(AuthUiEvent::SignupFinished(result))
}

pub async fn verify_otp(client: AuthClient, otp: String, email: String) -> UiEvent {
    let result = match client.verify_otp(&otp, &email).await {
        Ok(token) => match client.session().save_token(&token) {
            Ok(()) => Ok(token),
            Err(e) => Err(format!("Failed to persist session: {e}")),
        },
        Err(e) => Err(e.to_string()),
    };
    UiEvent::Auth(AuthUiEvent::OtpFinished(result))
}

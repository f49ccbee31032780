//! Core Rukkor client library (config, session, backend API, auth state).

pub mod api;
pub mod auth;
pub mod config;
pub mod session;
pub mod validate;

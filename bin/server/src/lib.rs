//! cito web gateway.
//!
//! An axum service that signs users in with GitHub OAuth, keeps one durable
//! session per GitHub account and gates protected pages on the
//! `session_token` cookie.

pub mod app;
pub mod auth;
pub mod config;
pub mod pages;
pub mod ws;

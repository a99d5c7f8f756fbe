//! Core domain types and utilities for the cito authentication gateway.
//!
//! This crate provides the identifier types and the error handling
//! foundation shared by the access library and the server.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ParseIdError, ProviderUserId, UserId};

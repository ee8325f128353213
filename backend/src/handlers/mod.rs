//! HTTP request handlers

pub mod analysis;
pub mod auth;
pub mod health;

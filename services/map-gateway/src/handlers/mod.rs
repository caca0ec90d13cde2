//! HTTP request handlers for the gateway.

pub mod catalog;
pub mod health;
pub mod maps;

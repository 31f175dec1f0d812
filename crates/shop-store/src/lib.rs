//! # Shop Store Library
//!
//! Product catalog and shopping carts persisted as JSON files, one actor per file.
//! This library exposes the core modules of the application for the binary and for
//! integration testing.

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod product_actor;

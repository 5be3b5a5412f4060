//! GeoCam library
//!
//! Photo collection core of the DENR GeoCam field app: the local store,
//! session folder reconstruction, detail views and the auth shell.

pub mod app;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod services;
pub mod storage;

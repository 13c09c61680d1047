//! ergotracker - 4-week 2K erg test training tracker
//!
//! A small device-scoped REST API over SQLite, a client that keeps the
//! per-device training state in sync with it, and the derivations
//! (streak, weekly stats, calendar) shown by the dashboard.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod program;
pub mod progress;
pub mod tui;

pub use db::Database;

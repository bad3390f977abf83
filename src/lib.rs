//! Fair volunteer rostering for recurring Tuesday/Thursday/Friday service.
//!
//! The [`roster`] module holds the assignment engine. Everything else
//! moves data between it and a directory of CSV sheets.

pub mod calendar;
pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod roster;
pub mod runlog;
pub mod tasks;
pub mod web;
pub mod workbook;

pub use config::RosterConfig;
pub use error::{Result, RosterError};

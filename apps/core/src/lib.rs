//! Conversational core of the CHAT companion for toddlers with late language
//! emergence: turn analysis, affect selection, conversation memory and session
//! analytics, driven by one actor per session.

pub mod actors;
pub mod analytics;
pub mod brain;
pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod persistence;
pub mod prompts;
pub mod telemetry;

pub use error::AppError;

#[cfg(test)]
mod tests;

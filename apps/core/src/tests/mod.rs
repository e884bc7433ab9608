//! Test Module
//!
//! Cross-module test suite for the CHAT core.
//!
//! ## Test Categories
//! - `brain_tests`: classification, affect selection and the turn analyzer
//! - `analytics_tests`: session statistics and their invariants
//! - `memory_tests`: conversation window and reply requests
//! - `session_tests`: session actor with mock collaborators
//! - `llm_tests`: HTTP generator against a mock server
//! - `config_tests`: environment configuration
//! - `persistence_tests`: JSON file store

pub mod llm_tests;
pub mod memory_tests;

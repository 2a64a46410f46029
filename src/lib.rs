//! Casegen - AI-assisted test case generation.
//!
//! This crate prompts a hosted generative-AI text API for structured test
//! cases, normalizes the untrusted reply into a strict record sequence, and
//! exports the records as CSV or JSON for import into test-management tools.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

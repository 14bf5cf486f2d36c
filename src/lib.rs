//! Community Path - Guided mentor conversation for students
//!
//! This crate runs the mentor interview that helps a student name a problem
//! in their community, understand it, and describe their role in solving it.
//! A scaffolding layer scores each answer and nudges the student toward
//! deeper reflection before moving on.
//!
//! - [`domain`] - question catalog, session state, scaffolding, conversation machine
//! - [`ports`] - language model, document store and clock interfaces
//! - [`adapters`] - Gemini, storage backends and HTTP routes
//! - [`application`] - per-student command handlers
//! - [`config`] - environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

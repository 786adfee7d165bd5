//! Core library for the `esperf` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration loading, randomized request templates, request
//! execution, the statistics aggregator and the worker pool. The primary
//! user-facing interface is the `esperf` command-line application.
pub mod app;
pub mod args;
pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;

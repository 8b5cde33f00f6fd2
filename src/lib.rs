//! Library half of the `canopy` binary.
//!
//! [`tree`] holds the concurrent builder and the renderer; the remaining
//! modules turn command-line flags and the config file into a build.

#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod cli;
pub mod config;
pub mod decorate;
pub mod ext;
pub mod tree;

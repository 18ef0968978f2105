//! routemap - static route table builder for plugin-based React apps
//!
//! routemap walks the JSX element tree of an app's entry file the way a
//! plugin framework's router does at runtime, and reports which route ref is
//! mounted at which path, its parent route ref, and the nested route objects.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Element tree, collectors and the project front end
//! - `integrations`: URL helpers for fetching source files from code hosts
//! - `issues`: Issue type definitions and reporting
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod integrations;
pub mod issues;
pub mod mcp;

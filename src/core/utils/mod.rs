//! Shared AST helpers for the collection and extraction passes.

pub mod helpers;

pub use helpers::*;

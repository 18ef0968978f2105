//! Helpers for reading source files from code hosts.

pub mod bitbucket;

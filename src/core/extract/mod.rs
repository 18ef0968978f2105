//! Extraction: turn the entry file's JSX into an `ElementTree`.

pub mod element_tree;

pub use element_tree::ElementTreeBuilder;

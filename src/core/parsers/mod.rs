//! Source file parsing (swc, TSX syntax).

pub mod jsx;

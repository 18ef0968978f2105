//! Collection: route refs and routable extensions declared across the project.
//!
//! Every source file is visited once by a `RegistryCollector`. The per-file
//! results are merged into `Registries`, which then produces the component
//! metadata table the route collectors read.

pub mod registry;
pub mod types;

pub use registry::RegistryCollector;
pub use types::*;

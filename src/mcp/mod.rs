//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the route table to AI assistants over stdio.
//!
//! ## Module Structure
//!
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameters and results

mod server;
pub mod types;

pub use server::{RouteMapMcpServer, run_server};

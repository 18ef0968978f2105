mod command_result;
pub mod init;
pub mod routes;

pub use command_result::*;

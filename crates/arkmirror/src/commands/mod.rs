//! CLI command implementations

pub mod explain;
pub mod init;
pub mod lower;

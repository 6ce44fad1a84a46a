//! Library side of the `kata` command-line tool.

pub mod logging;
pub mod session;

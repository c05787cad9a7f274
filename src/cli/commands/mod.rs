mod command_result;
pub mod init;
pub mod strip;

pub use command_result::*;

pub mod init;
pub mod modules;
pub mod render;

pub mod init;
pub mod page;
pub mod root;

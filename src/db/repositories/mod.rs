pub mod device;
pub mod security_log;
pub mod user;

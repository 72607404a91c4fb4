pub mod prelude;

pub mod devices;
pub mod security_logs;
pub mod users;

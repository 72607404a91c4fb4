pub use super::devices::Entity as Devices;
pub use super::security_logs::Entity as SecurityLogs;
pub use super::users::Entity as Users;

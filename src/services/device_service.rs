//! Domain service for a user's device history.
//!
//! Lists, registers and removes devices and exposes the security log that
//! records every registration and removal.

use thiserror::Error;

use crate::db::{Device, RemovedDevice, SecurityLogEntry};
use crate::domain::UserId;

/// Errors specific to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The database could not be reached at all.
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for DeviceError {
    fn from(err: anyhow::Error) -> Self {
        let message = format!("{err:#}");
        match err.downcast_ref::<sea_orm::DbErr>() {
            Some(sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_)) => {
                Self::Unavailable(message)
            }
            _ => Self::Database(message),
        }
    }
}

/// Request metadata captured when a device registers itself.
#[derive(Debug, Clone, Default)]
pub struct DeviceContext {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Domain service trait for device history.
#[async_trait::async_trait]
pub trait DeviceService: Send + Sync {
    /// All devices of the user, most recently active first.
    async fn list_devices(&self, user_id: UserId) -> Result<Vec<Device>, DeviceError>;

    /// Registers the calling device as the user's current device.
    ///
    /// The user agent is parsed best-effort; an unrecognised agent still
    /// registers, with unknown browser/OS.
    async fn register_device(
        &self,
        user_id: UserId,
        context: DeviceContext,
    ) -> Result<Device, DeviceError>;

    /// Removes a device by its id. Succeeds even if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Validation`] if `device_id` is not a device id.
    async fn remove_device(
        &self,
        user_id: UserId,
        device_id: &str,
        ip_address: Option<&str>,
    ) -> Result<RemovedDevice, DeviceError>;

    /// Most recent security log entries of the user, newest first.
    async fn security_log(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<SecurityLogEntry>, DeviceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeouts_map_to_unavailable() {
        let err = anyhow::Error::new(sea_orm::DbErr::ConnectionAcquire(
            sea_orm::ConnAcquireErr::Timeout,
        ))
        .context("Failed to query devices");

        match DeviceError::from(err) {
            DeviceError::Unavailable(msg) => assert!(msg.starts_with("Failed to query devices")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_failures_keep_message() {
        let err = anyhow::Error::new(sea_orm::DbErr::Custom("disk I/O error".to_string()))
            .context("Failed to insert device");

        match DeviceError::from(err) {
            DeviceError::Database(msg) => assert!(msg.contains("disk I/O error")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

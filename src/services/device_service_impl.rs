//! `SeaORM` implementation of the `DeviceService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{Device, NewDevice, RemovedDevice, SecurityLogEntry, Store};
use crate::domain::{DeviceId, UserId};
use crate::parser::parse_user_agent;
use crate::services::device_service::{DeviceContext, DeviceError, DeviceService};

pub struct SeaOrmDeviceService {
    store: Store,
}

impl SeaOrmDeviceService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DeviceService for SeaOrmDeviceService {
    async fn list_devices(&self, user_id: UserId) -> Result<Vec<Device>, DeviceError> {
        Ok(self.store.list_devices(user_id).await?)
    }

    async fn register_device(
        &self,
        user_id: UserId,
        context: DeviceContext,
    ) -> Result<Device, DeviceError> {
        let agent = parse_user_agent(context.user_agent.as_deref());

        let new_device = NewDevice {
            device_id: DeviceId::generate(),
            device_name: agent.device_name(),
            browser: agent.browser,
            os: agent.os,
            ip_address: context.ip_address,
        };

        let device = self
            .store
            .register_current_device(user_id, new_device)
            .await?;

        metrics::counter!("devices_registered_total").increment(1);
        info!(
            user_id = %user_id,
            device_id = %device.device_id,
            device_name = %device.device_name,
            "Registered new current device"
        );

        Ok(device)
    }

    async fn remove_device(
        &self,
        user_id: UserId,
        device_id: &str,
        ip_address: Option<&str>,
    ) -> Result<RemovedDevice, DeviceError> {
        if device_id.trim().is_empty() {
            return Err(DeviceError::Validation("deviceId is required".to_string()));
        }

        let device_id: DeviceId = device_id
            .parse()
            .map_err(|e| DeviceError::Validation(format!("Invalid deviceId: {e}")))?;

        let removed = self
            .store
            .remove_device(user_id, device_id, ip_address)
            .await?;

        metrics::counter!("devices_removed_total").increment(1);
        info!(
            user_id = %user_id,
            device_id = %device_id,
            rows_deleted = removed.rows_deleted,
            "Removed device"
        );

        Ok(removed)
    }

    async fn security_log(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<SecurityLogEntry>, DeviceError> {
        Ok(self.store.list_security_logs(user_id, limit).await?)
    }
}

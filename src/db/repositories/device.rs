use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use super::security_log;
use crate::domain::{DeviceId, SecurityEvent, UserId};
use crate::entities::{devices, prelude::*};

pub use crate::entities::devices::Model as Device;

/// Fields of a device about to be registered.
#[derive(Debug, Clone)]
pub struct NewDevice {
    pub device_id: DeviceId,
    pub device_name: String,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub ip_address: Option<String>,
}

/// Result of removing a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedDevice {
    pub rows_deleted: u64,
}

pub struct DeviceRepository {
    conn: DatabaseConnection,
}

impl DeviceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All devices of a user, most recently active first.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Device>> {
        Devices::find()
            .filter(devices::Column::UserId.eq(user_id.value()))
            .order_by_desc(devices::Column::LastActive)
            .order_by_desc(devices::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query devices")
    }

    /// Marks every existing device of the user as not current, inserts the new
    /// one as current and appends a `new_device_added` entry, all in one
    /// transaction. Either everything is written or nothing is.
    pub async fn register_current(&self, user_id: UserId, device: NewDevice) -> Result<Device> {
        let txn = self
            .conn
            .begin()
            .await
            .context("Failed to begin device registration")?;

        let cleared = Devices::update_many()
            .col_expr(devices::Column::IsCurrent, Expr::value(false))
            .filter(devices::Column::UserId.eq(user_id.value()))
            .filter(devices::Column::IsCurrent.eq(true))
            .exec(&txn)
            .await
            .context("Failed to clear current device flag")?;

        debug!(
            user_id = %user_id,
            cleared = cleared.rows_affected,
            "Cleared current device flag"
        );

        let device_id = device.device_id.to_string();
        let active_model = devices::ActiveModel {
            user_id: Set(user_id.value()),
            device_id: Set(device_id.clone()),
            device_name: Set(device.device_name.clone()),
            browser: Set(device.browser.clone()),
            os: Set(device.os.clone()),
            ip_address: Set(device.ip_address.clone()),
            is_current: Set(true),
            last_active: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let inserted = active_model
            .insert(&txn)
            .await
            .context("Failed to insert device")?;

        let event = SecurityEvent::NewDeviceAdded {
            device_id,
            device_name: device.device_name,
            browser: device.browser,
            os: device.os,
        };
        security_log::append(&txn, user_id, &event, device.ip_address.as_deref()).await?;

        txn.commit()
            .await
            .context("Failed to commit device registration")?;

        Ok(inserted)
    }

    /// Deletes the user's device with this id, if any, and appends a
    /// `device_removed` entry regardless of whether a row matched.
    pub async fn remove(
        &self,
        user_id: UserId,
        device_id: DeviceId,
        ip_address: Option<&str>,
    ) -> Result<RemovedDevice> {
        let device_id = device_id.to_string();

        let txn = self
            .conn
            .begin()
            .await
            .context("Failed to begin device removal")?;

        let deleted = Devices::delete_many()
            .filter(devices::Column::UserId.eq(user_id.value()))
            .filter(devices::Column::DeviceId.eq(device_id.as_str()))
            .exec(&txn)
            .await
            .context("Failed to delete device")?;

        let event = SecurityEvent::DeviceRemoved { device_id };
        security_log::append(&txn, user_id, &event, ip_address).await?;

        txn.commit()
            .await
            .context("Failed to commit device removal")?;

        Ok(RemovedDevice {
            rows_deleted: deleted.rows_affected,
        })
    }
}

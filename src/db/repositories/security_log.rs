use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::{SecurityEvent, UserId};
use crate::entities::{prelude::*, security_logs};

pub use crate::entities::security_logs::Model as SecurityLogEntry;

/// Appends one entry on the given connection or transaction.
pub async fn append<C: ConnectionTrait>(
    db: &C,
    user_id: UserId,
    event: &SecurityEvent,
    ip_address: Option<&str>,
) -> Result<SecurityLogEntry> {
    let details = serde_json::to_string(event).context("Failed to encode security event")?;

    let active_model = security_logs::ActiveModel {
        user_id: Set(user_id.value()),
        event_type: Set(event.event_type().as_str().to_string()),
        details: Set(details),
        ip_address: Set(ip_address.map(str::to_string)),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };

    active_model
        .insert(db)
        .await
        .context("Failed to append security log entry")
}

/// Read side of the security log. Entries are never updated or deleted.
pub struct SecurityLogRepository {
    conn: DatabaseConnection,
}

impl SecurityLogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_for_user(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<SecurityLogEntry>> {
        SecurityLogs::find()
            .filter(security_logs::Column::UserId.eq(user_id.value()))
            .order_by_desc(security_logs::Column::CreatedAt)
            .order_by_desc(security_logs::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to query security logs")
    }
}

use serde::{Deserialize, Serialize};

use crate::db::{Device, SecurityLogEntry};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeviceListResponse {
    pub devices: Vec<Device>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceResponse {
    pub success: bool,
    pub device_id: String,
}

#[derive(Debug, Serialize)]
pub struct RemoveDeviceResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveDeviceRequest {
    pub device_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SecurityLogQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SecurityLogDto {
    pub id: i64,
    pub event_type: String,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub created_at: String,
}

impl From<SecurityLogEntry> for SecurityLogDto {
    fn from(entry: SecurityLogEntry) -> Self {
        // Entries are written as JSON; fall back to the raw text for anything else.
        let details = serde_json::from_str(&entry.details)
            .unwrap_or(serde_json::Value::String(entry.details));

        Self {
            id: entry.id,
            event_type: entry.event_type,
            details,
            ip_address: entry.ip_address,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SecurityLogResponse {
    pub logs: Vec<SecurityLogDto>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: String,
    pub uptime: u64,
    pub database: bool,
}

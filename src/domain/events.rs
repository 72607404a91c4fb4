//! Security events recorded in the append-only security log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a security log entry, as stored in the `event_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityEventType {
    NewDeviceAdded,
    DeviceRemoved,
}

impl SecurityEventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewDeviceAdded => "new_device_added",
            Self::DeviceRemoved => "device_removed",
        }
    }
}

impl fmt::Display for SecurityEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_device_added" => Ok(Self::NewDeviceAdded),
            "device_removed" => Ok(Self::DeviceRemoved),
            other => Err(format!("Unknown security event type: {other}")),
        }
    }
}

/// A security-relevant event together with its detail payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecurityEvent {
    NewDeviceAdded {
        device_id: String,
        device_name: String,
        browser: Option<String>,
        os: Option<String>,
    },
    DeviceRemoved {
        device_id: String,
    },
}

impl SecurityEvent {
    #[must_use]
    pub const fn event_type(&self) -> SecurityEventType {
        match self {
            Self::NewDeviceAdded { .. } => SecurityEventType::NewDeviceAdded,
            Self::DeviceRemoved { .. } => SecurityEventType::DeviceRemoved,
        }
    }

    #[must_use]
    pub fn device_id(&self) -> &str {
        match self {
            Self::NewDeviceAdded { device_id, .. } | Self::DeviceRemoved { device_id } => device_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_matches_serde_tag() {
        let event = SecurityEvent::DeviceRemoved {
            device_id: "abc".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.event_type().as_str());
        assert_eq!(json["device_id"], "abc");
    }

    #[test]
    fn test_event_type_parse() {
        assert_eq!(
            "new_device_added".parse::<SecurityEventType>().unwrap(),
            SecurityEventType::NewDeviceAdded
        );
        assert!("device_renamed".parse::<SecurityEventType>().is_err());
    }
}

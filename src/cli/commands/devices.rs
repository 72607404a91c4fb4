//! Device history command handler

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::db::{Device, Store};
use crate::ui::{ErrorBoundary, Icon, Rendered};

pub async fn cmd_list_devices(config: &Config, username: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(user) = store.get_user_by_username(username).await? else {
        println!("User '{username}' not found.");
        return Ok(());
    };

    let devices = store.list_devices(user.id).await?;

    if devices.is_empty() {
        println!("No devices registered for {username}.");
        return Ok(());
    }

    let mut boundary = ErrorBoundary::new();
    match boundary.render(|| render_device_table(&devices, Utc::now())) {
        Rendered::Content(table) | Rendered::Fallback(table) => print!("{table}"),
        Rendered::Panel(panel) => {
            println!("{} {panel}", Icon::Warning.glyph());
        }
    }

    Ok(())
}

fn device_icon(device: &Device) -> Icon {
    match device.os.as_deref() {
        Some("iOS" | "Android" | "Windows Phone") => Icon::Smartphone,
        Some(_) => Icon::Laptop,
        None => Icon::Globe,
    }
}

fn format_age(last_active: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(last_active);
    if age.num_days() > 0 {
        format!("{}d ago", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h ago", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{}m ago", age.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Formats devices as a text table. Fails on a malformed `last_active`.
pub fn render_device_table(
    devices: &[Device],
    now: DateTime<Utc>,
) -> Result<String, chrono::ParseError> {
    let mut out = format!("Devices ({} total)\n{:-<70}\n", devices.len(), "");

    for device in devices {
        let last_active = DateTime::parse_from_rfc3339(&device.last_active)?.with_timezone(&Utc);
        let marker = if device.is_current {
            Icon::Check.glyph()
        } else {
            " "
        };

        out.push_str(&format!(
            "{marker} {} {} [{}]\n  ID: {} | IP: {}\n",
            device_icon(device).glyph(),
            device.device_name,
            format_age(last_active, now),
            device.device_id,
            device.ip_address.as_deref().unwrap_or("unknown")
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, os: Option<&str>, last_active: &str, is_current: bool) -> Device {
        Device {
            id: 1,
            user_id: 1,
            device_id: "0b9c3c7e-5d0f-4a55-9d7e-0f1d2c3b4a59".to_string(),
            device_name: name.to_string(),
            browser: Some("Chrome".to_string()),
            os: os.map(str::to_string),
            ip_address: None,
            is_current,
            last_active: last_active.to_string(),
        }
    }

    #[test]
    fn test_table_marks_current_device() {
        let now = DateTime::parse_from_rfc3339("2026-03-02T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let devices = vec![
            device("Chrome on Android", Some("Android"), "2026-03-02T11:30:00Z", true),
            device("Chrome on Windows", Some("Windows"), "2026-02-27T12:00:00Z", false),
        ];

        let table = render_device_table(&devices, now).unwrap();
        assert!(table.contains("Devices (2 total)"));
        assert!(table.contains("✓ 📱 Chrome on Android [30m ago]"));
        assert!(table.contains("  💻 Chrome on Windows [3d ago]"));
        assert!(table.contains("IP: unknown"));
    }

    #[test]
    fn test_malformed_timestamp_trips_boundary() {
        let devices = vec![device("Chrome on Windows", None, "yesterday", true)];

        let mut boundary = ErrorBoundary::new();
        let out = boundary.render(|| render_device_table(&devices, Utc::now()));
        assert!(matches!(out, Rendered::Panel(_)));
        assert!(boundary.is_errored());
    }
}

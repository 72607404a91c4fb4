use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, header},
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{DEFAULT_LOG_LIMIT, validate_limit};
use super::{
    ApiError, AppState, DeviceListResponse, RegisterDeviceResponse, RemoveDeviceRequest,
    RemoveDeviceResponse, SecurityLogDto, SecurityLogQuery, SecurityLogResponse,
};
use crate::services::DeviceContext;

/// GET /devices
pub async fn list_devices(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<DeviceListResponse>, ApiError> {
    let devices = state.device_service().list_devices(user.id).await?;
    Ok(Json(DeviceListResponse { devices }))
}

/// POST /devices
/// Registers the calling browser as the user's current device.
pub async fn register_device(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    headers: HeaderMap,
) -> Result<Json<RegisterDeviceResponse>, ApiError> {
    let context = DeviceContext {
        user_agent: header_str(&headers, header::USER_AGENT.as_str()).map(str::to_string),
        ip_address: client_ip(&headers),
    };

    let device = state
        .device_service()
        .register_device(user.id, context)
        .await?;

    Ok(Json(RegisterDeviceResponse {
        success: true,
        device_id: device.device_id,
    }))
}

/// DELETE /devices
/// Body: `{ "deviceId": "..." }`
pub async fn remove_device(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    headers: HeaderMap,
    payload: Result<Json<RemoveDeviceRequest>, JsonRejection>,
) -> Result<Json<RemoveDeviceResponse>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::validation(format!("Invalid request body: {e}")))?;

    let ip_address = client_ip(&headers);
    state
        .device_service()
        .remove_device(user.id, &payload.device_id, ip_address.as_deref())
        .await?;

    Ok(Json(RemoveDeviceResponse { success: true }))
}

/// GET /security-logs
pub async fn list_security_logs(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    query: Result<Query<SecurityLogQuery>, QueryRejection>,
) -> Result<Json<SecurityLogResponse>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::validation(format!("Invalid query string: {e}")))?;
    let limit = validate_limit(query.limit.unwrap_or(DEFAULT_LOG_LIMIT))?;

    let entries = state
        .device_service()
        .security_log(user.id, limit as u64)
        .await?;

    Ok(Json(SecurityLogResponse {
        logs: entries.into_iter().map(SecurityLogDto::from).collect(),
    }))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Client address as reported by the reverse proxy: the first hop of
/// `X-Forwarded-For`, else `X-Real-IP`.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("198.51.100.4, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.1"));
        assert_eq!(client_ip(&headers).as_deref(), Some("198.51.100.4"));
    }

    #[test]
    fn test_client_ip_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(" "));
        headers.insert("x-real-ip", HeaderValue::from_static("192.0.2.9"));
        assert_eq!(client_ip(&headers).as_deref(), Some("192.0.2.9"));

        assert!(client_ip(&HeaderMap::new()).is_none());
    }
}

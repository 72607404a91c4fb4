pub mod auth_service;
pub mod auth_service_impl;
pub mod device_service;
pub mod device_service_impl;

pub use auth_service::{AuthError, AuthService, LoginResult};
pub use auth_service_impl::SeaOrmAuthService;
pub use device_service::{DeviceContext, DeviceError, DeviceService};
pub use device_service_impl::SeaOrmDeviceService;

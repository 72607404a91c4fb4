mod devices;
mod user;

pub use devices::{cmd_list_devices, render_device_table};
pub use user::{cmd_add_user, cmd_rotate_api_key, cmd_set_password};

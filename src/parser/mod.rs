pub mod user_agent;

pub use user_agent::{UserAgentInfo, parse_user_agent};

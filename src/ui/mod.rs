//! Presentation helpers shared by the front ends.

pub mod error_boundary;
pub mod icons;

pub use error_boundary::{BoundaryState, CapturedError, ErrorBoundary, FallbackPanel, Rendered};
pub use icons::Icon;

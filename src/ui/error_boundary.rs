//! Render error boundary.
//!
//! An [`ErrorBoundary`] wraps a fallible render step. While `Normal` it runs
//! the step and returns its output; the first failure (an `Err` or a panic)
//! is captured and the boundary switches to `Errored`, returning a fallback
//! instead. It stays `Errored`, without running the step again, until
//! [`ErrorBoundary::retry`] is called.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::warn;

/// What went wrong inside the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedError<E> {
    Failed(E),
    Panicked(String),
}

impl<E: fmt::Display> fmt::Display for CapturedError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(err) => write!(f, "{err}"),
            Self::Panicked(msg) => write!(f, "panicked: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryState<E> {
    Normal,
    Errored(CapturedError<E>),
}

/// Default panel shown when no custom fallback is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPanel {
    pub title: &'static str,
    pub message: String,
    pub retry_label: &'static str,
}

impl fmt::Display for FallbackPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.message)?;
        write!(f, "[{}]", self.retry_label)
    }
}

/// Output of one render pass through the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<V> {
    Content(V),
    Fallback(V),
    Panel(FallbackPanel),
}

impl<V> Rendered<V> {
    #[must_use]
    pub const fn is_content(&self) -> bool {
        matches!(self, Self::Content(_))
    }
}

type FallbackFn<V, E> = Box<dyn Fn(&CapturedError<E>) -> V + Send + Sync>;

pub struct ErrorBoundary<V, E> {
    state: BoundaryState<E>,
    fallback: Option<FallbackFn<V, E>>,
}

impl<V, E> Default for ErrorBoundary<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> ErrorBoundary<V, E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: BoundaryState::Normal,
            fallback: None,
        }
    }

    /// Uses `fallback` instead of the default panel while errored.
    #[must_use]
    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&CapturedError<E>) -> V + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(fallback));
        self
    }

    #[must_use]
    pub const fn state(&self) -> &BoundaryState<E> {
        &self.state
    }

    #[must_use]
    pub const fn is_errored(&self) -> bool {
        matches!(self.state, BoundaryState::Errored(_))
    }

    #[must_use]
    pub const fn error(&self) -> Option<&CapturedError<E>> {
        match &self.state {
            BoundaryState::Errored(err) => Some(err),
            BoundaryState::Normal => None,
        }
    }

    /// Clears the captured error so the next render attempts the child again.
    /// Returns whether there was an error to clear.
    pub fn retry(&mut self) -> bool {
        let was_errored = self.is_errored();
        self.state = BoundaryState::Normal;
        was_errored
    }
}

impl<V, E: fmt::Display> ErrorBoundary<V, E> {
    pub fn render<F>(&mut self, child: F) -> Rendered<V>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let BoundaryState::Errored(err) = &self.state {
            return self.fallback_for(err);
        }

        let captured = match catch_unwind(AssertUnwindSafe(child)) {
            Ok(Ok(view)) => return Rendered::Content(view),
            Ok(Err(err)) => CapturedError::Failed(err),
            Err(payload) => CapturedError::Panicked(panic_message(payload.as_ref())),
        };

        warn!(error = %captured, "Render failed, showing fallback");
        let rendered = self.fallback_for(&captured);
        self.state = BoundaryState::Errored(captured);
        rendered
    }

    fn fallback_for(&self, err: &CapturedError<E>) -> Rendered<V> {
        match &self.fallback {
            Some(fallback) => Rendered::Fallback(fallback(err)),
            None => Rendered::Panel(FallbackPanel {
                title: "Something went wrong",
                message: err.to_string(),
                retry_label: "Try again",
            }),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_normal_render_passes_content_through() {
        let mut boundary: ErrorBoundary<String, String> = ErrorBoundary::new();
        let out = boundary.render(|| Ok("hello".to_string()));
        assert_eq!(out, Rendered::Content("hello".to_string()));
        assert_eq!(boundary.state(), &BoundaryState::Normal);
    }

    #[test]
    fn test_failure_shows_default_panel_and_sticks() {
        let mut boundary: ErrorBoundary<String, String> = ErrorBoundary::new();
        let out = boundary.render(|| Err("boom".to_string()));

        match out {
            Rendered::Panel(panel) => {
                assert_eq!(panel.message, "boom");
                assert_eq!(panel.retry_label, "Try again");
            }
            other => panic!("expected panel, got {other:?}"),
        }
        assert!(boundary.is_errored());

        // While errored the child is not attempted again
        let calls = Cell::new(0);
        let out = boundary.render(|| {
            calls.set(calls.get() + 1);
            Ok("never".to_string())
        });
        assert!(!out.is_content());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_custom_fallback_is_used() {
        let mut boundary: ErrorBoundary<String, String> =
            ErrorBoundary::new().with_fallback(|err| format!("custom: {err}"));

        let out = boundary.render(|| Err("broken".to_string()));
        assert_eq!(out, Rendered::Fallback("custom: broken".to_string()));
    }

    #[test]
    fn test_panics_are_captured() {
        let mut boundary: ErrorBoundary<String, String> = ErrorBoundary::new();
        let out = boundary.render(|| panic!("render exploded"));

        assert!(matches!(out, Rendered::Panel(_)));
        assert_eq!(
            boundary.error(),
            Some(&CapturedError::Panicked("render exploded".to_string()))
        );
    }

    #[test]
    fn test_retry_reattempts_child() {
        let mut boundary: ErrorBoundary<String, String> = ErrorBoundary::new();
        boundary.render(|| Err("flaky".to_string()));
        assert!(boundary.retry());
        assert!(!boundary.is_errored());

        let out = boundary.render(|| Ok("recovered".to_string()));
        assert_eq!(out, Rendered::Content("recovered".to_string()));
        assert!(!boundary.retry());
    }

    #[test]
    fn test_retry_with_persistent_defect_errors_again() {
        let mut boundary: ErrorBoundary<String, String> = ErrorBoundary::new();
        boundary.render(|| Err("still broken".to_string()));
        boundary.retry();

        let out = boundary.render(|| Err("still broken".to_string()));
        assert!(matches!(out, Rendered::Panel(_)));
        assert!(boundary.is_errored());
    }
}

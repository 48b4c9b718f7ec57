//! Typed result of a best-effort pipeline step.

/// Outcome of a step whose failure must not abort the request.
///
/// `Degraded` carries a substitute value the caller can still use;
/// `Failed` carries nothing but the reason.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<T> {
    Ok(T),
    Degraded { value: T, reason: String },
    Failed { reason: String },
}

impl<T> StepOutcome<T> {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, StepOutcome::Ok(_))
    }

    /// The usable value, if the step produced one (directly or as a substitute).
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            StepOutcome::Ok(value) | StepOutcome::Degraded { value, .. } => Some(value),
            StepOutcome::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            StepOutcome::Ok(value) | StepOutcome::Degraded { value, .. } => Some(value),
            StepOutcome::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            StepOutcome::Ok(_) => None,
            StepOutcome::Degraded { reason, .. } | StepOutcome::Failed { reason } => Some(reason),
        }
    }

    /// Short label used in logs and response headers.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            StepOutcome::Ok(_) => "ok",
            StepOutcome::Degraded { .. } => "degraded",
            StepOutcome::Failed { .. } => "failed",
        }
    }
}

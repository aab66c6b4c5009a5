//! Simulated Kubernetes failures.

/// Error type reported when the caller names no fault.
pub const DEFAULT_ERROR_TYPE: &str = "pod_crash";

/// A simulated cluster failure selected by `error_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KubernetesFault {
    /// The backing pod crashed; the service is unavailable.
    PodCrash,
    /// Anything the simulator does not recognise.
    Unknown(String),
}

impl KubernetesFault {
    pub fn from_error_type(error_type: &str) -> Self {
        match error_type {
            DEFAULT_ERROR_TYPE => KubernetesFault::PodCrash,
            other => KubernetesFault::Unknown(other.to_string()),
        }
    }

    pub fn error_type(&self) -> &str {
        match self {
            KubernetesFault::PodCrash => DEFAULT_ERROR_TYPE,
            KubernetesFault::Unknown(other) => other,
        }
    }
}

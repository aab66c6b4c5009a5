//! Fault simulation subsystem.
//!
//! Stateless, single-shot mappings from a query parameter to an outcome.
//! Nothing here suspends or holds state between requests.
//!
//! # Data Flow
//! ```text
//! GET /api/kubernetes?error_type=T → kubernetes.rs → PodCrash (503) | Unknown (400)
//! GET /api/chaos?failure_rate=F    → random.rs     → Failed (500)   | Survived (200)
//! ```

pub mod kubernetes;
pub mod random;

pub use kubernetes::KubernetesFault;
pub use random::{roll, roll_with, ChaosOutcome};

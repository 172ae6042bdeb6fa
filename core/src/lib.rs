//! phonetree-core: escalation phone trees for event departments.
//!
//! For every configured department the resolver produces an ordered list
//! of phone-number groups: who to call first, who to call next, and so on.
//! Targets come from three places: literal numbers in the config, whoever
//! is on an active shift matching a job-name pattern, and named people
//! looked up in the staffing directory.

pub mod cache;
pub mod clock;
pub mod config;
pub mod directory;
pub mod error;
pub mod orchestrator;
pub mod phone;
pub mod resolver;
pub mod time_window;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DepartmentConfig, DirectoryConfig, EscalationStep, PhonetreeConfig};
pub use directory::{http::HttpDirectory, memory::InMemoryDirectory, RemoteDirectory};
pub use error::{EscalationError, EscalationResult};
pub use orchestrator::EscalationPlan;
pub use resolver::{EscalationResolver, ResolutionWarning};

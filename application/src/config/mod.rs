//! Application-level configuration.
//!
//! - [`SchedulerParams`] — policy construction options (strategy, step budget, shares)

pub mod scheduler_params;

pub use scheduler_params::SchedulerParams;

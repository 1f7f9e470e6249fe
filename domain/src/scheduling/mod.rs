//! Turn-scheduling domain
//!
//! Pure state and math behind the scheduling policies. Nothing here performs
//! I/O or logs; the application layer wraps these types with the shared
//! conversation state and tracing.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  One turn                                                  │
//! ├────────────────────────────────────────────────────────────┤
//! │  select speaker ──► participant acts ──► append history    │
//! │        ▲                                        │          │
//! │        │                                        ▼          │
//! │        └──────── continue ◄──── termination decision       │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod ledger;
pub mod step_budget;
pub mod strategy;
pub mod target_share;

pub use ledger::{ParticipantStats, ParticipationLedger, ScoredCandidate};
pub use step_budget::{StepBudget, TerminationDecision};
pub use strategy::SelectionStrategy;
pub use target_share::{SHARE_TOLERANCE, TargetShares};

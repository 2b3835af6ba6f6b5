//! # Smartplan Core Library
//!
//! Core business logic for Smartplan, a personal task scheduler that
//! assigns tasks to time slots using a circadian energy model, task
//! priority, and deadline proximity. The CLI binary is a thin layer over
//! this library.
//!
//! ## Architecture
//!
//! - **Energy model**: maps hours of the day to an energy capacity and
//!   answers peak/window/alignment queries
//! - **Scheduler**: greedy slot selection driven by a hand-tuned
//!   per-slot scoring heuristic
//! - **Recommendations**: duration/energy defaults derived from a
//!   bounded average over completion history
//! - **Storage**: JSON task store and TOML-based configuration
//! - **Sync**: Google Calendar push over OAuth2
//!
//! ## Key Components
//!
//! - [`EnergyModel`]: circadian capacity curve
//! - [`Scheduler`]: greedy slot-selection engine
//! - [`TaskManager`]: facade tying the engine to persistence
//! - [`RecommendationEngine`]: history-driven defaults

pub mod energy;
pub mod error;
pub mod manager;
pub mod metrics;
pub mod recommend;
pub mod scheduler;
pub mod scoring;
pub mod storage;
pub mod sync;
pub mod task;

pub use energy::{EnergyModel, EnergyPoint};
pub use error::{ConfigError, CoreError, StoreError, SyncError, ValidationError};
pub use manager::TaskManager;
pub use recommend::{HistoryRecord, Insights, RecommendationEngine};
pub use scheduler::{Assignment, Scheduler};
pub use scoring::TaskScorer;
pub use storage::{Config, TaskStore};
pub use sync::GoogleCalendarSync;
pub use task::{EnergyLevel, Priority, Task};

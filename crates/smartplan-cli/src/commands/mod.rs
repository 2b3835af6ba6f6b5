pub mod energy;
pub mod insights;
pub mod schedule;
pub mod sync;
pub mod tasks;

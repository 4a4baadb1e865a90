//! Command implementations.

pub mod export;
pub mod list;
pub mod logs;
pub mod psql;
pub mod stop;
pub mod up;

#[cfg(test)]
pub mod testing;

pub use export::run_export;
pub use list::run_list;
pub use logs::run_logs;
pub use psql::run_psql;
pub use stop::run_stop;
pub use up::{UpOptions, UpOutcome, run_up};

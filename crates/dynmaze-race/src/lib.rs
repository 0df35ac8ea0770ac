//! Step-synchronous races between pathfinding strategies over a maze that
//! may change while the race runs.
//!
//! ```no_run
//! use dynmaze_core::Cell;
//! use dynmaze_race::{Edit, Race, RaceConfig};
//!
//! let config = RaceConfig::new(21, 21)
//!     .with_seed(42)
//!     .with_edit(Edit::close(3, Cell::new(0, 0), Cell::new(0, 1)));
//! let mut race = Race::new(config)?;
//! let results = race.run()?;
//! if let Some(winner) = results.winner() {
//!     println!("{} wins after {} expansions", winner.strategy, winner.expanded);
//! }
//! # Ok::<(), dynmaze_race::RaceError>(())
//! ```

mod bench;
mod cancel;
mod config;
mod error;
mod events;
mod mutator;
mod race;
mod result;

pub use bench::{BenchReport, benchmark, benchmark_all};
pub use cancel::CancelToken;
pub use config::{ConfigError, Edit, RaceConfig};
pub use error::RaceError;
pub use events::{AbortReason, RaceEvent};
pub use mutator::{AppliedEdit, Mutator};
pub use race::{Race, RaceState};
pub use result::{RaceOutcome, RaceResult, RaceResults};

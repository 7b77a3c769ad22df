//! `sir-output` — simulation output writers for the crowd SIR simulation.
//!
//! | Backend | Files created                                     |
//! |---------|---------------------------------------------------|
//! | CSV     | `sir_information.csv`, `group_counts.csv`         |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `sir_sim::SimObserver` for any
//! group model whose groups are [`SirGroup`](sir_model::SirGroup)s.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sir_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{GroupCountRow, PedestrianGroupRow};
pub use writer::OutputWriter;

//! # norsand-io
//!
//! The I/O boundary between the toolkit and the external NorSand solver.
//!
//! - [`contract`] — the per-run input descriptor the solver consumes
//! - [`parse`] — readers for the solver's parameter echo and data table
//! - [`store`] — run stores that load a run's parameters and stress path
//! - [`validator`] — descriptor checks run before anything is written

pub mod contract;
pub mod parse;
pub mod store;
pub mod validator;

pub use contract::{RunDescriptor, SimulationSetup, SolverOptions};
pub use store::{DirectoryRunStore, MemoryRunStore, RunRecord, RunStore};

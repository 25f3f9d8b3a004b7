//! Guess generation driver.
//!
//! Feeds seed words through every rule of a loaded rule set and collects the
//! distinct mutations into a bounded candidate list.

pub mod seeds;
pub mod driver;

pub use seeds::select_seeds;
pub use driver::MutationDriver;

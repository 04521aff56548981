//! Command implementations for the CLI.

mod fragments;
mod tangle;

pub use fragments::{describe_fragments, fragments, FragmentsOptions};
pub use tangle::{tangle, tangle_source, TangleCommandOptions};

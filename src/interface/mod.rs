//! Interface between the command line and the tangling engine.

mod context;

pub use context::Context;

//! Webtangle - tangling for WEB-style literate documents
//!
//! A literate document interleaves prose chunks with named code fragments:
//!
//! ```text
//! @ Documentation chunks start with `@` and are discarded.
//!
//! @<*@>=
//! def main():
//!     @<main body@>
//!
//! @<main body@>=
//! print(@<greeting@>)
//!
//! @<greeting@>= "hello"
//! ```
//!
//! Tangling starts at a root fragment and replaces references until none are
//! left. A reference on a line of its own pulls in every definition of the
//! fragment with the line's indentation; a reference inside a line is replaced
//! by the fragment's single line, stripped.
//!
//! # Example
//!
//! ```no_run
//! use webtangle::config::Syntax;
//! use webtangle::model::{tangle, TangleOptions};
//! use webtangle::readers::parse_document;
//!
//! let source = std::fs::read_to_string("program.w").unwrap();
//! let store = parse_document(&source, None, &Syntax::default()).unwrap();
//! let text = tangle(&store, "*", &TangleOptions::default()).unwrap();
//! print!("{}", text);
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod interface;
pub mod model;
pub mod readers;
pub mod text_location;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::{Config, Markers, Syntax};
pub use errors::{Result, WebtangleError};
pub use interface::Context;
pub use model::{tangle, CodeFragment, FragmentName, FragmentStore, TangleOptions};
pub use readers::parse_document;

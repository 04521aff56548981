//! Fragment store and the expansion engine.

mod code_fragment;
mod cycles;
mod fragment_name;
mod fragment_store;
mod inline;
mod multiline;
mod tangle;

pub use code_fragment::CodeFragment;
pub use cycles::{check_reference_cycles, CycleDetector};
pub use fragment_name::FragmentName;
pub use fragment_store::{FragmentStore, FragmentStoreBuilder};
pub use inline::{inline_expand, InlineExpander};
pub use multiline::{expand_lines, multiline_expand, source_line_comment, MultilineExpansion};
pub use tangle::{tangle, TangleOptions};

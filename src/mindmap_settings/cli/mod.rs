//! # CLI Behavior
//!
//! One possible UI client for the settings library. This is the only place
//! that knows about terminal I/O, exit codes and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the
//! library.
//!
//! ## Scope Selection
//!
//! `get`, `set` and `unset` edit the document's header by default. Passing
//! `--block N` targets the Nth mind-map code block instead (zero-based, in
//! document order, as listed by `blocks`). Global preferences are never
//! stored in a document; `config` manages them.
//!
//! ## Values
//!
//! Values are read as YAML scalars, so `false` is a boolean and `240` a
//! number. Quote a value (`'"240"'`) to force a string.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. `-v` enables debug output and
//! `-vv` trace output; `RUST_LOG` overrides both.

mod commands;
mod logging;
mod print;
mod setup;

pub use commands::run;

//! # Mindmap Settings Architecture
//!
//! Resolves the settings that control how a mind-map code block renders, and
//! writes edits back into the markdown they came from. Settings live in three
//! scopes (global preferences, the document's YAML header, and a header inside
//! the code block itself) and are merged per rendering pass.
//!
//! Like any UI-agnostic library, the core takes Rust values and returns Rust
//! values. The `mmset` binary is one client of it; an editor plugin is another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (ordinals → BlockIds, raw → values)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One operation per module, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (codec, scopes, height, writer, live, session)        │
//! │  - Frontmatter parsing and stringifying                     │
//! │  - Scope merge, drag-resize tracking, write-through edits   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Document Layer (document/)                                 │
//! │  - Abstract HostDocument trait                              │
//! │  - FileDocument (production), InMemoryDocument (testing)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: The Document Is the Source of Truth
//!
//! Nothing caches a section's text between operations. Each write resolves
//! the section's current line range, re-reads it, and replaces it whole, so
//! an edit to the file header never leaves a code block pointing at stale
//! lines.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`codec`]: Frontmatter split, parse and stringify
//! - [`scopes`]: Precedence merge of the three scopes
//! - [`height`]: Drag-resize state with snap-to-no-change
//! - [`writer`]: Rewrites a section's header
//! - [`live`]: Settings handles that write through on mutation
//! - [`session`]: Per-block settings manager
//! - [`document`]: Host document abstraction and implementations
//! - [`config`]: Stored global settings
//! - [`model`]: Core data types (`Scope`, `BlockId`, `MindmapSettings`)
//! - [`error`]: Error types
//! - `cli`: Argument parsing, printing and logging for the binary (not part of the lib API)

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod height;
pub mod live;
pub mod model;
pub mod scopes;
pub mod session;
pub mod writer;

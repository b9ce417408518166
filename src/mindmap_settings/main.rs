//! # mmset
//!
//! Command-line client for the settings library. The CLI lives in `cli/`;
//! this file only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! mmset blocks notes.md                     # list mind-map blocks
//! mmset show notes.md --block 0             # effective settings as JSON
//! mmset set notes.md --block 0 height 240   # write-through edit
//! mmset resize notes.md --block 0 -- 10 -5  # replay a drag, commit once
//! mmset config lockCanvasScroll false       # global preference
//! ```
//!
//! Documents are edited in memory and written back only when an operation
//! changed their text.

use colored::Colorize;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

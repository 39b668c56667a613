//! # Adopta CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  CLI Layer (crates/adopta/src/cli/)           │
//! │  - clap argument parsing (setup.rs)           │
//! │  - config, logging, dispatch (commands.rs)    │
//! │  - terminal rendering (render.rs)             │
//! └───────────────────────────────────────────────┘
//!                         │
//!                         ▼
//! ┌───────────────────────────────────────────────┐
//! │  Marketplace facade (adoptaapp::api)          │
//! └───────────────────────────────────────────────┘
//!                         │
//!                         ▼
//! ┌───────────────────────────────────────────────┐
//! │  Catalog filtering + favorites (adoptaapp)    │
//! │  - no knowledge of stdout/stderr or exits     │
//! └───────────────────────────────────────────────┘
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

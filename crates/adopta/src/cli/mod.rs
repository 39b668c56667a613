//! # CLI Behavior
//!
//! This is **one possible host** for adoptaapp, not the application itself.
//!
//! ## Naked Execution
//!
//! Running `adopta` with no subcommand lists the whole catalog.
//!
//! ## Configuration
//!
//! `--catalog`, `--favorites` and `--kind` override `ADOPTA_*` environment
//! variables, which override `adopta.toml`. See [`adoptaapp::config`].
//!
//! ## Favorites
//!
//! Favorites live in a JSON file and go through the same optimistic
//! [`adoptaapp::favorites::FavoriteSet`] a long-running host would use. A failed
//! write is rolled back and reported on stderr; the command then exits non-zero.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and dispatch
//! - `render`: text output
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;

//! Terminal styles.
//!
//! Renderers refer to styles by what they mark (a title, an index, a favorite),
//! never by color. Colors are dropped automatically when stdout is not a terminal.

use console::Style;
use once_cell::sync::Lazy;

pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().color256(244));
pub static FAINT: Lazy<Style> = Lazy::new(|| Style::new().color256(250));
pub static FAVORITE: Lazy<Style> = Lazy::new(|| Style::new().red().bold());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red().bold());

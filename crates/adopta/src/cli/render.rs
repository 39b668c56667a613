//! # Rendering
//!
//! Everything here returns strings; printing happens in `commands`. Layout
//! (column widths, padding) is computed with `unicode-width` so that city names
//! like "Medellín" line up.

use super::styles;
use adoptaapp::api::Card;
use adoptaapp::attributes::{DimensionKind, FilterSchema};
use adoptaapp::catalog::FacetSet;
use adoptaapp::favorites::NotificationKind;
use adoptaapp::model::CatalogEntry;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

pub const NAME_WIDTH: usize = 20;
pub const COLUMN_WIDTH: usize = 14;
pub const FAVORITE_MARKER: &str = "♥";
pub const NOT_FAVORITE_MARKER: &str = "♡";

/// Pad `text` with spaces to `width` display columns, truncating with `…` when
/// it does not fit.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current <= width {
        return format!("{}{}", text, " ".repeat(width - current));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// One line per card: favorite marker, id, name and every schema dimension.
pub fn render_cards<E: CatalogEntry>(schema: &FilterSchema, cards: &[Card<'_, E>]) -> String {
    if cards.is_empty() {
        return format!("{}\n", styles::MUTED.apply_to("No matches."));
    }

    let mut out = String::new();
    for card in cards {
        let marker = if card.favorite {
            styles::FAVORITE.apply_to(FAVORITE_MARKER).to_string()
        } else {
            styles::FAINT.apply_to(NOT_FAVORITE_MARKER).to_string()
        };
        let name = card.entry.text("name").unwrap_or("");
        let mut line = format!(
            "{} {} {}",
            marker,
            styles::INDEX.apply_to(format!("{:>4}.", card.entry.id())),
            styles::TITLE.apply_to(fit_to_width(name, NAME_WIDTH)),
        );
        for spec in schema.dimensions {
            let value = card
                .entry
                .attr(spec.name)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            line.push(' ');
            line.push_str(&styles::MUTED.apply_to(fit_to_width(&value, COLUMN_WIDTH)).to_string());
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

pub fn render_facets(schema: &FilterSchema, facets: &FacetSet) -> String {
    let mut out = String::new();
    for spec in schema.dimensions {
        let _ = writeln!(out, "{}", styles::TITLE.apply_to(spec.name));
        match spec.kind {
            DimensionKind::Facet => {
                let values = facets.values(spec.name);
                if values.is_empty() {
                    let _ = writeln!(out, "  {}", styles::MUTED.apply_to("(none)"));
                }
                for value in values {
                    let _ = writeln!(
                        out,
                        "  {} {}",
                        fit_to_width(value, NAME_WIDTH),
                        styles::MUTED.apply_to(facets.count(spec.name, value))
                    );
                }
            }
            DimensionKind::Buckets(buckets) => {
                let names: Vec<_> = buckets.iter().map(|b| b.name).collect();
                let _ = writeln!(out, "  {}", names.join(", "));
            }
            DimensionKind::Ceiling => match facets.range(spec.name) {
                Some(range) => {
                    let _ = writeln!(out, "  up to {} (from {})", range.max, range.min);
                }
                None => {
                    let _ = writeln!(out, "  {}", styles::MUTED.apply_to("(no values)"));
                }
            },
        }
    }
    out
}

pub fn render_notification(message: &str, kind: NotificationKind) -> String {
    match kind {
        NotificationKind::Success => styles::SUCCESS.apply_to(message).to_string(),
        NotificationKind::Error => styles::ERROR.apply_to(message).to_string(),
    }
}

//! TOC (Table of Contents) builder.
//!
//! Entries follow the caller's section order exactly: schema titles in
//! discovery order, then appendix titles in discovery order. Anchors are the
//! raw titles, matching the ids the section renderer emits.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use tagguide_shared::{Toc, TocEntry};

/// Build a TOC with one entry per title, in the given order.
#[instrument(skip_all)]
pub fn build_toc<'a>(titles: impl IntoIterator<Item = &'a str>) -> Toc {
    let entries: Vec<TocEntry> = titles
        .into_iter()
        .map(|title| TocEntry {
            title: title.to_string(),
            anchor: title.to_string(),
        })
        .collect();

    for dup in duplicate_anchors(&entries) {
        warn!(anchor = %dup, "duplicate section title; links to it will be ambiguous");
    }

    debug!(entries = entries.len(), "TOC built");
    Toc { entries }
}

/// Render the TOC as a heading followed by an HTML list.
pub fn render_toc(toc: &Toc) -> String {
    let mut out = String::from("## Table of Contents\n\n<ul>\n");
    for entry in &toc.entries {
        out.push_str(&format!(
            "  <li><a href='#{}'>{}</a></li>\n",
            entry.anchor, entry.title
        ));
    }
    out.push_str("</ul>\n\n");
    out
}

/// Anchors that appear more than once, in first-repeat order.
pub fn duplicate_anchors(entries: &[TocEntry]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    entries
        .iter()
        .map(|e| e.anchor.as_str())
        .filter(|a| !seen.insert(*a) && reported.insert(*a))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_supplied_order() {
        let schemas = ["Paths", "Cycle Track", "Barriers"];
        let appendices = ["Notes", "Credits"];
        let toc = build_toc(schemas.iter().chain(appendices.iter()).copied());

        let titles: Vec<_> = toc.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Paths", "Cycle Track", "Barriers", "Notes", "Credits"]
        );
    }

    #[test]
    fn anchor_is_raw_title() {
        let toc = build_toc(["Cycle Track & Lanes"]);
        assert_eq!(toc.entries[0].anchor, "Cycle Track & Lanes");
    }

    #[test]
    fn duplicates_are_kept() {
        let toc = build_toc(["Notes", "Paths", "Notes", "Notes"]);
        assert_eq!(toc.entries.len(), 4);
        assert_eq!(duplicate_anchors(&toc.entries), vec!["Notes"]);
    }

    #[test]
    fn render_empty() {
        assert_eq!(
            render_toc(&Toc::default()),
            "## Table of Contents\n\n<ul>\n</ul>\n\n"
        );
    }

    #[test]
    fn render_entries() {
        let toc = build_toc(["Cycle Track", "Notes"]);
        assert_eq!(
            render_toc(&toc),
            "## Table of Contents\n\n<ul>\n\
             \x20 <li><a href='#Cycle Track'>Cycle Track</a></li>\n\
             \x20 <li><a href='#Notes'>Notes</a></li>\n\
             </ul>\n\n"
        );
    }
}

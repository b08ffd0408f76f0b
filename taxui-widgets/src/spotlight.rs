//! Scroll the engagement-letter table to the selected tax year.
//!
//! The selected year comes from the page itself (a `selected_tax_year`
//! marker the template sets) or, failing that, from the `tax_year` query
//! parameter of the current location. The first matching
//! `tr[data-tax-year]` row is recorded as scrolled into view.

use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer};

#[derive(Debug, Default)]
pub struct RowSpotlight {
    rows: Vec<String>,
}

impl RowSpotlight {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Enhancer for RowSpotlight {
    fn name(&self) -> &'static str {
        "row-spotlight"
    }

    fn activate(&mut self, page: &Page) -> bool {
        self.rows = page
            .elements
            .iter()
            .filter(|e| e.tag.eq_ignore_ascii_case("tr") && e.data("tax-year").is_some())
            .map(|e| e.id.clone())
            .collect();
        !self.rows.is_empty()
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        if !matches!(event.kind, EventKind::PageLoad) {
            return Ok(Vec::new());
        }
        let selected = page
            .marker("selected_tax_year")
            .map(str::to_string)
            .or_else(|| page.location_param("tax_year"));
        let Some(year) = selected.filter(|y| !y.is_empty()) else {
            return Ok(Vec::new());
        };

        let hit = self
            .rows
            .iter()
            .find(|rid| page.element(rid).and_then(|e| e.data("tax-year")) == Some(year.as_str()))
            .cloned();
        if let Some(row) = hit {
            page.set_marker("scrolled_to", row);
        }
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxui_core::Element;

    fn letters_page(location: &str) -> Page {
        let mut page = Page::default();
        page.location = location.into();
        for year in ["2022", "2023"] {
            let mut row = Element::new(format!("letter-{year}"), "tr");
            row.dataset.insert("tax-year".into(), year.into());
            page.insert(row);
        }
        page
    }

    #[test]
    fn test_query_parameter_drives_scroll() {
        let mut page = letters_page("/engagement-letter/?tax_year=2023");
        let mut widget = RowSpotlight::new();
        assert!(widget.activate(&page));
        widget.on_event(&mut page, &Event::page_load()).unwrap();

        assert_eq!(page.marker("scrolled_to"), Some("letter-2023"));
    }

    #[test]
    fn test_page_marker_takes_precedence() {
        let mut page = letters_page("/engagement-letter/?tax_year=2023");
        page.set_marker("selected_tax_year", "2022");
        let mut widget = RowSpotlight::new();
        assert!(widget.activate(&page));
        widget.on_event(&mut page, &Event::page_load()).unwrap();

        assert_eq!(page.marker("scrolled_to"), Some("letter-2022"));
    }

    #[test]
    fn test_no_selection_no_scroll() {
        let mut page = letters_page("/engagement-letter/");
        let mut widget = RowSpotlight::new();
        assert!(widget.activate(&page));
        widget.on_event(&mut page, &Event::page_load()).unwrap();

        assert_eq!(page.marker("scrolled_to"), None);
    }

    #[test]
    fn test_unmatched_year_no_scroll() {
        let mut page = letters_page("/engagement-letter/?tax_year=1999");
        let mut widget = RowSpotlight::new();
        assert!(widget.activate(&page));
        widget.on_event(&mut page, &Event::page_load()).unwrap();

        assert_eq!(page.marker("scrolled_to"), None);
    }
}

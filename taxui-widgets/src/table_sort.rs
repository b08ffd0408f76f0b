//! Dashboard table: click-to-sort headers and row navigation.
//!
//! A sortable header names its key in `data-sort`. The first click on an
//! unsorted column sorts ascending; further clicks on the active column flip
//! the direction, and the `asc`/`desc` marker classes move with it. Rows are
//! re-inserted in sorted order, never recreated.
//!
//! Clicking anywhere else in a row navigates to the row's `data-href`,
//! unless the click landed on an interactive descendant (link, button,
//! button group, dropdown), which keeps the event to itself.

use taxui_core::sort::{sorted_order, SortDirection};
use taxui_core::view::TableView;
use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer};

const TABLE_ID: &str = "associationTable";

const INTERACTIVE_TAGS: &[&str] = &["a", "button"];
const INTERACTIVE_CLASSES: &[&str] = &["btn-group", "dropdown-menu", "dropdown-item"];

#[derive(Debug, Default)]
pub struct TableSort {
    table: Option<TableView>,
    headers: Vec<String>,
}

impl TableSort {
    pub fn new() -> Self {
        Self::default()
    }

    fn sort_by_header(&self, page: &mut Page, header_id: &str) {
        let table = match &self.table {
            Some(t) => t,
            None => return,
        };
        let key = match page.element(header_id).and_then(|e| e.data("sort")) {
            Some(k) => k.to_string(),
            None => return,
        };

        let was_ascending = page
            .element(header_id)
            .map(|e| e.has_class("asc"))
            .unwrap_or(false);
        let direction = if was_ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };

        for other in &self.headers {
            if let Some(el) = page.element_mut(other) {
                el.remove_class("asc");
                el.remove_class("desc");
            }
        }
        if let Some(el) = page.element_mut(header_id) {
            el.add_class(direction.class());
        }

        let rows: Vec<(String, String)> = table
            .rows(page)
            .into_iter()
            .map(|rid| {
                let value = table.row_value(page, &rid, &key);
                (rid, value)
            })
            .collect();
        let order = sorted_order(&rows, &key, direction);
        table.reorder_rows(page, &order);
    }

    /// The body row a click landed in, if any.
    fn clicked_row(&self, page: &Page, target: &str) -> Option<String> {
        let table = self.table.as_ref()?;
        let rows = table.rows(page);
        page.closest(target, |e| rows.contains(&e.id))
    }

    /// True when the click target, or anything between it and the row,
    /// handles clicks itself.
    fn within_interactive(page: &Page, target: &str, row: &str) -> bool {
        let mut chain = vec![target.to_string()];
        for ancestor in page.ancestors(target) {
            if ancestor == row {
                break;
            }
            chain.push(ancestor);
        }
        chain.into_iter().any(|id| {
            page.element(&id)
                .map(|e| {
                    INTERACTIVE_TAGS.iter().any(|t| e.tag.eq_ignore_ascii_case(t))
                        || INTERACTIVE_CLASSES.iter().any(|c| e.has_class(c))
                })
                .unwrap_or(false)
        })
    }
}

impl Enhancer for TableSort {
    fn name(&self) -> &'static str {
        "table-sort"
    }

    fn activate(&mut self, page: &Page) -> bool {
        let table = match TableView::bind(page, TABLE_ID, "table-sort") {
            Ok(t) => t,
            Err(_) => return false,
        };
        self.headers = table.headers_with_class(page, "sortable");
        self.table = Some(table);
        true
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        if !matches!(event.kind, EventKind::Click) {
            return Ok(Vec::new());
        }

        if self.headers.iter().any(|h| h == &event.target) {
            self.sort_by_header(page, &event.target);
            return Ok(Vec::new());
        }

        if let Some(row) = self.clicked_row(page, &event.target) {
            if Self::within_interactive(page, &event.target, &row) {
                return Ok(Vec::new());
            }
            if let Some(href) = page.element(&row).and_then(|e| e.data("href")) {
                return Ok(vec![Effect::Navigate(href.to_string())]);
            }
        }

        Ok(Vec::new())
    }
}

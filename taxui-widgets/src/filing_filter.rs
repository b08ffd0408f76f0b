//! Filing-status dashboard filters.
//!
//! The show-all checkbox controls visibility of rows for associations that
//! are not being filed, remembered across visits through the injected
//! preference store. The tax-year and management-company filter selects
//! resubmit their form as soon as they change.

use tracing::warn;

use taxui_core::prefs::{self, PreferenceStore, SHOW_ALL_ASSOCIATIONS};
use taxui_core::view::CheckboxView;
use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer};

const SHOW_ALL_CHECKBOX: &str = "show-all-associations";
const AUTO_SUBMIT_SELECTS: &[&str] = &["tax_year", "management_company"];

pub struct FilingStatusFilter {
    store: Box<dyn PreferenceStore + Send>,
    checkbox: Option<CheckboxView>,
    not_filing_rows: Vec<String>,
    auto_submit: Vec<String>,
}

impl FilingStatusFilter {
    pub fn new(store: Box<dyn PreferenceStore + Send>) -> Self {
        Self {
            store,
            checkbox: None,
            not_filing_rows: Vec::new(),
            auto_submit: Vec::new(),
        }
    }

    fn apply_visibility(&self, page: &mut Page, show_all: bool) {
        for row in &self.not_filing_rows {
            if let Some(element) = page.element_mut(row) {
                element.hidden = !show_all;
            }
        }
    }

    /// The form a filter select submits: its nearest `<form>` ancestor.
    fn owning_form(page: &Page, id: &str) -> Option<String> {
        page.closest(id, |e| e.tag.eq_ignore_ascii_case("form"))
    }
}

impl Enhancer for FilingStatusFilter {
    fn name(&self) -> &'static str {
        "filing-status-filter"
    }

    fn activate(&mut self, page: &Page) -> bool {
        self.not_filing_rows = page
            .elements
            .iter()
            .filter(|e| e.tag.eq_ignore_ascii_case("tr") && e.has_class("not-filing"))
            .map(|e| e.id.clone())
            .collect();
        self.checkbox = CheckboxView::bind(page, SHOW_ALL_CHECKBOX, "filing-status-filter").ok();
        self.auto_submit = AUTO_SUBMIT_SELECTS
            .iter()
            .filter(|id| page.contains(id))
            .map(|id| id.to_string())
            .collect();

        (self.checkbox.is_some() && !self.not_filing_rows.is_empty())
            || !self.auto_submit.is_empty()
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        match &event.kind {
            EventKind::PageLoad => {
                if let Some(checkbox) = &self.checkbox {
                    if !self.not_filing_rows.is_empty() {
                        let show_all = prefs::show_all_associations(self.store.as_ref());
                        checkbox.set_checked(page, show_all);
                        self.apply_visibility(page, show_all);
                    }
                }
            }
            EventKind::Change { .. } => {
                if let Some(checkbox) = &self.checkbox {
                    if event.target == checkbox.id() && !self.not_filing_rows.is_empty() {
                        let show_all = checkbox.checked(page);
                        if let Err(err) = self
                            .store
                            .set(SHOW_ALL_ASSOCIATIONS, if show_all { "true" } else { "false" })
                        {
                            warn!(%err, "could not persist show-all preference");
                        }
                        self.apply_visibility(page, show_all);
                        return Ok(Vec::new());
                    }
                }
                if self.auto_submit.contains(&event.target) {
                    if let Some(form) = Self::owning_form(page, &event.target) {
                        return Ok(vec![Effect::SubmitForm(form)]);
                    }
                }
            }
            _ => {}
        }
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxui_core::prefs::MemoryStore;
    use taxui_core::Element;

    fn dashboard() -> Page {
        let mut page = Page::default();
        let mut checkbox = Element::new(SHOW_ALL_CHECKBOX, "input");
        checkbox.set_attr("type", "checkbox");
        page.insert(checkbox);
        page.insert(Element::new("r1", "tr").with_class("not-filing"));
        page.insert(Element::new("r2", "tr"));
        page.insert(Element::new("filters", "form"));
        page.insert(Element::new("tax_year", "select").with_parent("filters"));
        page
    }

    #[test]
    fn test_default_preference_shows_rows() {
        let mut page = dashboard();
        let mut widget = FilingStatusFilter::new(Box::new(MemoryStore::new()));
        assert!(widget.activate(&page));
        widget.on_event(&mut page, &Event::page_load()).unwrap();

        assert!(page.element(SHOW_ALL_CHECKBOX).unwrap().checked);
        assert!(!page.element("r1").unwrap().hidden);
    }

    #[test]
    fn test_saved_opt_out_hides_rows_on_load() {
        let mut store = MemoryStore::new();
        store.set(SHOW_ALL_ASSOCIATIONS, "false").unwrap();

        let mut page = dashboard();
        let mut widget = FilingStatusFilter::new(Box::new(store));
        assert!(widget.activate(&page));
        widget.on_event(&mut page, &Event::page_load()).unwrap();

        assert!(!page.element(SHOW_ALL_CHECKBOX).unwrap().checked);
        assert!(page.element("r1").unwrap().hidden);
        // rows that are being filed are never touched
        assert!(!page.element("r2").unwrap().hidden);
    }

    #[test]
    fn test_toggle_persists_and_applies() {
        let mut page = dashboard();
        let mut widget = FilingStatusFilter::new(Box::new(MemoryStore::new()));
        assert!(widget.activate(&page));
        widget.on_event(&mut page, &Event::page_load()).unwrap();

        page.element_mut(SHOW_ALL_CHECKBOX).unwrap().checked = false;
        widget
            .on_event(&mut page, &Event::synthetic_change(SHOW_ALL_CHECKBOX))
            .unwrap();

        assert!(page.element("r1").unwrap().hidden);
        assert_eq!(
            widget.store.get(SHOW_ALL_ASSOCIATIONS).as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_filter_select_auto_submits_its_form() {
        let mut page = dashboard();
        let mut widget = FilingStatusFilter::new(Box::new(MemoryStore::new()));
        assert!(widget.activate(&page));

        let effects = widget
            .on_event(&mut page, &Event::change("tax_year", "2023"))
            .unwrap();
        assert_eq!(effects, vec![Effect::SubmitForm("filters".into())]);
    }

    #[test]
    fn test_auto_submit_alone_still_activates() {
        let mut page = Page::default();
        page.insert(Element::new("filters", "form"));
        page.insert(Element::new("management_company", "select").with_parent("filters"));

        let mut widget = FilingStatusFilter::new(Box::new(MemoryStore::new()));
        assert!(widget.activate(&page));
    }
}

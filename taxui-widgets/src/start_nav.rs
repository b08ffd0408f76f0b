//! The "start extension" action on the extension dashboard.
//!
//! With both an association and a tax year chosen, the button navigates to
//! the prefilled extension form; otherwise it raises the blocking alert the
//! page has always shown.

use taxui_core::view::SelectView;
use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer};

const BUTTON_ID: &str = "calculate_btn";

#[derive(Debug, Default)]
pub struct StartNavigation {
    association: Option<SelectView>,
    tax_year: Option<SelectView>,
}

impl StartNavigation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Enhancer for StartNavigation {
    fn name(&self) -> &'static str {
        "start-navigation"
    }

    fn activate(&mut self, page: &Page) -> bool {
        if !page.contains(BUTTON_ID) {
            return false;
        }
        let association = SelectView::bind(page, "association_select", "start-navigation").ok();
        let tax_year = SelectView::bind(page, "tax_year_select", "start-navigation").ok();
        match (association, tax_year) {
            (Some(a), Some(t)) => {
                self.association = Some(a);
                self.tax_year = Some(t);
                true
            }
            _ => false,
        }
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        if event.target != BUTTON_ID || !matches!(event.kind, EventKind::Click) {
            return Ok(Vec::new());
        }
        let (association, tax_year) = match (&self.association, &self.tax_year) {
            (Some(a), Some(t)) => (a.value(page).to_string(), t.value(page).to_string()),
            _ => return Ok(Vec::new()),
        };

        if !association.is_empty() && !tax_year.is_empty() {
            Ok(vec![Effect::Navigate(format!(
                "/extension-form/?association_id={association}&tax_year={tax_year}"
            ))])
        } else {
            Ok(vec![Effect::Alert(
                "Please select both an association and a tax year.".into(),
            )])
        }
    }
}

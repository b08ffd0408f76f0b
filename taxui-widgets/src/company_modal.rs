//! Inline management-company creation.
//!
//! The "new management company" button opens a modal whose form posts
//! through the gateway instead of a full page round-trip. A successful
//! creation appends the new company to the select, selects it, closes the
//! modal, and resets the form; a rejection or transport failure surfaces as
//! an alert, leaving the modal open for another try.

use tracing::error;

use taxui_core::view::SelectView;
use taxui_core::{Event, EventKind, OptionEntry, Page, Result};

use crate::enhancer::{Effect, Enhancer, Settled};
use crate::gateway::CompanyOutcome;

const OPEN_BUTTON: &str = "new-management-company-btn";
const MODAL: &str = "management-company-modal";

#[derive(Debug, Default)]
pub struct CompanyModal {
    company_select: Option<SelectView>,
    modal_form: Option<String>,
}

impl CompanyModal {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_fields(page: &Page, form: &str) -> Vec<(String, String)> {
        page.elements
            .iter()
            .filter(|e| page.ancestors(&e.id).contains(&form.to_string()))
            .filter_map(|e| e.name().map(|name| (name.to_string(), e.value.clone())))
            .collect()
    }

    fn reset_form(page: &mut Page, form: &str) {
        let field_ids: Vec<String> = page
            .elements
            .iter()
            .filter(|e| page.ancestors(&e.id).contains(&form.to_string()))
            .filter(|e| e.name().is_some())
            .map(|e| e.id.clone())
            .collect();
        for id in field_ids {
            if let Some(element) = page.element_mut(&id) {
                element.value.clear();
                element.checked = false;
            }
        }
    }
}

impl Enhancer for CompanyModal {
    fn name(&self) -> &'static str {
        "company-modal"
    }

    fn activate(&mut self, page: &Page) -> bool {
        if !page.contains(OPEN_BUTTON) || !page.contains(MODAL) {
            return false;
        }
        let company_select =
            match SelectView::bind(page, "id_management_company", "company-modal") {
                Ok(view) => view,
                Err(_) => return false,
            };
        let modal_form = page.children_of(MODAL).into_iter().find(|cid| {
            page.element(cid)
                .map(|e| e.tag.eq_ignore_ascii_case("form"))
                .unwrap_or(false)
        });
        match modal_form {
            Some(form) => {
                self.company_select = Some(company_select);
                self.modal_form = Some(form);
                true
            }
            None => false,
        }
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        match &event.kind {
            EventKind::Click if event.target == OPEN_BUTTON => {
                if let Some(modal) = page.element_mut(MODAL) {
                    modal.hidden = false;
                }
            }
            EventKind::Submit if Some(&event.target) == self.modal_form.as_ref() => {
                let fields = Self::collect_fields(page, &event.target);
                return Ok(vec![Effect::CreateCompany {
                    form: event.target.clone(),
                    fields,
                }]);
            }
            _ => {}
        }
        Ok(Vec::new())
    }

    fn on_settled(&mut self, page: &mut Page, settled: &Settled) -> Result<Vec<Effect>> {
        let Settled::Company { form, outcome } = settled else {
            return Ok(Vec::new());
        };
        if Some(form) != self.modal_form.as_ref() {
            return Ok(Vec::new());
        }

        match outcome {
            Ok(CompanyOutcome::Created { id, name }) => {
                if let Some(select) = &self.company_select {
                    select.append_option(page, OptionEntry::new(id.clone(), name.clone()));
                    select.set_value(page, id);
                }
                if let Some(modal) = page.element_mut(MODAL) {
                    modal.hidden = true;
                }
                Self::reset_form(page, form);
            }
            Ok(CompanyOutcome::Rejected { message }) => {
                return Ok(vec![Effect::Alert(format!("Error: {message}"))]);
            }
            Err(err) => {
                error!(%err, "management company creation failed");
                return Ok(vec![Effect::Alert(
                    "An error occurred. Please try again.".into(),
                )]);
            }
        }
        Ok(Vec::new())
    }
}

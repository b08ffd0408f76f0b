//! Dependent tax-year selects, fed from the backend.
//!
//! When the association picker changes, the year select is repopulated from
//! the year endpoint for the page's form flavor. Every request carries a
//! generation number; a settled response is applied only while its
//! generation is still current, so a rapid second change — or clearing the
//! picker outright — invalidates whatever is in flight instead of racing
//! it. On page load with a pre-selected association the loader fetches
//! proactively and then tries to restore the year that was already chosen.

use tracing::{debug, error};

use taxui_core::view::SelectView;
use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer, FormFlavor, Settled};

const SELECT_YEAR: &str = "Select a year";
const NO_YEARS: &str = "No tax years available";
const LOAD_ERROR: &str = "Error loading years";
const SELECT_ASSOCIATION_FIRST: &str = "Select an association first";

#[derive(Debug)]
pub struct YearLoader {
    flavor: FormFlavor,
    primary: Option<SelectView>,
    dependent: Option<SelectView>,
    generation: u64,
    restore: Option<String>,
}

impl YearLoader {
    pub fn new(flavor: FormFlavor) -> Self {
        Self {
            flavor,
            primary: None,
            dependent: None,
            generation: 0,
            restore: None,
        }
    }

    fn control_ids(flavor: FormFlavor) -> (&'static str, &'static str) {
        match flavor {
            FormFlavor::Extension => ("association_select", "tax_year_select"),
            FormFlavor::Form1120h => ("id_association", "id_tax_year"),
        }
    }

    fn fetch(&mut self, association_id: &str) -> Effect {
        self.generation += 1;
        debug!(
            flavor = self.flavor.as_str(),
            association_id,
            generation = self.generation,
            "requesting tax years"
        );
        Effect::FetchYears {
            flavor: self.flavor,
            association_id: association_id.to_string(),
            generation: self.generation,
        }
    }

    fn collapse(&self, page: &mut Page, label: &str) {
        if let Some(dependent) = &self.dependent {
            dependent.collapse_to_placeholder(page, label);
            dependent.set_disabled(page, true);
        }
    }
}

impl Enhancer for YearLoader {
    fn name(&self) -> &'static str {
        match self.flavor {
            FormFlavor::Extension => "year-loader/extension",
            FormFlavor::Form1120h => "year-loader/1120h",
        }
    }

    fn activate(&mut self, page: &Page) -> bool {
        let (primary_id, dependent_id) = Self::control_ids(self.flavor);
        let primary = SelectView::bind(page, primary_id, "year-loader").ok();
        let dependent = SelectView::bind(page, dependent_id, "year-loader").ok();

        match (primary, dependent) {
            (Some(primary), Some(dependent)) => {
                self.primary = Some(primary);
                self.dependent = Some(dependent);
                true
            }
            (None, None) => false,
            // half a contract is a page bug worth hearing about
            (primary, _) => {
                error!(
                    flavor = self.flavor.as_str(),
                    missing = if primary.is_none() { primary_id } else { dependent_id },
                    "association or tax year select not found"
                );
                false
            }
        }
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        let (primary, dependent) = match (&self.primary, &self.dependent) {
            (Some(p), Some(d)) => (p.clone(), d.clone()),
            _ => return Ok(Vec::new()),
        };

        match &event.kind {
            EventKind::PageLoad => {
                let association_id = primary.value(page).to_string();
                if !association_id.is_empty() {
                    let chosen = dependent.value(page);
                    self.restore = (!chosen.is_empty()).then(|| chosen.to_string());
                    return Ok(vec![self.fetch(&association_id)]);
                }
            }
            EventKind::Change { .. } if event.target == primary.id() => {
                self.restore = None;
                let association_id = primary.value(page).to_string();
                if association_id.is_empty() {
                    // invalidate anything in flight, then reset the control
                    self.generation += 1;
                    self.collapse(page, SELECT_ASSOCIATION_FIRST);
                } else {
                    return Ok(vec![self.fetch(&association_id)]);
                }
            }
            _ => {}
        }
        Ok(Vec::new())
    }

    fn on_settled(&mut self, page: &mut Page, settled: &Settled) -> Result<Vec<Effect>> {
        let Settled::Years {
            generation,
            outcome,
        } = settled
        else {
            return Ok(Vec::new());
        };
        if *generation != self.generation {
            debug!(
                flavor = self.flavor.as_str(),
                stale = generation,
                current = self.generation,
                "dropping stale year response"
            );
            return Ok(Vec::new());
        }
        let dependent = match &self.dependent {
            Some(d) => d.clone(),
            None => return Ok(Vec::new()),
        };

        match outcome {
            Ok(years) if !years.is_empty() => {
                dependent.populate(page, SELECT_YEAR, years);
                dependent.set_disabled(page, false);
                if let Some(previous) = self.restore.take() {
                    if dependent.select_if_present(page, &previous) {
                        debug!(year = %previous, "restored previous tax year selection");
                    }
                }
            }
            Ok(_) => {
                self.restore = None;
                self.collapse(page, NO_YEARS);
            }
            Err(message) => {
                error!(flavor = self.flavor.as_str(), %message, "error fetching tax years");
                self.restore = None;
                self.collapse(page, LOAD_ERROR);
            }
        }
        Ok(Vec::new())
    }
}

//! Event dispatch across the active enhancers.
//!
//! The engine mirrors a document event loop: events are delivered to every
//! active enhancer in registration order, synchronously; the only suspension
//! points are gateway calls, which the engine awaits and feeds back to the
//! issuing enhancer as a settled outcome. Synthetic changes and programmatic
//! submits are queued behind the event that produced them, preserving
//! callback ordering.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, warn};

use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer, Settled};
use crate::gateway::{CompanyGateway, YearSource};

pub struct Engine {
    enhancers: Vec<Box<dyn Enhancer>>,
    active: Vec<usize>,
    years: Arc<dyn YearSource>,
    companies: Arc<dyn CompanyGateway>,
    /// Blocking alerts raised during dispatch, oldest first.
    alerts: Vec<String>,
}

impl Engine {
    pub fn new(years: Arc<dyn YearSource>, companies: Arc<dyn CompanyGateway>) -> Self {
        Self {
            enhancers: Vec::new(),
            active: Vec::new(),
            years,
            companies,
            alerts: Vec::new(),
        }
    }

    pub fn register(&mut self, enhancer: Box<dyn Enhancer>) {
        self.enhancers.push(enhancer);
    }

    /// Probe every registered enhancer against the page. Returns the names
    /// of those that activated.
    pub fn activate(&mut self, page: &Page) -> Vec<&'static str> {
        self.active.clear();
        let mut names = Vec::new();
        for (idx, enhancer) in self.enhancers.iter_mut().enumerate() {
            if enhancer.activate(page) {
                debug!(enhancer = enhancer.name(), "activated");
                self.active.push(idx);
                names.push(enhancer.name());
            } else {
                debug!(enhancer = enhancer.name(), "dormant");
            }
        }
        names
    }

    /// Activate against `page` and deliver the initial `page_load` event.
    pub async fn load(&mut self, page: &mut Page) -> Result<Vec<&'static str>> {
        let names = self.activate(page);
        self.dispatch(page, Event::page_load()).await?;
        Ok(names)
    }

    /// Alerts raised so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Deliver one event, run the effects it produces, and drain any
    /// synthetic events those effects queue.
    pub async fn dispatch(&mut self, page: &mut Page, event: Event) -> Result<()> {
        let mut events = VecDeque::from([event]);

        while let Some(event) = events.pop_front() {
            apply_native_interaction(page, &event);

            let mut effects: VecDeque<(usize, Effect)> = VecDeque::new();
            for idx in self.active.clone() {
                for effect in self.enhancers[idx].on_event(page, &event)? {
                    effects.push_back((idx, effect));
                }
            }

            while let Some((idx, effect)) = effects.pop_front() {
                match effect {
                    Effect::Navigate(url) => {
                        info!(%url, "navigating");
                        page.location = url;
                    }
                    Effect::Alert(message) => {
                        warn!(%message, "blocking alert");
                        self.alerts.push(message);
                    }
                    Effect::SyntheticChange(target) => {
                        events.push_back(Event::synthetic_change(target));
                    }
                    Effect::SubmitForm(form) => {
                        page.set_marker(format!("submitted:{form}"), "true");
                        events.push_back(Event::new(form, EventKind::Submit));
                    }
                    Effect::FetchYears {
                        flavor,
                        association_id,
                        generation,
                    } => {
                        let years = Arc::clone(&self.years);
                        let outcome = years
                            .tax_years(flavor, &association_id)
                            .await
                            .map_err(|e| e.to_string());
                        let settled = Settled::Years {
                            generation,
                            outcome,
                        };
                        for effect in self.enhancers[idx].on_settled(page, &settled)? {
                            effects.push_back((idx, effect));
                        }
                    }
                    Effect::CreateCompany { form, fields } => {
                        let companies = Arc::clone(&self.companies);
                        let outcome = companies
                            .create_company(&fields)
                            .await
                            .map_err(|e| e.to_string());
                        let settled = Settled::Company { form, outcome };
                        for effect in self.enhancers[idx].on_settled(page, &settled)? {
                            effects.push_back((idx, effect));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// What the browser itself does before handlers run: typing rewrites the
/// input's value, a native pick rewrites the select's value, a native file
/// pick fills the input's file list.
fn apply_native_interaction(page: &mut Page, event: &Event) {
    match &event.kind {
        EventKind::Input { value } => {
            if let Some(element) = page.element_mut(&event.target) {
                element.value = value.clone();
            }
        }
        EventKind::Change { value: Some(value) } => {
            if let Some(element) = page.element_mut(&event.target) {
                element.value = value.clone();
            }
        }
        EventKind::FilesChosen { files } => {
            if let Some(element) = page.element_mut(&event.target) {
                element.files = files.clone();
            }
        }
        _ => {}
    }
}

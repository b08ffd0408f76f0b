//! Dollar-input formatting and the live balance-due display.
//!
//! Inputs with class `dollar-input` show `$1,234.50` while unfocused and the
//! bare numeric string while being edited. The balance-due line recomputes
//! on every keystroke in either source field as
//! `max(0, tentative_tax - total_payments)`. Submitting strips the
//! formatting so the server receives plain numbers.

use taxui_core::currency::{balance_due, format_amount, format_currency, parse_amount, unformat_currency};
use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer};

const TENTATIVE_TAX: &str = "tentative_tax";
const TOTAL_PAYMENTS: &str = "total_payments";

#[derive(Debug, Default)]
pub struct CurrencyFields {
    dollar_inputs: Vec<String>,
    tentative: Option<String>,
    payments: Option<String>,
    balance_span: Option<String>,
}

impl CurrencyFields {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_named(page: &Page, name: &str) -> Option<String> {
        page.elements
            .iter()
            .find(|e| e.tag.eq_ignore_ascii_case("input") && e.name() == Some(name))
            .map(|e| e.id.clone())
    }

    fn update_balance(&self, page: &mut Page) {
        let (Some(tentative), Some(payments), Some(span)) =
            (&self.tentative, &self.payments, &self.balance_span)
        else {
            return;
        };
        let tentative = page
            .element(tentative)
            .map(|e| parse_amount(&e.value))
            .unwrap_or(0.0);
        let payments = page
            .element(payments)
            .map(|e| parse_amount(&e.value))
            .unwrap_or(0.0);
        if let Some(span) = page.element_mut(span) {
            span.text = format_amount(balance_due(tentative, payments));
        }
    }

    fn is_balance_source(&self, id: &str) -> bool {
        self.tentative.as_deref() == Some(id) || self.payments.as_deref() == Some(id)
    }
}

impl Enhancer for CurrencyFields {
    fn name(&self) -> &'static str {
        "currency-fields"
    }

    fn activate(&mut self, page: &Page) -> bool {
        self.dollar_inputs = page.by_class("dollar-input");
        self.tentative = Self::input_named(page, TENTATIVE_TAX);
        self.payments = Self::input_named(page, TOTAL_PAYMENTS);
        self.balance_span = page.children_of("balanceDue").into_iter().find(|cid| {
            page.element(cid)
                .map(|e| e.tag.eq_ignore_ascii_case("span"))
                .unwrap_or(false)
        });
        !self.dollar_inputs.is_empty()
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        match &event.kind {
            EventKind::PageLoad => {
                for id in self.dollar_inputs.clone() {
                    if let Some(element) = page.element_mut(&id) {
                        if let Some(original) = element.data("original-value") {
                            element.value = original.to_string();
                        }
                        element.value = format_currency(&element.value);
                    }
                }
                self.update_balance(page);
            }
            EventKind::Focus if self.dollar_inputs.contains(&event.target) => {
                if let Some(element) = page.element_mut(&event.target) {
                    element.value = unformat_currency(&element.value);
                }
            }
            EventKind::Blur if self.dollar_inputs.contains(&event.target) => {
                if let Some(element) = page.element_mut(&event.target) {
                    element.value = format_currency(&element.value);
                }
                self.update_balance(page);
            }
            EventKind::Input { .. } if self.is_balance_source(&event.target) => {
                self.update_balance(page);
            }
            EventKind::Submit => {
                for id in self.dollar_inputs.clone() {
                    if let Some(element) = page.element_mut(&id) {
                        element.value = unformat_currency(&element.value);
                    }
                }
            }
            _ => {}
        }
        Ok(Vec::new())
    }
}

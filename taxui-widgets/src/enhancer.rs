//! The enhancer contract.
//!
//! An enhancer is one independent page behavior: it inspects the page for
//! its collaborator elements at activation, stays dormant when they are
//! absent, and otherwise reacts to events by mutating the page and returning
//! effects. Effects are everything an event handler cannot do by touching
//! the page alone: navigation, blocking alerts, synthetic events, and
//! gateway calls. The engine owns executing them, which keeps every
//! enhancer synchronous and unit-testable while the network stays async.

use taxui_core::{Event, Page, Result};

use crate::gateway::CompanyOutcome;

/// Which backend form flavor a dependent-select relationship belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFlavor {
    Extension,
    Form1120h,
}

impl FormFlavor {
    /// Endpoint path serving the year list for this flavor.
    pub fn path(self) -> &'static str {
        match self {
            Self::Extension => "/extension-form/",
            Self::Form1120h => "/form-1120h/",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Extension => "extension-form",
            Self::Form1120h => "form-1120h",
        }
    }
}

impl std::str::FromStr for FormFlavor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "extension-form" | "extension" => Ok(Self::Extension),
            "form-1120h" | "1120h" => Ok(Self::Form1120h),
            other => Err(format!("unknown form flavor '{other}'")),
        }
    }
}

/// Side effects an event handler asks the engine to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Client-side navigation; the engine rewrites `page.location`.
    Navigate(String),
    /// Blocking alert dialog.
    Alert(String),
    /// Change event dispatched on a control so dependent enhancers fire.
    SyntheticChange(String),
    /// Programmatic submit of a form.
    SubmitForm(String),
    /// Year-list fetch, keyed by the issuing loader's request generation.
    FetchYears {
        flavor: FormFlavor,
        association_id: String,
        generation: u64,
    },
    /// Management-company creation through the gateway.
    CreateCompany {
        form: String,
        fields: Vec<(String, String)>,
    },
}

/// Completion of a gateway call issued through an effect. Errors arrive as
/// display strings; the enhancer only logs and renders them.
#[derive(Debug, Clone)]
pub enum Settled {
    Years {
        generation: u64,
        outcome: std::result::Result<Vec<String>, String>,
    },
    Company {
        form: String,
        outcome: std::result::Result<CompanyOutcome, String>,
    },
}

pub trait Enhancer: Send {
    fn name(&self) -> &'static str;

    /// Look for collaborator elements; `false` leaves the enhancer dormant
    /// for the rest of the page's life.
    fn activate(&mut self, page: &Page) -> bool;

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>>;

    /// Delivery of a settled gateway call this enhancer requested.
    fn on_settled(&mut self, page: &mut Page, settled: &Settled) -> Result<Vec<Effect>> {
        let _ = (page, settled);
        Ok(Vec::new())
    }
}

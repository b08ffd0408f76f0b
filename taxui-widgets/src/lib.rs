//! Page enhancers for the association tax-filing app.
//!
//! Each enhancer reproduces one of the behaviors the app layers over its
//! server-rendered pages: searchable association pickers, the sortable
//! dashboard table, backend-fed tax-year selects, dollar-input formatting,
//! the drag-and-drop upload zone, filing-status filters, visibility
//! toggles, inline management-company creation, PDF cache busting, and the
//! engagement-letter row spotlight. Enhancers are independent: each one
//! activates only when its collaborator elements are present on the page
//! and stays dormant otherwise.

use std::sync::Arc;

pub mod cache_buster;
pub mod company_modal;
pub mod currency_fields;
pub mod engine;
pub mod enhanced_search;
pub mod enhancer;
pub mod filing_filter;
pub mod gateway;
pub mod search_select;
pub mod spotlight;
pub mod start_nav;
pub mod table_sort;
pub mod toggles;
pub mod upload_zone;
pub mod year_loader;

pub use cache_buster::PdfCacheBuster;
pub use company_modal::CompanyModal;
pub use currency_fields::CurrencyFields;
pub use engine::Engine;
pub use enhanced_search::EnhancedSearchSelect;
pub use enhancer::{Effect, Enhancer, FormFlavor, Settled};
pub use filing_filter::FilingStatusFilter;
pub use gateway::{CompanyGateway, CompanyOutcome, StaticCompanies, StaticYears, YearSource};
pub use search_select::SearchSelect;
pub use spotlight::RowSpotlight;
pub use start_nav::StartNavigation;
pub use table_sort::TableSort;
pub use toggles::VisibilityToggles;
pub use upload_zone::UploadZone;
pub use year_loader::YearLoader;

use taxui_core::prefs::PreferenceStore;

/// An engine with the full enhancer set registered, in the order the page
/// scripts have always loaded.
pub fn standard_engine(
    years: Arc<dyn YearSource>,
    companies: Arc<dyn CompanyGateway>,
    prefs: Box<dyn PreferenceStore + Send>,
    now_ms: i64,
) -> Engine {
    let mut engine = Engine::new(years, companies);
    engine.register(Box::new(SearchSelect::new()));
    engine.register(Box::new(EnhancedSearchSelect::new()));
    engine.register(Box::new(TableSort::new()));
    engine.register(Box::new(YearLoader::new(FormFlavor::Extension)));
    engine.register(Box::new(YearLoader::new(FormFlavor::Form1120h)));
    engine.register(Box::new(StartNavigation::new()));
    engine.register(Box::new(CurrencyFields::new()));
    engine.register(Box::new(UploadZone::new()));
    engine.register(Box::new(FilingStatusFilter::new(prefs)));
    engine.register(Box::new(VisibilityToggles::new()));
    engine.register(Box::new(CompanyModal::new()));
    engine.register(Box::new(PdfCacheBuster::new(now_ms)));
    engine.register(Box::new(RowSpotlight::new()));
    engine
}

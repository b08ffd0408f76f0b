//! Searchable association dropdowns (native-select variant).
//!
//! Each matching select gains a text input inserted just above it. Typing
//! repopulates the live select with the filtered option subset — the
//! placeholder always survives — and a unique match is selected outright.
//! Picking an option clears the filter text.

use taxui_core::options::{filter_options, unique_match};
use taxui_core::page::Element;
use taxui_core::view::{SelectView, TextInputView};
use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer};

/// Selects this augmenter claims: the association pickers addressed by id
/// or by field name. Selects carrying the `searchable` class belong to the
/// floating-list variant instead.
const ASSOCIATION_SELECT_IDS: &[&str] = &["association_select", "id_association"];

#[derive(Debug)]
struct Binding {
    select: SelectView,
    search: TextInputView,
    original: Vec<taxui_core::OptionEntry>,
}

#[derive(Debug, Default)]
pub struct SearchSelect {
    candidates: Vec<String>,
    bindings: Vec<Binding>,
}

impl SearchSelect {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_id(select_id: &str) -> String {
        format!("{select_id}_search")
    }

    /// A sibling text input means something already augmented this select.
    fn has_sibling_search(page: &Page, select_id: &str) -> bool {
        let parent = page.element(select_id).and_then(|e| e.parent.clone());
        page.elements.iter().any(|e| {
            e.id != select_id
                && e.parent == parent
                && e.tag.eq_ignore_ascii_case("input")
                && e.attr("type").unwrap_or("text") == "text"
        })
    }

    fn bind_all(&mut self, page: &mut Page) -> Result<()> {
        for select_id in self.candidates.clone() {
            if Self::has_sibling_search(page, &select_id) {
                continue;
            }

            let search_id = Self::search_id(&select_id);
            let mut search = Element::new(&search_id, "input");
            search.parent = page.element(&select_id).and_then(|e| e.parent.clone());
            search.classes = vec!["form-control".into(), "mb-1".into()];
            search.set_attr("type", "text");
            search.set_attr("placeholder", "Type to search associations...");
            page.insert_before(&select_id, search);

            let select = SelectView::bind(page, &select_id, "search-select")?;
            let original = select.options(page).to_vec();
            self.bindings.push(Binding {
                select,
                search: TextInputView::bind(page, &search_id, "search-select")?,
                original,
            });
        }
        Ok(())
    }
}

impl Enhancer for SearchSelect {
    fn name(&self) -> &'static str {
        "search-select"
    }

    fn activate(&mut self, page: &Page) -> bool {
        self.candidates = page
            .elements
            .iter()
            .filter(|e| {
                e.tag.eq_ignore_ascii_case("select")
                    && !e.has_class("searchable")
                    && (ASSOCIATION_SELECT_IDS.contains(&e.id.as_str())
                        || e.name() == Some("association_id"))
            })
            .map(|e| e.id.clone())
            .collect();
        !self.candidates.is_empty()
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        match &event.kind {
            EventKind::PageLoad => self.bind_all(page)?,
            EventKind::Input { value } => {
                if let Some(binding) = self
                    .bindings
                    .iter()
                    .find(|b| b.search.id() == event.target)
                {
                    let filtered = filter_options(&binding.original, value);
                    let auto = unique_match(&filtered, value).map(|o| o.value.clone());
                    binding.select.set_options(page, filtered);
                    if let Some(value) = auto {
                        binding.select.set_value(page, &value);
                    }
                }
            }
            EventKind::Change { .. } => {
                if let Some(binding) = self
                    .bindings
                    .iter()
                    .find(|b| b.select.id() == event.target)
                {
                    if !binding.select.value(page).is_empty() {
                        binding.search.set_value(page, "");
                    }
                }
            }
            _ => {}
        }
        Ok(Vec::new())
    }
}

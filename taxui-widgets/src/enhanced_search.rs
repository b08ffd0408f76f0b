//! Searchable dropdowns, floating-list variant.
//!
//! Selects marked `searchable` are hidden entirely behind a text input and a
//! custom item list attached at document level (top-level parent, escaping
//! any clipping container). The list is rebuilt on focus and on every
//! keystroke: an empty filter shows every option, a non-empty filter with no
//! survivors shows a "No matches found" row. Clicking an item writes the
//! select's value and dispatches a synthetic change so dependent enhancers
//! fire. Hiding on blur waits for the grace tick, so a click that was
//! already in flight still lands.

use taxui_core::options::matching_options;
use taxui_core::page::{Element, OptionEntry};
use taxui_core::view::{SelectView, TextInputView};
use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer};

#[derive(Debug)]
struct Binding {
    select: SelectView,
    search: TextInputView,
    dropdown: String,
    original: Vec<OptionEntry>,
    pending_hide: bool,
}

#[derive(Debug, Default)]
pub struct EnhancedSearchSelect {
    candidates: Vec<String>,
    bindings: Vec<Binding>,
}

impl EnhancedSearchSelect {
    pub fn new() -> Self {
        Self::default()
    }

    fn render(binding: &Binding, page: &mut Page, filter: &str) {
        page.remove_children(&binding.dropdown);

        let matched = matching_options(&binding.original, filter);
        let has_match = !matched.is_empty();
        let current = binding.select.value(page).to_string();

        for (idx, option) in matched.iter().enumerate() {
            let mut item = Element::new(
                format!("{}_item_{idx}", binding.dropdown),
                "div",
            )
            .with_parent(binding.dropdown.clone())
            .with_class("custom-select-item");
            if option.value == current {
                item.add_class("selected");
            }
            item.text = option.label.clone();
            item.dataset.insert("value".into(), option.value.clone());
            page.insert(item);
        }

        if !has_match && !filter.is_empty() {
            let mut empty = Element::new(format!("{}_empty", binding.dropdown), "div")
                .with_parent(binding.dropdown.clone())
                .with_class("custom-select-no-results");
            empty.text = "No matches found".into();
            page.insert(empty);
        }

        let visible = !filter.is_empty() || has_match;
        if let Some(dropdown) = page.element_mut(&binding.dropdown) {
            dropdown.hidden = !visible;
        }
    }

    fn hide(binding: &Binding, page: &mut Page) {
        if let Some(dropdown) = page.element_mut(&binding.dropdown) {
            dropdown.hidden = true;
        }
    }

    fn bind_all(&mut self, page: &mut Page) -> Result<()> {
        for select_id in self.candidates.clone() {
            let search_id = format!("{select_id}_search");
            let dropdown_id = format!("{select_id}_dropdown");

            let mut search = Element::new(&search_id, "input");
            search.parent = page.element(&select_id).and_then(|e| e.parent.clone());
            search.classes = vec!["form-control".into(), "custom-select-search".into()];
            search.set_attr("type", "text");
            search.set_attr("placeholder", "Type to search...");
            page.insert_before(&select_id, search);

            // attached at document level to escape stacking contexts
            let mut dropdown = Element::new(&dropdown_id, "div");
            dropdown.classes = vec!["custom-select-dropdown".into()];
            dropdown.hidden = true;
            page.insert(dropdown);

            let select = SelectView::bind(page, &select_id, "enhanced-search")?;
            let original = select.options(page).to_vec();

            // seed the input with the current selection, then bury the select
            if !select.value(page).is_empty() {
                if let Some(label) = select.selected_label(page).map(str::to_string) {
                    if let Some(input) = page.element_mut(&search_id) {
                        input.value = label;
                    }
                }
            }
            select.set_hidden(page, true);

            self.bindings.push(Binding {
                select,
                search: TextInputView::bind(page, &search_id, "enhanced-search")?,
                dropdown: dropdown_id,
                original,
                pending_hide: false,
            });
        }
        Ok(())
    }

    fn binding_for_search(&mut self, id: &str) -> Option<usize> {
        self.bindings.iter().position(|b| b.search.id() == id)
    }

    /// The binding owning a floating-list item, if `id` is one.
    fn binding_for_item(&self, page: &Page, id: &str) -> Option<usize> {
        let item = page.element(id)?;
        if !item.has_class("custom-select-item") {
            return None;
        }
        let parent = item.parent.as_deref()?;
        self.bindings.iter().position(|b| b.dropdown == parent)
    }
}

impl Enhancer for EnhancedSearchSelect {
    fn name(&self) -> &'static str {
        "enhanced-search"
    }

    fn activate(&mut self, page: &Page) -> bool {
        self.candidates = page
            .elements
            .iter()
            .filter(|e| e.tag.eq_ignore_ascii_case("select") && e.has_class("searchable"))
            .map(|e| e.id.clone())
            .collect();
        !self.candidates.is_empty()
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        match &event.kind {
            EventKind::PageLoad => self.bind_all(page)?,
            EventKind::Focus => {
                if let Some(idx) = self.binding_for_search(&event.target) {
                    let filter = self.bindings[idx].search.value(page).to_string();
                    Self::render(&self.bindings[idx], page, &filter);
                }
            }
            EventKind::Input { value } => {
                if let Some(idx) = self.binding_for_search(&event.target) {
                    self.bindings[idx].pending_hide = false;
                    Self::render(&self.bindings[idx], page, value);
                }
            }
            EventKind::Blur => {
                if let Some(idx) = self.binding_for_search(&event.target) {
                    self.bindings[idx].pending_hide = true;
                }
            }
            EventKind::BlurSettled => {
                if let Some(idx) = self.binding_for_search(&event.target) {
                    if self.bindings[idx].pending_hide {
                        self.bindings[idx].pending_hide = false;
                        Self::hide(&self.bindings[idx], page);
                    }
                }
            }
            EventKind::Click => {
                if let Some(idx) = self.binding_for_item(page, &event.target) {
                    let value = page
                        .element(&event.target)
                        .and_then(|e| e.data("value"))
                        .unwrap_or_default()
                        .to_string();
                    let label = page
                        .element(&event.target)
                        .map(|e| e.text.clone())
                        .unwrap_or_default();

                    let binding = &mut self.bindings[idx];
                    binding.pending_hide = false;
                    binding.select.set_value(page, &value);
                    binding.search.set_value(page, &label);
                    Self::hide(binding, page);
                    return Ok(vec![Effect::SyntheticChange(
                        binding.select.id().to_string(),
                    )]);
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

    fn page() -> Page {
        let mut page = Page::default();
        page.insert(Element::new("wrap", "div"));
        let mut select = Element::new("company_select", "select")
            .with_parent("wrap")
            .with_class("searchable");
        select.options = vec![
            OptionEntry::placeholder("---------"),
            OptionEntry::new("1", "Acme Management"),
            OptionEntry::new("2", "Summit Property Group"),
        ];
        page.insert(select);
        page
    }

    fn loaded(page: &mut Page) -> EnhancedSearchSelect {
        let mut widget = EnhancedSearchSelect::new();
        assert!(widget.activate(page));
        widget.on_event(page, &Event::page_load()).unwrap();
        widget
    }

    #[test]
    fn test_page_load_hides_select_and_builds_chrome() {
        let mut page = page();
        loaded(&mut page);

        assert!(page.element("company_select").unwrap().hidden);
        assert!(page.contains("company_select_search"));
        // floating list lives at document level, hidden until focus
        let dropdown = page.element("company_select_dropdown").unwrap();
        assert_eq!(dropdown.parent, None);
        assert!(dropdown.hidden);
    }

    #[test]
    fn test_focus_with_empty_filter_shows_all_options() {
        let mut page = page();
        let mut widget = loaded(&mut page);

        widget
            .on_event(&mut page, &Event::new("company_select_search", EventKind::Focus))
            .unwrap();
        assert!(!page.element("company_select_dropdown").unwrap().hidden);
        assert_eq!(page.children_of("company_select_dropdown").len(), 3);
    }

    #[test]
    fn test_no_matches_row() {
        let mut page = page();
        let mut widget = loaded(&mut page);

        widget
            .on_event(&mut page, &Event::input("company_select_search", "zzz"))
            .unwrap();
        let children = page.children_of("company_select_dropdown");
        assert_eq!(children, vec!["company_select_dropdown_empty"]);
        assert_eq!(
            page.element("company_select_dropdown_empty").unwrap().text,
            "No matches found"
        );
    }

    #[test]
    fn test_item_click_selects_and_fires_change() {
        let mut page = page();
        let mut widget = loaded(&mut page);

        widget
            .on_event(&mut page, &Event::input("company_select_search", "acme"))
            .unwrap();
        let effects = widget
            .on_event(&mut page, &Event::click("company_select_dropdown_item_0"))
            .unwrap();

        assert_eq!(page.element("company_select").unwrap().value, "1");
        assert_eq!(
            page.element("company_select_search").unwrap().value,
            "Acme Management"
        );
        assert!(page.element("company_select_dropdown").unwrap().hidden);
        assert_eq!(
            effects,
            vec![Effect::SyntheticChange("company_select".into())]
        );
    }

    #[test]
    fn test_click_between_blur_and_settle_still_lands() {
        let mut page = page();
        let mut widget = loaded(&mut page);

        widget
            .on_event(&mut page, &Event::input("company_select_search", "summit"))
            .unwrap();
        widget
            .on_event(&mut page, &Event::new("company_select_search", EventKind::Blur))
            .unwrap();
        // the grace delay has not elapsed; the click still registers
        let effects = widget
            .on_event(&mut page, &Event::click("company_select_dropdown_item_0"))
            .unwrap();
        assert_eq!(page.element("company_select").unwrap().value, "2");
        assert_eq!(effects.len(), 1);

        // the settle tick afterwards must not resurrect the hide
        widget
            .on_event(
                &mut page,
                &Event::new("company_select_search", EventKind::BlurSettled),
            )
            .unwrap();
        assert!(page.element("company_select_dropdown").unwrap().hidden);
    }

    #[test]
    fn test_blur_settled_hides_list() {
        let mut page = page();
        let mut widget = loaded(&mut page);

        widget
            .on_event(&mut page, &Event::input("company_select_search", "a"))
            .unwrap();
        assert!(!page.element("company_select_dropdown").unwrap().hidden);

        widget
            .on_event(&mut page, &Event::new("company_select_search", EventKind::Blur))
            .unwrap();
        assert!(!page.element("company_select_dropdown").unwrap().hidden);
        widget
            .on_event(
                &mut page,
                &Event::new("company_select_search", EventKind::BlurSettled),
            )
            .unwrap();
        assert!(page.element("company_select_dropdown").unwrap().hidden);
    }

    #[test]
    fn test_preselected_value_seeds_search_text() {
        let mut page = page();
        page.element_mut("company_select").unwrap().value = "2".into();
        loaded(&mut page);

        assert_eq!(
            page.element("company_select_search").unwrap().value,
            "Summit Property Group"
        );
    }
}

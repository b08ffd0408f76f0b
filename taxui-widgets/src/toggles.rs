//! Checkbox-driven field visibility.
//!
//! Two independent toggles share the pattern: the self-managed checkbox
//! hides the management-company field (clearing its selection so a stale
//! company is never submitted), and the prepare-return checkbox hides the
//! reason-for-not-filing container. Initial state is applied at load.

use taxui_core::view::{CheckboxView, SelectView};
use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer};

#[derive(Debug)]
struct SelfManagedToggle {
    checkbox: CheckboxView,
    company_select: SelectView,
    group: String,
}

#[derive(Debug)]
struct ReasonToggle {
    checkbox: CheckboxView,
    container: String,
}

#[derive(Debug, Default)]
pub struct VisibilityToggles {
    self_managed: Option<SelfManagedToggle>,
    reason: Option<ReasonToggle>,
}

impl VisibilityToggles {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply_self_managed(&self, page: &mut Page) {
        let Some(toggle) = &self.self_managed else {
            return;
        };
        let checked = toggle.checkbox.checked(page);
        if checked {
            toggle.company_select.set_value(page, "");
        }
        if let Some(group) = page.element_mut(&toggle.group) {
            group.hidden = checked;
        }
    }

    fn apply_reason(&self, page: &mut Page) {
        let Some(toggle) = &self.reason else {
            return;
        };
        let checked = toggle.checkbox.checked(page);
        if let Some(container) = page.element_mut(&toggle.container) {
            container.hidden = checked;
        }
    }
}

impl Enhancer for VisibilityToggles {
    fn name(&self) -> &'static str {
        "visibility-toggles"
    }

    fn activate(&mut self, page: &Page) -> bool {
        self.self_managed = (|| {
            let checkbox =
                CheckboxView::bind(page, "id_is_self_managed", "visibility-toggles").ok()?;
            let company_select =
                SelectView::bind(page, "id_management_company", "visibility-toggles").ok()?;
            // the wrapping form group, bootstrap's either spelling
            let group = page.closest(company_select.id(), |e| {
                e.has_class("form-group") || e.has_class("mb-3")
            })?;
            Some(SelfManagedToggle {
                checkbox,
                company_select,
                group,
            })
        })();

        self.reason = (|| {
            let checkbox = CheckboxView::bind(page, "id_prepare_return", "visibility-toggles").ok()?;
            if !page.contains("reason-container") {
                return None;
            }
            Some(ReasonToggle {
                checkbox,
                container: "reason-container".to_string(),
            })
        })();

        self.self_managed.is_some() || self.reason.is_some()
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        match &event.kind {
            EventKind::PageLoad => {
                self.apply_self_managed(page);
                self.apply_reason(page);
            }
            EventKind::Change { .. } => {
                if self
                    .self_managed
                    .as_ref()
                    .is_some_and(|t| t.checkbox.id() == event.target)
                {
                    self.apply_self_managed(page);
                }
                if self
                    .reason
                    .as_ref()
                    .is_some_and(|t| t.checkbox.id() == event.target)
                {
                    self.apply_reason(page);
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
    use taxui_core::Element;

    fn association_form(self_managed: bool) -> Page {
        let mut page = Page::default();
        let mut checkbox = Element::new("id_is_self_managed", "input");
        checkbox.set_attr("type", "checkbox");
        checkbox.checked = self_managed;
        page.insert(checkbox);
        page.insert(Element::new("company-group", "div").with_class("form-group"));
        let mut select = Element::new("id_management_company", "select").with_parent("company-group");
        select.value = "3".into();
        page.insert(select);
        page
    }

    fn loaded(page: &mut Page) -> VisibilityToggles {
        let mut widget = VisibilityToggles::new();
        assert!(widget.activate(page));
        widget.on_event(page, &Event::page_load()).unwrap();
        widget
    }

    #[test]
    fn test_self_managed_hides_group_and_clears_selection() {
        let mut page = association_form(true);
        loaded(&mut page);

        assert!(page.element("company-group").unwrap().hidden);
        assert_eq!(page.element("id_management_company").unwrap().value, "");
    }

    #[test]
    fn test_unchecking_restores_the_field() {
        let mut page = association_form(true);
        let mut widget = loaded(&mut page);

        page.element_mut("id_is_self_managed").unwrap().checked = false;
        widget
            .on_event(&mut page, &Event::synthetic_change("id_is_self_managed"))
            .unwrap();
        assert!(!page.element("company-group").unwrap().hidden);
    }

    #[test]
    fn test_managed_association_keeps_selection() {
        let mut page = association_form(false);
        loaded(&mut page);

        assert!(!page.element("company-group").unwrap().hidden);
        assert_eq!(page.element("id_management_company").unwrap().value, "3");
    }

    #[test]
    fn test_prepare_return_hides_reason() {
        let mut page = Page::default();
        let mut checkbox = Element::new("id_prepare_return", "input");
        checkbox.set_attr("type", "checkbox");
        checkbox.checked = true;
        page.insert(checkbox);
        page.insert(Element::new("reason-container", "div"));

        let mut widget = loaded(&mut page);
        assert!(page.element("reason-container").unwrap().hidden);

        page.element_mut("id_prepare_return").unwrap().checked = false;
        widget
            .on_event(&mut page, &Event::synthetic_change("id_prepare_return"))
            .unwrap();
        assert!(!page.element("reason-container").unwrap().hidden);
    }

    #[test]
    fn test_nothing_to_toggle_stays_dormant() {
        let page = Page::default();
        let mut widget = VisibilityToggles::new();
        assert!(!widget.activate(&page));
    }
}

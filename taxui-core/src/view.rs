//! Typed views over page elements.
//!
//! Enhancers never poke at elements through bare id strings; they bind a
//! view once, which checks that the element exists and is the right kind of
//! control, and go through it afterwards. A view is a validated handle, not
//! a borrow, so one enhancer can hold several without fighting the borrow
//! checker over the page.

use crate::error::{Result, UiError};
use crate::page::{Element, FileMeta, OptionEntry, Page};

fn bind_checked<'p>(
    page: &'p Page,
    id: &str,
    tag: &str,
    expected: &'static str,
    component: &'static str,
) -> Result<&'p Element> {
    let element = page
        .element(id)
        .ok_or_else(|| UiError::missing_element(id, component))?;
    if !element.tag.eq_ignore_ascii_case(tag) {
        return Err(UiError::wrong_control(id, expected));
    }
    Ok(element)
}

/// A `<select>` control.
#[derive(Debug, Clone)]
pub struct SelectView {
    id: String,
}

impl SelectView {
    pub fn bind(page: &Page, id: &str, component: &'static str) -> Result<Self> {
        bind_checked(page, id, "select", "select", component)?;
        Ok(Self { id: id.to_string() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value<'p>(&self, page: &'p Page) -> &'p str {
        page.element(&self.id).map(|e| e.value.as_str()).unwrap_or("")
    }

    pub fn options<'p>(&self, page: &'p Page) -> &'p [OptionEntry] {
        page.element(&self.id)
            .map(|e| e.options.as_slice())
            .unwrap_or(&[])
    }

    /// Label of the currently selected option.
    pub fn selected_label<'p>(&self, page: &'p Page) -> Option<&'p str> {
        let element = page.element(&self.id)?;
        element
            .options
            .iter()
            .find(|o| o.value == element.value)
            .map(|o| o.label.as_str())
    }

    pub fn set_value(&self, page: &mut Page, value: &str) {
        if let Some(element) = page.element_mut(&self.id) {
            element.value = value.to_string();
        }
    }

    /// Replace the option list wholesale. Repopulation is destructive: the
    /// selection resets to the first option, exactly like a live select
    /// whose option nodes were rebuilt. Callers that want to carry a value
    /// across re-select it afterwards with [`Self::select_if_present`].
    pub fn set_options(&self, page: &mut Page, options: Vec<OptionEntry>) {
        if let Some(element) = page.element_mut(&self.id) {
            element.value = options.first().map(|o| o.value.clone()).unwrap_or_default();
            element.options = options;
        }
    }

    /// Placeholder plus one option per entry; value and label are the same
    /// string, as the year endpoints return bare values.
    pub fn populate(&self, page: &mut Page, placeholder: &str, entries: &[String]) {
        let mut options = Vec::with_capacity(entries.len() + 1);
        options.push(OptionEntry::placeholder(placeholder));
        options.extend(entries.iter().map(|e| OptionEntry::new(e.clone(), e.clone())));
        self.set_options(page, options);
    }

    /// Collapse to a lone placeholder (the disabled "select something first"
    /// and error states).
    pub fn collapse_to_placeholder(&self, page: &mut Page, label: &str) {
        self.set_options(page, vec![OptionEntry::placeholder(label)]);
        self.set_value(page, "");
    }

    pub fn set_disabled(&self, page: &mut Page, disabled: bool) {
        if let Some(element) = page.element_mut(&self.id) {
            element.disabled = disabled;
        }
    }

    /// Select `value` if the option list carries it; reports whether it did.
    pub fn select_if_present(&self, page: &mut Page, value: &str) -> bool {
        let present = self.options(page).iter().any(|o| o.value == value);
        if present {
            self.set_value(page, value);
        }
        present
    }

    pub fn append_option(&self, page: &mut Page, option: OptionEntry) {
        if let Some(element) = page.element_mut(&self.id) {
            element.options.push(option);
        }
    }

    pub fn set_hidden(&self, page: &mut Page, hidden: bool) {
        if let Some(element) = page.element_mut(&self.id) {
            element.hidden = hidden;
        }
    }
}

/// A text input.
#[derive(Debug, Clone)]
pub struct TextInputView {
    id: String,
}

impl TextInputView {
    pub fn bind(page: &Page, id: &str, component: &'static str) -> Result<Self> {
        bind_checked(page, id, "input", "text input", component)?;
        Ok(Self { id: id.to_string() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value<'p>(&self, page: &'p Page) -> &'p str {
        page.element(&self.id).map(|e| e.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&self, page: &mut Page, value: &str) {
        if let Some(element) = page.element_mut(&self.id) {
            element.value = value.to_string();
        }
    }
}

/// A checkbox input.
#[derive(Debug, Clone)]
pub struct CheckboxView {
    id: String,
}

impl CheckboxView {
    pub fn bind(page: &Page, id: &str, component: &'static str) -> Result<Self> {
        bind_checked(page, id, "input", "checkbox", component)?;
        Ok(Self { id: id.to_string() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn checked(&self, page: &Page) -> bool {
        page.element(&self.id).map(|e| e.checked).unwrap_or(false)
    }

    pub fn set_checked(&self, page: &mut Page, checked: bool) {
        if let Some(element) = page.element_mut(&self.id) {
            element.checked = checked;
        }
    }
}

/// A table with a sortable body.
#[derive(Debug, Clone)]
pub struct TableView {
    id: String,
    body: String,
}

impl TableView {
    /// Binds the table and its `<tbody>` (the first tbody child).
    pub fn bind(page: &Page, id: &str, component: &'static str) -> Result<Self> {
        bind_checked(page, id, "table", "table", component)?;
        let body = page
            .children_of(id)
            .into_iter()
            .find(|cid| {
                page.element(cid)
                    .map(|e| e.tag.eq_ignore_ascii_case("tbody"))
                    .unwrap_or(false)
            })
            .ok_or_else(|| UiError::wrong_control(id, "table with a tbody"))?;
        Ok(Self {
            id: id.to_string(),
            body,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header cells carrying `class`, anywhere under the table.
    pub fn headers_with_class(&self, page: &Page, class: &str) -> Vec<String> {
        page.elements
            .iter()
            .filter(|e| {
                e.tag.eq_ignore_ascii_case("th")
                    && e.has_class(class)
                    && page.ancestors(&e.id).contains(&self.id)
            })
            .map(|e| e.id.clone())
            .collect()
    }

    /// Body row ids in current document order.
    pub fn rows(&self, page: &Page) -> Vec<String> {
        page.children_of(&self.body)
            .into_iter()
            .filter(|cid| {
                page.element(cid)
                    .map(|e| e.tag.eq_ignore_ascii_case("tr"))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// The sort value for `row` under `key`: the row's own `data-{key}`,
    /// else the first cell that carries one.
    pub fn row_value(&self, page: &Page, row: &str, key: &str) -> String {
        if let Some(v) = page.element(row).and_then(|e| e.data(key)) {
            return v.to_string();
        }
        page.children_of(row)
            .into_iter()
            .find_map(|cid| {
                page.element(&cid)
                    .and_then(|e| e.data(key))
                    .map(str::to_string)
            })
            .unwrap_or_default()
    }

    /// Re-insert the existing rows in `order`.
    pub fn reorder_rows(&self, page: &mut Page, order: &[String]) {
        page.reorder_children(&self.body, order);
    }
}

/// The drag-and-drop upload region.
#[derive(Debug, Clone)]
pub struct DropZoneView {
    id: String,
    input: String,
}

impl DropZoneView {
    /// Binds the zone and its hidden file input (class `drop-zone__input`).
    pub fn bind(page: &Page, id: &str, component: &'static str) -> Result<Self> {
        page.element(id)
            .ok_or_else(|| UiError::missing_element(id, component))?;
        let input = page
            .children_of(id)
            .into_iter()
            .find(|cid| {
                page.element(cid)
                    .map(|e| e.has_class("drop-zone__input"))
                    .unwrap_or(false)
            })
            .ok_or_else(|| UiError::wrong_control(id, "drop zone with a file input"))?;
        Ok(Self {
            id: id.to_string(),
            input,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn input_id(&self) -> &str {
        &self.input
    }

    pub fn files<'p>(&self, page: &'p Page) -> &'p [FileMeta] {
        page.element(&self.input)
            .map(|e| e.files.as_slice())
            .unwrap_or(&[])
    }

    pub fn assign_files(&self, page: &mut Page, files: Vec<FileMeta>) {
        if let Some(element) = page.element_mut(&self.input) {
            element.files = files;
        }
    }

    pub fn set_over(&self, page: &mut Page, over: bool) {
        if let Some(element) = page.element_mut(&self.id) {
            if over {
                element.add_class("drop-zone--over");
            } else {
                element.remove_class("drop-zone--over");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_select() -> Page {
        let mut page = Page::default();
        let mut select = Element::new("years", "select");
        select.options = vec![
            OptionEntry::placeholder("Select a year"),
            OptionEntry::new("2023", "2023"),
        ];
        select.value = "2023".into();
        page.insert(select);
        page
    }

    #[test]
    fn test_bind_rejects_wrong_tag() {
        let mut page = page_with_select();
        page.insert(Element::new("plain", "div"));

        assert!(SelectView::bind(&page, "years", "test").is_ok());
        assert!(matches!(
            SelectView::bind(&page, "plain", "test").unwrap_err(),
            UiError::WrongControl { .. }
        ));
        assert!(matches!(
            SelectView::bind(&page, "gone", "test").unwrap_err(),
            UiError::MissingElement { .. }
        ));
    }

    #[test]
    fn test_set_options_resets_vanished_value() {
        let mut page = page_with_select();
        let select = SelectView::bind(&page, "years", "test").unwrap();

        select.populate(&mut page, "Select a year", &["2024".to_string()]);
        assert_eq!(select.value(&page), "");
        assert_eq!(select.options(&page).len(), 2);

        assert!(select.select_if_present(&mut page, "2024"));
        assert!(!select.select_if_present(&mut page, "1999"));
        assert_eq!(select.value(&page), "2024");
    }

    #[test]
    fn test_selected_label_tracks_value() {
        let mut page = page_with_select();
        let select = SelectView::bind(&page, "years", "test").unwrap();
        assert_eq!(select.selected_label(&page), Some("2023"));

        select.set_value(&mut page, "");
        assert_eq!(select.selected_label(&page), Some("Select a year"));
    }

    #[test]
    fn test_table_rows_and_values() {
        let mut page = Page::default();
        page.insert(Element::new("t", "table"));
        page.insert(Element::new("tb", "tbody").with_parent("t"));
        let mut r1 = Element::new("r1", "tr").with_parent("tb");
        r1.dataset.insert("units".into(), "12".into());
        page.insert(r1);
        let r2 = Element::new("r2", "tr").with_parent("tb");
        page.insert(r2);
        let mut cell = Element::new("r2c", "td").with_parent("r2");
        cell.dataset.insert("units".into(), "7".into());
        page.insert(cell);

        let table = TableView::bind(&page, "t", "test").unwrap();
        assert_eq!(table.rows(&page), vec!["r1", "r2"]);
        assert_eq!(table.row_value(&page, "r1", "units"), "12");
        assert_eq!(table.row_value(&page, "r2", "units"), "7");
        assert_eq!(table.row_value(&page, "r2", "name"), "");
    }

    #[test]
    fn test_drop_zone_binding() {
        let mut page = Page::default();
        page.insert(Element::new("zone", "div").with_class("drop-zone"));
        page.insert(
            Element::new("zone-input", "input")
                .with_parent("zone")
                .with_class("drop-zone__input"),
        );

        let zone = DropZoneView::bind(&page, "zone", "test").unwrap();
        assert_eq!(zone.input_id(), "zone-input");

        zone.assign_files(
            &mut page,
            vec![FileMeta::new("return.pdf", "application/pdf", 10)],
        );
        assert_eq!(zone.files(&page).len(), 1);
        assert!(zone.files(&page)[0].is_pdf());

        zone.set_over(&mut page, true);
        assert!(page.element("zone").unwrap().has_class("drop-zone--over"));
        zone.set_over(&mut page, false);
        assert!(!page.element("zone").unwrap().has_class("drop-zone--over"));
    }
}

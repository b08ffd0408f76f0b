//! Flat snapshot model of a server-rendered page.
//!
//! A `Page` is the unit the enhancement layer operates on: an ordered list of
//! elements with parent links, deserialized from a JSON snapshot of the
//! markup the backend rendered. Element order is document order, which is
//! what table sorting and option filtering preserve or permute.
//!
//! The model is deliberately small. It carries only what the enhancers read
//! or write: ids, classes, `data-*` entries, control values, select options,
//! chosen files, and the disabled/hidden flags. Anything else on the real
//! page is irrelevant to this layer and is not represented.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UiError};

/// A single (value, label) pair captured from a selection control.
///
/// Immutable once captured; filtering produces new vectors rather than
/// mutating the originals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
}

impl OptionEntry {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Placeholder entries carry an empty value.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new("", label)
    }
}

/// Metadata for a file chosen through an upload control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime == "application/pdf"
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// One element of the rendered page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dataset: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileMeta>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

impl Element {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// A `data-{key}` entry, if present.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.insert(name.to_string(), value.into());
    }

    /// The `name` attribute, used to find form fields to serialize.
    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }

    fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

/// A deserialized page snapshot plus run observations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Document location; client-side navigation rewrites this.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Out-of-band observations made during a run: submitted forms, rows
    /// scrolled into view, opened file dialogs. Keys are stable strings the
    /// CLI and tests assert on.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub markers: BTreeMap<String, String>,
}

impl Page {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| UiError::snapshot(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| UiError::snapshot(e.to_string()))
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    /// Ids of all elements carrying `class`, in document order.
    pub fn by_class(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.has_class(class))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Ids of all elements with the given tag, in document order.
    pub fn by_tag(&self, tag: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.is_tag(tag))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Direct children of `parent`, in document order.
    pub fn children_of(&self, parent: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.parent.as_deref() == Some(parent))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Parent chain of `id`, nearest first. A snapshot with a parent cycle
    /// yields a chain capped at the page size.
    pub fn ancestors(&self, id: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = self.element(id).and_then(|e| e.parent.clone());
        while let Some(pid) = current {
            if chain.contains(&pid) || chain.len() > self.elements.len() {
                break;
            }
            current = self.element(&pid).and_then(|e| e.parent.clone());
            chain.push(pid);
        }
        chain
    }

    /// Nearest ancestor (or the element itself) satisfying `pred`.
    pub fn closest<F>(&self, id: &str, pred: F) -> Option<String>
    where
        F: Fn(&Element) -> bool,
    {
        if let Some(el) = self.element(id) {
            if pred(el) {
                return Some(el.id.clone());
            }
        }
        self.ancestors(id)
            .into_iter()
            .find(|aid| self.element(aid).map(|e| pred(e)).unwrap_or(false))
    }

    /// Append a new element. Replaces any existing element with the same id.
    pub fn insert(&mut self, element: Element) {
        self.remove(&element.id);
        self.elements.push(element);
    }

    /// Insert `element` immediately before `anchor` in document order, or
    /// append if the anchor is gone.
    pub fn insert_before(&mut self, anchor: &str, element: Element) {
        self.remove(&element.id);
        match self.elements.iter().position(|e| e.id == anchor) {
            Some(idx) => self.elements.insert(idx, element),
            None => self.elements.push(element),
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.elements.retain(|e| e.id != id);
    }

    /// Remove all direct children of `parent` (and nothing deeper; the
    /// enhancers only ever build flat lists).
    pub fn remove_children(&mut self, parent: &str) {
        self.elements
            .retain(|e| e.parent.as_deref() != Some(parent));
    }

    /// Reorder the direct children of `parent` to match `order`, leaving
    /// every other element's position untouched. Ids missing from `order`
    /// keep their relative position at the end.
    pub fn reorder_children(&mut self, parent: &str, order: &[String]) {
        let slots: Vec<usize> = self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.parent.as_deref() == Some(parent))
            .map(|(i, _)| i)
            .collect();

        let mut reordered: Vec<Element> = Vec::with_capacity(slots.len());
        for id in order {
            if let Some(el) = self.element(id) {
                if el.parent.as_deref() == Some(parent) {
                    reordered.push(el.clone());
                }
            }
        }
        for &slot in &slots {
            let el = &self.elements[slot];
            if !order.contains(&el.id) {
                reordered.push(el.clone());
            }
        }

        for (slot, el) in slots.into_iter().zip(reordered) {
            self.elements[slot] = el;
        }
    }

    pub fn set_marker(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.markers.insert(key.into(), value.into());
    }

    pub fn marker(&self, key: &str) -> Option<&str> {
        self.markers.get(key).map(String::as_str)
    }

    /// Value of a query parameter in the current location, e.g. `tax_year`
    /// out of `/engagement-letter/?tax_year=2023`.
    pub fn location_param(&self, name: &str) -> Option<String> {
        let query = self.location.split_once('?')?.1;
        query.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == name).then(|| v.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> Page {
        let mut page = Page::default();
        page.insert(Element::new("table", "table"));
        page.insert(Element::new("body", "tbody").with_parent("table"));
        page.insert(Element::new("r1", "tr").with_parent("body"));
        page.insert(Element::new("r2", "tr").with_parent("body"));
        page.insert(Element::new("r3", "tr").with_parent("body"));
        page
    }

    #[test]
    fn test_reorder_children_keeps_other_positions() {
        let mut page = sample_page();
        let order = vec!["r3".to_string(), "r1".to_string(), "r2".to_string()];
        page.reorder_children("body", &order);

        assert_eq!(page.children_of("body"), order);
        // the table and tbody stay where they were
        assert_eq!(page.elements[0].id, "table");
        assert_eq!(page.elements[1].id, "body");
    }

    #[test]
    fn test_closest_walks_parent_chain() {
        let mut page = sample_page();
        page.insert(
            Element::new("edit-link", "a")
                .with_parent("r2")
                .with_class("btn"),
        );

        let row = page.closest("edit-link", |e| e.tag == "tr");
        assert_eq!(row.as_deref(), Some("r2"));
        assert_eq!(page.closest("edit-link", |e| e.tag == "form"), None);
    }

    #[test]
    fn test_location_param() {
        let page = Page {
            location: "/engagement-letter/?foo=1&tax_year=2023".into(),
            ..Default::default()
        };
        assert_eq!(page.location_param("tax_year").as_deref(), Some("2023"));
        assert_eq!(page.location_param("bar"), None);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let page = sample_page();
        let json = page.to_json_pretty().unwrap();
        let back = Page::from_json(&json).unwrap();
        assert_eq!(back.elements.len(), page.elements.len());
    }

    #[test]
    fn test_bad_snapshot_is_a_structured_error() {
        let err = Page::from_json("{not json").unwrap_err();
        assert!(matches!(err, UiError::Snapshot { .. }));
    }
}

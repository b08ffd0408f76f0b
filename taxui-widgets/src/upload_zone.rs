//! Drag-and-drop upload region.
//!
//! The zone accepts one file, by click-through to its hidden file input or
//! by native drop. A drop assigns the whole dropped list to the input —
//! standard form submission sends whatever the input holds — but the
//! preview thumbnail only ever shows the first file. Submitting with no
//! file chosen is blocked with an alert.

use taxui_core::page::{Element, FileMeta};
use taxui_core::view::DropZoneView;
use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer};

const PDF_ICON: &str = "url('/static/images/pdf-icon.png')";

#[derive(Debug, Default)]
pub struct UploadZone {
    zone: Option<DropZoneView>,
    upload_form: Option<String>,
}

impl UploadZone {
    pub fn new() -> Self {
        Self::default()
    }

    fn zone_child_with_class(page: &Page, zone: &str, class: &str) -> Option<String> {
        page.children_of(zone)
            .into_iter()
            .find(|cid| page.element(cid).map(|e| e.has_class(class)).unwrap_or(false))
    }

    fn update_thumbnail(page: &mut Page, zone_id: &str, file: &FileMeta) {
        // first file ever: the prompt goes away for good
        if let Some(prompt) = Self::zone_child_with_class(page, zone_id, "drop-zone__prompt") {
            page.remove(&prompt);
        }

        let thumb_id = match Self::zone_child_with_class(page, zone_id, "drop-zone__thumb") {
            Some(id) => id,
            None => {
                let id = format!("{zone_id}_thumb");
                page.insert(
                    Element::new(&id, "div")
                        .with_parent(zone_id)
                        .with_class("drop-zone__thumb"),
                );
                id
            }
        };

        if let Some(thumb) = page.element_mut(&thumb_id) {
            thumb.dataset.insert("label".into(), file.name.clone());
            if file.is_pdf() {
                thumb.set_attr("background-image", PDF_ICON);
            } else {
                thumb.attrs.remove("background-image");
            }
        }
    }

    fn show_file_info(page: &mut Page, file: &FileMeta) {
        if let Some(name_span) = page.element_mut("fileName") {
            name_span.text = file.name.clone();
        }
        if let Some(info) = page.element_mut("fileInfo") {
            info.remove_class("d-none");
        }
    }

    fn preview(page: &mut Page, zone_id: &str, file: &FileMeta) {
        Self::update_thumbnail(page, zone_id, file);
        Self::show_file_info(page, file);
    }
}

impl Enhancer for UploadZone {
    fn name(&self) -> &'static str {
        "upload-zone"
    }

    fn activate(&mut self, page: &Page) -> bool {
        let zone_id = match page.by_class("drop-zone").into_iter().next() {
            Some(id) => id,
            None => return false,
        };
        match DropZoneView::bind(page, &zone_id, "upload-zone") {
            Ok(zone) => {
                self.zone = Some(zone);
                self.upload_form = page.contains("uploadForm").then(|| "uploadForm".to_string());
                true
            }
            Err(_) => false,
        }
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        let zone = match &self.zone {
            Some(z) => z.clone(),
            None => return Ok(Vec::new()),
        };
        let on_zone = event.target == zone.id()
            || page.ancestors(&event.target).contains(&zone.id().to_string());

        match &event.kind {
            EventKind::Click if on_zone => {
                // forwards to the hidden input, which opens the native picker
                page.set_marker("file_dialog_opened", zone.input_id());
            }
            EventKind::DragOver if on_zone => zone.set_over(page, true),
            EventKind::DragLeave if on_zone => zone.set_over(page, false),
            EventKind::Drop { files } if on_zone => {
                if let Some(first) = files.first().cloned() {
                    zone.assign_files(page, files.clone());
                    Self::preview(page, zone.id(), &first);
                }
                zone.set_over(page, false);
            }
            EventKind::FilesChosen { .. } if event.target == zone.input_id() => {
                if let Some(first) = zone.files(page).first().cloned() {
                    Self::preview(page, zone.id(), &first);
                }
            }
            EventKind::Submit if Some(&event.target) == self.upload_form.as_ref() => {
                if zone.files(page).is_empty() {
                    page.set_marker(format!("prevented:{}", event.target), "true");
                    return Ok(vec![Effect::Alert("Please select a file to upload.".into())]);
                }
            }
            _ => {}
        }
        Ok(Vec::new())
    }
}

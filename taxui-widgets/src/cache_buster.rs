//! PDF link cache busting.
//!
//! Generated PDFs are served under stable URLs, so a regenerated form would
//! otherwise show the browser's cached copy. Every PDF link gets a `v=`
//! timestamp appended once at load; links that already carry one are left
//! alone. The timestamp is injected so simulations are reproducible.

use taxui_core::{Event, EventKind, Page, Result};

use crate::enhancer::{Effect, Enhancer};

#[derive(Debug)]
pub struct PdfCacheBuster {
    now_ms: i64,
    links: Vec<String>,
}

impl PdfCacheBuster {
    /// `now_ms` is the epoch-millisecond stamp appended to the links.
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms,
            links: Vec::new(),
        }
    }

    fn is_pdf_href(href: &str) -> bool {
        href.ends_with(".pdf") || href.contains(".pdf?")
    }

    fn already_busted(href: &str) -> bool {
        href.contains("?v=") || href.contains("&v=")
    }
}

impl Enhancer for PdfCacheBuster {
    fn name(&self) -> &'static str {
        "pdf-cache-buster"
    }

    fn activate(&mut self, page: &Page) -> bool {
        self.links = page
            .elements
            .iter()
            .filter(|e| {
                e.tag.eq_ignore_ascii_case("a")
                    && e.attr("href").map(Self::is_pdf_href).unwrap_or(false)
            })
            .map(|e| e.id.clone())
            .collect();
        !self.links.is_empty()
    }

    fn on_event(&mut self, page: &mut Page, event: &Event) -> Result<Vec<Effect>> {
        if !matches!(event.kind, EventKind::PageLoad) {
            return Ok(Vec::new());
        }
        for id in &self.links {
            if let Some(link) = page.element_mut(id) {
                let Some(href) = link.attr("href").map(str::to_string) else {
                    continue;
                };
                if Self::already_busted(&href) {
                    continue;
                }
                let joiner = if href.contains('?') { '&' } else { '?' };
                link.set_attr("href", format!("{href}{joiner}v={}", self.now_ms));
            }
        }
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxui_core::Element;

    fn link(id: &str, href: &str) -> Element {
        let mut link = Element::new(id, "a");
        link.set_attr("href", href);
        link
    }

    fn busted(page: &mut Page) {
        let mut widget = PdfCacheBuster::new(1_700_000_000_000);
        assert!(widget.activate(page));
        widget.on_event(page, &Event::page_load()).unwrap();
    }

    #[test]
    fn test_plain_pdf_link_gets_query() {
        let mut page = Page::default();
        page.insert(link("dl", "/media/extension_7.pdf"));
        busted(&mut page);

        assert_eq!(
            page.element("dl").unwrap().attr("href"),
            Some("/media/extension_7.pdf?v=1700000000000")
        );
    }

    #[test]
    fn test_existing_query_appends_with_ampersand() {
        let mut page = Page::default();
        page.insert(link("dl", "/media/extension_7.pdf?inline=1"));
        busted(&mut page);

        assert_eq!(
            page.element("dl").unwrap().attr("href"),
            Some("/media/extension_7.pdf?inline=1&v=1700000000000")
        );
    }

    #[test]
    fn test_already_stamped_link_is_untouched() {
        let mut page = Page::default();
        page.insert(link("dl", "/media/extension_7.pdf?v=123"));
        busted(&mut page);

        assert_eq!(
            page.element("dl").unwrap().attr("href"),
            Some("/media/extension_7.pdf?v=123")
        );
    }

    #[test]
    fn test_non_pdf_links_ignored() {
        let mut page = Page::default();
        page.insert(link("home", "/dashboard/"));

        let mut widget = PdfCacheBuster::new(0);
        assert!(!widget.activate(&page));
    }
}

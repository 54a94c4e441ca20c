// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document scan.
//!
//! [`scan`] queries the document once with the configured [`Selectors`] and
//! returns a [`PageLayout`] for the reactor plus a [`Registry`] that maps
//! every [`Target`] back to its live element. Missing elements are recorded
//! as absent; the dependent feature is simply never wired.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use folio_core::config::Selectors;
use folio_core::effect::Target;
use folio_core::page::{
    HeroSurface, LinkInfo, LinkSet, PageLayout, RevealGroup, SectionInfo,
};

/// Live elements behind each [`Target`], in the same order as the
/// [`PageLayout`] collections they were scanned with.
pub struct Registry {
    pub(crate) body: Option<HtmlElement>,
    pub(crate) header: Option<HtmlElement>,
    pub(crate) mobile_nav: Option<Element>,
    pub(crate) menu_toggle: Option<Element>,
    pub(crate) mobile_menu: Option<Element>,
    pub(crate) links: Vec<Element>,
    pub(crate) sections: Vec<HtmlElement>,
    pub(crate) reveals: Vec<Element>,
    pub(crate) triggers: Vec<Element>,
    pub(crate) panels: Vec<Option<Element>>,
    pub(crate) frames: Vec<Element>,
    pub(crate) hero_image: Option<HtmlImageElement>,
    pub(crate) hero_source: Option<Element>,
    pub(crate) back_to_top: Option<Element>,
    pub(crate) skip_link: Option<Element>,
    pub(crate) main: Option<HtmlElement>,
    pub(crate) anchors: Vec<Element>,
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("links", &self.links.len())
            .field("sections", &self.sections.len())
            .field("reveals", &self.reveals.len())
            .field("accordions", &self.triggers.len())
            .field("frames", &self.frames.len())
            .field("anchors", &self.anchors.len())
            .finish_non_exhaustive()
    }
}

impl Registry {
    fn empty() -> Self {
        Self {
            body: None,
            header: None,
            mobile_nav: None,
            menu_toggle: None,
            mobile_menu: None,
            links: Vec::new(),
            sections: Vec::new(),
            reveals: Vec::new(),
            triggers: Vec::new(),
            panels: Vec::new(),
            frames: Vec::new(),
            hero_image: None,
            hero_source: None,
            back_to_top: None,
            skip_link: None,
            main: None,
            anchors: Vec::new(),
        }
    }

    /// The element a target refers to, if it was found.
    #[must_use]
    pub fn element(&self, target: Target) -> Option<&Element> {
        match target {
            Target::Body => self.body.as_deref(),
            Target::Header => self.header.as_deref(),
            Target::MobileNav => self.mobile_nav.as_ref(),
            Target::MenuToggle => self.menu_toggle.as_ref(),
            Target::MobileMenu => self.mobile_menu.as_ref(),
            Target::NavLink(id) => self.links.get(id.index()),
            Target::Reveal(id) => self.reveals.get(id.index()),
            Target::AccordionTrigger(id) => self.triggers.get(id.index()),
            Target::AccordionPanel(id) => self.panels.get(id.index())?.as_ref(),
            Target::Frame(id) => self.frames.get(id.index()),
            Target::BackToTop => self.back_to_top.as_ref(),
            Target::Main => self.main.as_deref(),
        }
    }

    /// Sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[HtmlElement] {
        &self.sections
    }

    /// Reveal elements, cards first, then logos.
    #[must_use]
    pub fn reveals(&self) -> &[Element] {
        &self.reveals
    }

    /// Navigation links, desktop first, then mobile.
    #[must_use]
    pub fn links(&self) -> &[Element] {
        &self.links
    }

    /// Accordion triggers.
    #[must_use]
    pub fn triggers(&self) -> &[Element] {
        &self.triggers
    }

    /// In-page fragment anchors.
    #[must_use]
    pub fn anchors(&self) -> &[Element] {
        &self.anchors
    }

    /// Hamburger button.
    #[must_use]
    pub fn menu_toggle(&self) -> Option<&Element> {
        self.menu_toggle.as_ref()
    }

    /// Back-to-top button.
    #[must_use]
    pub fn back_to_top(&self) -> Option<&Element> {
        self.back_to_top.as_ref()
    }

    /// Skip link.
    #[must_use]
    pub fn skip_link(&self) -> Option<&Element> {
        self.skip_link.as_ref()
    }

    /// Current section rectangles (`offsetTop`, `offsetHeight`).
    #[must_use]
    pub fn measure_sections(&self) -> Vec<Rect> {
        self.sections.iter().map(section_rect).collect()
    }

    /// Height of the sticky header, or zero without one.
    #[must_use]
    pub fn header_height(&self) -> f64 {
        self.header
            .as_ref()
            .map_or(0.0, |h| f64::from(h.offset_height()))
    }
}

fn section_rect(el: &HtmlElement) -> Rect {
    let top = f64::from(el.offset_top());
    Rect::new(0.0, top, 0.0, top + f64::from(el.offset_height()))
}

fn one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn html(el: Option<Element>) -> Option<HtmlElement> {
    el.and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

fn hero(document: &Document, selectors: &Selectors) -> (HeroSurface, Registry) {
    let mut registry = Registry::empty();
    if let Some(img) = one(document, selectors.hero_image)
        .and_then(|e| e.dyn_into::<HtmlImageElement>().ok())
    {
        let source = img
            .parent_element()
            .and_then(|p| p.query_selector(selectors.hero_webp_source).ok().flatten());
        let surface = HeroSurface::Image {
            webp: source.is_some(),
        };
        registry.hero_image = Some(img);
        registry.hero_source = source;
        return (surface, registry);
    }
    let frames = all(document, selectors.hero_frames);
    if frames.is_empty() {
        return (HeroSurface::Absent, registry);
    }
    let tags = frames
        .iter()
        .map(|f| {
            f.get_attribute(selectors.hero_frame_attribute)
                .unwrap_or_default()
        })
        .collect::<Vec<String>>();
    registry.frames = frames;
    (HeroSurface::Elements { tags }, registry)
}

/// Scans the document.
#[must_use]
pub fn scan(document: &Document, selectors: &Selectors) -> (PageLayout, Registry) {
    let (hero_surface, mut registry) = hero(document, selectors);

    registry.body = document.body();
    registry.header = html(one(document, selectors.header));
    registry.mobile_nav = one(document, selectors.mobile_nav);
    registry.menu_toggle = one(document, selectors.menu_toggle);
    registry.mobile_menu = one(document, selectors.mobile_menu);
    registry.back_to_top = one(document, selectors.back_to_top);
    registry.skip_link = one(document, selectors.skip_link);
    registry.main = html(one(document, selectors.main));

    let mut links = Vec::new();
    for (set, selector) in [
        (LinkSet::Desktop, selectors.desktop_links),
        (LinkSet::Mobile, selectors.mobile_links),
    ] {
        for el in all(document, selector) {
            let href = el.get_attribute("href").unwrap_or_default();
            links.push(LinkInfo::new(href, set));
            registry.links.push(el);
        }
    }

    let mut sections = Vec::new();
    for el in all(document, selectors.sections) {
        let Ok(el) = el.dyn_into::<HtmlElement>() else {
            continue;
        };
        let rect = section_rect(&el);
        sections.push(SectionInfo::new(el.id(), rect.y0, rect.height()));
        registry.sections.push(el);
    }

    let mut reveals = Vec::new();
    for (group, selector) in [
        (RevealGroup::Card, selectors.reveal_cards),
        (RevealGroup::Logo, selectors.reveal_logos),
    ] {
        for el in all(document, selector) {
            reveals.push(group);
            registry.reveals.push(el);
        }
    }

    let mut accordions = Vec::new();
    for trigger in all(document, selectors.accordion_triggers) {
        accordions.push(trigger.get_attribute("aria-expanded").as_deref() == Some("true"));
        registry.panels.push(trigger.next_element_sibling());
        registry.triggers.push(trigger);
    }

    registry.anchors = all(document, selectors.anchors);

    let layout = PageLayout {
        sections,
        links,
        reveals,
        accordions,
        hero: hero_surface,
        has_header: registry.header.is_some(),
        has_mobile_nav: registry.mobile_nav.is_some(),
        has_menu: registry.menu_toggle.is_some() && registry.mobile_menu.is_some(),
        has_back_to_top: registry.back_to_top.is_some(),
        has_main: registry.main.is_some(),
    };
    (layout, registry)
}

/// Resolves a fragment `href` to its target's document offset
/// (`offsetTop`). Invalid selectors and missing targets give `None`.
#[must_use]
pub fn fragment_target_top(document: &Document, href: &str) -> Option<f64> {
    let el = html(one(document, href))?;
    Some(f64::from(el.offset_top()))
}

/// Appends a `<style>` element with `css` to the document head.
pub fn inject_stylesheet(document: &Document, css: &str) {
    let Some(head) = document.head() else {
        return;
    };
    let Ok(style) = document.create_element("style") else {
        return;
    };
    style.set_text_content(Some(css));
    let _ = head.append_child(&style);
}

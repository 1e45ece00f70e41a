//! Browser implementations of the tracker's host capabilities.

use std::rc::Rc;
use tocline_core::tracker::{self, TrackerEvent};
use tocline_core::{HeadingLevelRange, HeadingSurface, Rect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

/// Measures headings with `getBoundingClientRect`.
pub struct DomSurface {
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl HeadingSurface for DomSurface {
    type Element = Element;

    fn find(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.top(), rect.bottom())
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }
}

/// Scroll and resize listeners registered on the document.
pub struct DomEvents {
    target: web_sys::EventTarget,
}

impl DomEvents {
    pub fn new(document: &Document) -> Self {
        Self {
            target: document.clone().into(),
        }
    }
}

/// A registered listener; owns the JS closure until it is removed.
pub struct DomListener {
    event: TrackerEvent,
    closure: Closure<dyn Fn()>,
}

impl tracker::EventTarget for DomEvents {
    type Listener = DomListener;

    fn listen(&self, event: TrackerEvent, callback: Rc<dyn Fn()>) -> DomListener {
        let closure = Closure::<dyn Fn()>::new(move || callback());
        if let Err(err) = self
            .target
            .add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to listen for {}: {:?}", event.as_str(), err);
        }
        DomListener { event, closure }
    }

    fn unlisten(&self, listener: DomListener) {
        if let Err(err) = self.target.remove_event_listener_with_callback(
            listener.event.as_str(),
            listener.closure.as_ref().unchecked_ref(),
        ) {
            log::warn!("failed to remove {} listener: {:?}", listener.event.as_str(), err);
        }
    }
}

/// Ids of `h{min}.anchor` through `h{max}.anchor` headings, in document order.
pub fn heading_ids(document: &Document, range: HeadingLevelRange) -> Vec<String> {
    let selector = range
        .levels()
        .map(|level| format!("h{level}.anchor"))
        .collect::<Vec<_>>()
        .join(",");
    let Ok(nodes) = document.query_selector_all(&selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(|element| element.id())
        .filter(|id| !id.is_empty())
        .collect()
}

/// Height of the `.navbar` element, if the page has one.
pub fn navbar_height(document: &Document) -> Option<f64> {
    document
        .query_selector(".navbar")
        .ok()
        .flatten()
        .map(|navbar| f64::from(navbar.client_height()))
}

/// Marks the link pointing at `active` and unmarks every other link.
pub fn highlight_link(document: &Document, link_class: &str, active_class: &str, active: Option<&str>) {
    if link_class.is_empty() || active_class.is_empty() {
        return;
    }
    let links = document.get_elements_by_class_name(link_class);
    for index in 0..links.length() {
        let Some(link) = links.item(index) else {
            continue;
        };
        let is_active = active.is_some() && link_fragment(&link).as_deref() == active;
        let classes = link.class_list();
        let result = if is_active {
            classes.add_1(active_class)
        } else {
            classes.remove_1(active_class)
        };
        if let Err(err) = result {
            log::warn!("failed to update link class: {:?}", err);
        }
    }
}

/// Decoded `href` fragment of a link; the raw fragment when it is not valid
/// percent-encoding.
fn link_fragment(link: &Element) -> Option<String> {
    let href = link.get_attribute("href")?;
    let (_, fragment) = href.split_once('#')?;
    match js_sys::decode_uri_component(fragment) {
        Ok(decoded) => Some(String::from(decoded)),
        Err(_) => {
            log::warn!("undecodable link fragment #{fragment}");
            Some(fragment.to_string())
        }
    }
}

//! Scroll highlighting for a mounted table of contents.

use crate::dom::{DomEvents, DomSurface, heading_ids, highlight_link, navbar_height};
use crate::parse_config;
use std::rc::Rc;
use tocline_core::{ActiveChange, Session, TocConfig, anchor_top_offset, start_session};
use wasm_bindgen::prelude::*;

/// Highlights the TOC link of the heading being read.
///
/// ```javascript
/// const highlighter = new TocHighlighter({ maxHeadingLevel: 4 });
/// highlighter.start();   // when the TOC mounts
/// highlighter.stop();    // when it unmounts
/// ```
#[wasm_bindgen]
pub struct TocHighlighter {
    config: TocConfig,
    session: Option<Session<DomEvents>>,
}

#[wasm_bindgen]
impl TocHighlighter {
    /// Creates a stopped highlighter; `config` uses the theme's camelCase
    /// keys and may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<TocHighlighter, JsError> {
        Ok(Self {
            config: parse_config(config)?,
            session: None,
        })
    }

    /// Collects the page's headings and starts tracking them.
    ///
    /// A running session is stopped first. Pages without headings start
    /// nothing.
    pub fn start(&mut self) -> Result<(), JsError> {
        self.stop();

        let window = web_sys::window().ok_or_else(|| JsError::new("no window available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("no document available"))?;

        let ids = heading_ids(&document, self.config.range());
        let anchor_offset =
            anchor_top_offset(self.config.navbar.hide_on_scroll, navbar_height(&document));

        let classes = self.config.classes.clone();
        let events = Rc::new(DomEvents::new(&document));
        let surface = Rc::new(DomSurface::new(window, document.clone()));

        highlight_link(&document, &classes.link, &classes.link_active, None);
        self.session = Some(start_session(
            ids,
            surface,
            events,
            anchor_offset,
            move |change: &ActiveChange| {
                highlight_link(
                    &document,
                    &classes.link,
                    &classes.link_active,
                    change.current.as_deref(),
                );
            },
        ));
        Ok(())
    }

    /// Detaches the listeners. Link classes are left as they are.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
    }

    /// Whether a session is observing scroll and resize.
    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_running)
    }

    /// Id of the highlighted heading, if any.
    #[wasm_bindgen(getter, js_name = activeId)]
    pub fn active_id(&self) -> Option<String> {
        self.session.as_ref().and_then(Session::active)
    }
}

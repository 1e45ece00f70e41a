//! Active heading tracking.
//!
//! The tracker decides which heading represents the reader's scroll position
//! so the rendered table of contents can highlight exactly one entry. All
//! access to the rendering surface goes through [`HeadingSurface`] and
//! [`EventTarget`], which keeps the selection rules host-agnostic: the WASM
//! crate implements them on top of the DOM, tests implement them with
//! synthetic measurements.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Vertical extent of an element relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Distance from the top of the viewport to the element's top edge.
    pub top: f64,
    /// Distance from the top of the viewport to the element's bottom edge.
    pub bottom: f64,
}

impl Rect {
    /// Creates a rectangle from its top and bottom coordinates.
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Hidden or empty elements report the same top and bottom.
    pub fn is_degenerate(&self) -> bool {
        self.top == self.bottom
    }
}

/// Measurement capabilities the tracker needs from its host.
pub trait HeadingSurface {
    /// Handle to a rendered element.
    type Element;

    /// Looks up the rendered element for a heading id.
    fn find(&self, id: &str) -> Option<Self::Element>;

    /// Current bounding rectangle of an element.
    fn rect(&self, element: &Self::Element) -> Rect;

    /// Parent element, used when an element has no height of its own.
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;
}

/// Host occurrences that trigger a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// The document scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
}

impl TrackerEvent {
    /// DOM event name.
    pub fn as_str(self) -> &'static str {
        match self {
            TrackerEvent::Scroll => "scroll",
            TrackerEvent::Resize => "resize",
        }
    }
}

/// Listener registration capabilities the tracker needs from its host.
pub trait EventTarget {
    /// Token identifying a registered listener.
    type Listener;

    /// Registers `callback` to run on every occurrence of `event`.
    fn listen(&self, event: TrackerEvent, callback: Rc<dyn Fn()>) -> Self::Listener;

    /// Removes a listener previously returned by [`EventTarget::listen`].
    fn unlisten(&self, listener: Self::Listener);
}

/// Measures a heading, climbing to ancestors while the rectangle is empty.
///
/// Returns `None` when the host has no element for `id`. When no ancestor
/// has a height either, the last measured rectangle is returned.
pub fn measure<S: HeadingSurface>(surface: &S, id: &str) -> Option<Rect> {
    let mut element = surface.find(id)?;
    loop {
        let rect = surface.rect(&element);
        if !rect.is_degenerate() {
            return Some(rect);
        }
        match surface.parent(&element) {
            Some(parent) => element = parent,
            None => return Some(rect),
        }
    }
}

/// Picks the heading that represents the current scroll position.
///
/// The first heading at or below `anchor_offset` is current when it sits in
/// the upper half of the viewport; otherwise the heading before it is. When
/// every heading has scrolled past the anchor the last one is current.
/// Headings the host cannot measure are skipped.
pub fn select_active<'a, S: HeadingSurface>(
    ids: &'a [String],
    surface: &S,
    anchor_offset: f64,
) -> Option<&'a str> {
    let measured: Vec<(&'a str, Rect)> = ids
        .iter()
        .filter_map(|id| match measure(surface, id) {
            Some(rect) => Some((id.as_str(), rect)),
            None => {
                log::debug!("heading #{id} has no rendered element; skipping");
                None
            }
        })
        .collect();

    let next = measured
        .iter()
        .position(|(_, rect)| rect.top >= anchor_offset);

    match next {
        Some(index) => {
            let (id, rect) = measured[index];
            if rect.top > 0.0 && rect.bottom < surface.viewport_height() / 2.0 {
                Some(id)
            } else {
                // No previous heading means the reader is above the first one.
                index.checked_sub(1).map(|prev| measured[prev].0)
            }
        }
        None => measured.last().map(|(id, _)| *id),
    }
}

/// Highlight transition reported when the active heading changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChange {
    /// Heading that loses its active marker.
    pub previous: Option<String>,
    /// Heading that gains the active marker.
    pub current: Option<String>,
}

/// Remembers the last reported heading and turns recomputations into
/// transitions.
#[derive(Debug, Clone)]
pub struct ActiveHeadingTracker {
    ids: Vec<String>,
    anchor_offset: f64,
    active: Option<String>,
}

impl ActiveHeadingTracker {
    /// Creates a tracker over ids in document order.
    ///
    /// Negative offsets are accepted and compared as is.
    pub fn new(ids: Vec<String>, anchor_offset: f64) -> Self {
        Self {
            ids,
            anchor_offset,
            active: None,
        }
    }

    /// Ids observed by this tracker.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Offset below which a heading counts as passed.
    pub fn anchor_offset(&self) -> f64 {
        self.anchor_offset
    }

    /// Last reported active heading.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Recomputes the active heading, returning a transition only when it
    /// differs from the previously reported one.
    pub fn update<S: HeadingSurface>(&mut self, surface: &S) -> Option<ActiveChange> {
        let current = select_active(&self.ids, surface, self.anchor_offset).map(str::to_owned);
        if current == self.active {
            return None;
        }
        log::trace!("active heading {:?} -> {:?}", self.active, current);
        let previous = std::mem::replace(&mut self.active, current.clone());
        Some(ActiveChange { previous, current })
    }
}

struct SessionState {
    tracker: ActiveHeadingTracker,
    on_change: Box<dyn FnMut(&ActiveChange)>,
    stopped: bool,
}

/// A running observation of one mounted table of contents.
///
/// Dropping the session detaches its listeners.
pub struct Session<E: EventTarget> {
    events: Rc<E>,
    listeners: Vec<E::Listener>,
    state: Rc<RefCell<SessionState>>,
}

/// Starts tracking `ids` and reports every active-heading transition.
///
/// The active heading is computed once immediately and then on every scroll
/// and resize. An empty id list attaches nothing and never calls `on_change`.
pub fn start_session<S, E, F>(
    ids: Vec<String>,
    surface: Rc<S>,
    events: Rc<E>,
    anchor_offset: f64,
    on_change: F,
) -> Session<E>
where
    S: HeadingSurface + 'static,
    E: EventTarget,
    F: FnMut(&ActiveChange) + 'static,
{
    let empty = ids.is_empty();
    let state = Rc::new(RefCell::new(SessionState {
        tracker: ActiveHeadingTracker::new(ids, anchor_offset),
        on_change: Box::new(on_change),
        stopped: empty,
    }));

    let mut session = Session {
        events,
        listeners: Vec::new(),
        state,
    };
    if empty {
        log::debug!("no headings to track; session not started");
        return session;
    }

    log::debug!(
        "tracking {} headings with anchor offset {anchor_offset}",
        session.state.borrow().tracker.ids().len()
    );

    let tick: Rc<dyn Fn()> = {
        let state = Rc::clone(&session.state);
        Rc::new(move || recompute(&state, surface.as_ref()))
    };
    tick();
    for event in [TrackerEvent::Scroll, TrackerEvent::Resize] {
        let listener = session.events.listen(event, Rc::clone(&tick));
        session.listeners.push(listener);
    }
    session
}

fn recompute<S: HeadingSurface>(state: &RefCell<SessionState>, surface: &S) {
    let change = {
        let mut state = state.borrow_mut();
        if state.stopped {
            return;
        }
        state.tracker.update(surface)
    };
    let Some(change) = change else {
        return;
    };

    // The callback runs without the state borrowed so it may query the
    // session; it is taken out for the call and put back afterwards.
    let mut on_change = std::mem::replace(
        &mut state.borrow_mut().on_change,
        Box::new(|_: &ActiveChange| {}),
    );
    on_change(&change);
    state.borrow_mut().on_change = on_change;
}

impl<E: EventTarget> Session<E> {
    /// Heading currently reported as active.
    pub fn active(&self) -> Option<String> {
        self.state.borrow().tracker.active().map(str::to_owned)
    }

    /// Whether listeners are attached.
    pub fn is_running(&self) -> bool {
        !self.state.borrow().stopped
    }

    /// Detaches the scroll and resize listeners. Calling it again, or on a
    /// session that never started, does nothing.
    pub fn stop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.stopped = true;
        }
        if self.listeners.is_empty() {
            return;
        }
        for listener in self.listeners.drain(..) {
            self.events.unlisten(listener);
        }
        log::debug!("active heading tracking stopped");
    }
}

impl<E: EventTarget> Drop for Session<E> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<E: EventTarget> fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Session")
            .field("tracker", &state.tracker)
            .field("stopped", &state.stopped)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Offset of the reading anchor: the navbar height, or 0 when the navbar
/// hides on scroll.
pub fn anchor_top_offset(hide_on_scroll: bool, navbar_height: Option<f64>) -> f64 {
    if hide_on_scroll {
        0.0
    } else {
        navbar_height.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// Elements are indices into `rects`; `parents` maps an element to its
    /// parent element.
    #[derive(Default)]
    struct FakeSurface {
        ids: HashMap<String, usize>,
        rects: RefCell<Vec<Rect>>,
        parents: HashMap<usize, usize>,
        viewport: f64,
    }

    impl FakeSurface {
        fn with_tops(tops: &[f64], height: f64, viewport: f64) -> Self {
            let mut surface = FakeSurface {
                viewport,
                ..Default::default()
            };
            for (i, top) in tops.iter().enumerate() {
                surface.ids.insert(format!("h{i}"), i);
                surface.rects.borrow_mut().push(Rect::new(*top, top + height));
            }
            surface
        }

        fn scroll_by(&self, delta: f64) {
            for rect in self.rects.borrow_mut().iter_mut() {
                rect.top -= delta;
                rect.bottom -= delta;
            }
        }
    }

    impl HeadingSurface for FakeSurface {
        type Element = usize;

        fn find(&self, id: &str) -> Option<usize> {
            self.ids.get(id).copied()
        }

        fn rect(&self, element: &usize) -> Rect {
            self.rects.borrow()[*element]
        }

        fn parent(&self, element: &usize) -> Option<usize> {
            self.parents.get(element).copied()
        }

        fn viewport_height(&self) -> f64 {
            self.viewport
        }
    }

    #[derive(Default)]
    struct FakeEvents {
        next: Cell<usize>,
        listeners: RefCell<Vec<(usize, TrackerEvent, Rc<dyn Fn()>)>>,
    }

    impl FakeEvents {
        fn fire(&self, event: TrackerEvent) {
            let callbacks: Vec<_> = self
                .listeners
                .borrow()
                .iter()
                .filter(|(_, e, _)| *e == event)
                .map(|(_, _, cb)| Rc::clone(cb))
                .collect();
            for cb in callbacks {
                cb();
            }
        }

        fn count(&self) -> usize {
            self.listeners.borrow().len()
        }
    }

    impl EventTarget for FakeEvents {
        type Listener = usize;

        fn listen(&self, event: TrackerEvent, callback: Rc<dyn Fn()>) -> usize {
            let id = self.next.get();
            self.next.set(id + 1);
            self.listeners.borrow_mut().push((id, event, callback));
            id
        }

        fn unlisten(&self, listener: usize) {
            self.listeners.borrow_mut().retain(|(id, _, _)| *id != listener);
        }
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("h{i}")).collect()
    }

    fn recorder() -> (Rc<RefCell<Vec<ActiveChange>>>, impl FnMut(&ActiveChange)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |change: &ActiveChange| {
            sink.borrow_mut().push(change.clone())
        })
    }

    #[test]
    fn heading_in_upper_half_is_active() {
        let surface = FakeSurface::with_tops(&[-50.0, 30.0, 500.0], 30.0, 800.0);
        assert_eq!(select_active(&ids(3), &surface, 0.0), Some("h1"));
    }

    #[test]
    fn heading_below_reading_position_falls_back_to_previous() {
        let surface = FakeSurface::with_tops(&[-50.0, 790.0, 900.0], 30.0, 800.0);
        assert_eq!(select_active(&ids(3), &surface, 0.0), Some("h0"));
    }

    #[test]
    fn all_headings_passed_selects_last() {
        let surface = FakeSurface::with_tops(&[-900.0, -500.0, -20.0], 30.0, 800.0);
        assert_eq!(select_active(&ids(3), &surface, 0.0), Some("h2"));
    }

    #[test]
    fn first_heading_outside_reading_position_selects_nothing() {
        let surface = FakeSurface::with_tops(&[600.0, 900.0], 30.0, 800.0);
        assert_eq!(select_active(&ids(2), &surface, 0.0), None);
    }

    #[test]
    fn heading_exactly_at_viewport_top_is_not_accepted() {
        let surface = FakeSurface::with_tops(&[-100.0, 0.0], 30.0, 800.0);
        assert_eq!(select_active(&ids(2), &surface, 0.0), Some("h0"));
    }

    #[test]
    fn anchor_offset_counts_headings_under_the_navbar_as_passed() {
        let surface = FakeSurface::with_tops(&[10.0, 40.0, 200.0], 20.0, 800.0);
        assert_eq!(select_active(&ids(3), &surface, 0.0), Some("h0"));
        assert_eq!(select_active(&ids(3), &surface, 60.0), Some("h2"));
    }

    #[test]
    fn empty_list_selects_nothing() {
        let surface = FakeSurface::default();
        assert_eq!(select_active(&[], &surface, 0.0), None);
    }

    #[test]
    fn unmeasurable_headings_are_skipped() {
        let surface = FakeSurface::with_tops(&[-50.0, 790.0], 30.0, 800.0);
        let ids = vec!["gone".to_string(), "h0".to_string(), "h1".to_string()];
        assert_eq!(select_active(&ids, &surface, 0.0), Some("h0"));
    }

    #[test]
    fn degenerate_rect_uses_ancestor_measurement() {
        let mut surface = FakeSurface::with_tops(&[-50.0, 40.0], 30.0, 800.0);
        // h1 is hidden; its wrapper (element 2) sits at 100..140.
        surface.rects.borrow_mut()[1] = Rect::new(0.0, 0.0);
        surface.rects.borrow_mut().push(Rect::new(100.0, 140.0));
        surface.parents.insert(1, 2);
        assert_eq!(measure(&surface, "h1"), Some(Rect::new(100.0, 140.0)));
        assert_eq!(select_active(&ids(2), &surface, 0.0), Some("h1"));
    }

    #[test]
    fn degenerate_rect_without_parent_is_used_as_is() {
        let surface = FakeSurface::with_tops(&[5.0], 0.0, 800.0);
        assert_eq!(measure(&surface, "h0"), Some(Rect::new(5.0, 5.0)));
    }

    #[test]
    fn tracker_reports_only_changes() {
        let surface = FakeSurface::with_tops(&[-50.0, 30.0, 500.0], 30.0, 800.0);
        let mut tracker = ActiveHeadingTracker::new(ids(3), 0.0);
        assert_eq!(
            tracker.update(&surface),
            Some(ActiveChange {
                previous: None,
                current: Some("h1".into())
            })
        );
        assert_eq!(tracker.update(&surface), None);
        assert_eq!(tracker.active(), Some("h1"));
    }

    #[test]
    fn session_computes_eagerly_and_on_events() {
        let surface = Rc::new(FakeSurface::with_tops(&[-50.0, 30.0, 500.0], 30.0, 800.0));
        let events = Rc::new(FakeEvents::default());
        let (seen, on_change) = recorder();

        let session = start_session(ids(3), Rc::clone(&surface), Rc::clone(&events), 0.0, on_change);
        assert_eq!(events.count(), 2);
        assert_eq!(session.active().as_deref(), Some("h1"));
        assert_eq!(seen.borrow().len(), 1);

        // Scrolling within the same section reports nothing new.
        surface.scroll_by(10.0);
        events.fire(TrackerEvent::Scroll);
        assert_eq!(seen.borrow().len(), 1);

        surface.scroll_by(400.0);
        events.fire(TrackerEvent::Resize);
        assert_eq!(
            seen.borrow().last(),
            Some(&ActiveChange {
                previous: Some("h1".into()),
                current: Some("h2".into())
            })
        );
    }

    #[test]
    fn empty_session_attaches_nothing() {
        let surface = Rc::new(FakeSurface::default());
        let events = Rc::new(FakeEvents::default());
        let (seen, on_change) = recorder();

        let mut session = start_session(Vec::new(), surface, Rc::clone(&events), 0.0, on_change);
        assert_eq!(events.count(), 0);
        assert!(!session.is_running());
        session.stop();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn stopping_twice_is_harmless_and_silences_callbacks() {
        let surface = Rc::new(FakeSurface::with_tops(&[-50.0, 30.0, 500.0], 30.0, 800.0));
        let events = Rc::new(FakeEvents::default());
        let (seen, on_change) = recorder();

        let mut session =
            start_session(ids(3), Rc::clone(&surface), Rc::clone(&events), 0.0, on_change);
        session.stop();
        session.stop();
        assert_eq!(events.count(), 0);

        surface.scroll_by(400.0);
        events.fire(TrackerEvent::Scroll);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn dropping_session_detaches_listeners() {
        let surface = Rc::new(FakeSurface::with_tops(&[10.0], 30.0, 800.0));
        let events = Rc::new(FakeEvents::default());
        {
            let _session = start_session(ids(1), surface, Rc::clone(&events), 0.0, |_| {});
            assert_eq!(events.count(), 2);
        }
        assert_eq!(events.count(), 0);
    }

    #[test]
    fn anchor_offset_follows_navbar_behaviour() {
        assert_eq!(anchor_top_offset(true, Some(60.0)), 0.0);
        assert_eq!(anchor_top_offset(false, Some(60.0)), 60.0);
        assert_eq!(anchor_top_offset(false, None), 0.0);
    }
}

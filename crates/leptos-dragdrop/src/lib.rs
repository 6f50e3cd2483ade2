//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events, generic over the key
//! of the dragged element and the type of the drop target.
//! Uses movement threshold to distinguish click from drag.

use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Anything usable as a dragged key or a drop target
pub trait DndValue: Clone + PartialEq + Send + Sync + 'static {}

impl<V: Clone + PartialEq + Send + Sync + 'static> DndValue for V {}

/// DnD state signals
pub struct DndSignals<K: DndValue, T: DndValue> {
    /// Key of the element being dragged (set once the threshold is crossed)
    pub dragging: RwSignal<Option<K>>,
    /// Target currently under the pointer
    pub drop_target: RwSignal<Option<T>>,
    /// True for a short moment after a drag ends, to swallow the trailing click
    pub drag_just_ended: RwSignal<bool>,
    /// Pending key (mousedown but not yet dragging)
    pending: RwSignal<Option<K>>,
    /// Start position for movement detection
    start: RwSignal<(i32, i32)>,
}

impl<K: DndValue, T: DndValue> Clone for DndSignals<K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: DndValue, T: DndValue> Copy for DndSignals<K, T> {}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays raised
const DRAG_END_GRACE_MS: u64 = 100;

pub fn create_dnd_signals<K: DndValue, T: DndValue>() -> DndSignals<K, T> {
    DndSignals {
        dragging: RwSignal::new(None),
        drop_target: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        pending: RwSignal::new(None),
        start: RwSignal::new((0, 0)),
    }
}

/// Whether the pointer moved far enough from `start` to begin a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

impl<K: DndValue, T: DndValue> DndSignals<K, T> {
    /// Tracked: is `key` the element being dragged
    pub fn is_dragging(&self, key: &K) -> bool {
        self.dragging.with(|d| d.as_ref() == Some(key))
    }

    /// Tracked: is `target` the current drop target
    pub fn is_drop_target(&self, target: &T) -> bool {
        self.drop_target.with(|t| t.as_ref() == Some(target))
    }

    /// Tracked: is any drag in progress
    pub fn is_active(&self) -> bool {
        self.dragging.with(|d| d.is_some())
    }
}

/// End drag operation
pub fn end_drag<K: DndValue, T: DndValue>(dnd: &DndSignals<K, T>) {
    dnd.dragging.try_set(None);
    dnd.drop_target.try_set(None);
    dnd.pending.try_set(None);
    dnd.drag_just_ended.try_set(true);

    let clear = dnd.drag_just_ended;
    set_timeout(
        move || {
            clear.try_set(false);
        },
        Duration::from_millis(DRAG_END_GRACE_MS),
    );
}

/// What a mouseup means for the drag state it ends
#[derive(Debug, Clone, PartialEq)]
pub enum Release<K, T> {
    /// No drag started; the trailing click belongs to the element
    Click,
    /// Dragged, but released away from any target
    Cancel,
    Drop(K, T),
}

pub fn classify_release<K, T>(dragging: Option<K>, target: Option<T>) -> Release<K, T> {
    match (dragging, target) {
        (None, _) => Release::Click,
        (Some(_), None) => Release::Cancel,
        (Some(key), Some(target)) => Release::Drop(key, target),
    }
}

fn is_interactive(target: &web_sys::EventTarget) -> bool {
    target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlAnchorElement>().is_some()
}

/// Create mousedown handler for draggable elements
/// Records pending drag with start position
pub fn make_on_mousedown<K: DndValue, T: DndValue>(
    dnd: DndSignals<K, T>,
    key: K,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Controls inside a draggable keep their own behaviour
        if let Some(target) = ev.target() {
            if is_interactive(&target) {
                return;
            }
        }
        dnd.pending.try_set(Some(key.clone()));
        dnd.start.try_set((ev.client_x(), ev.client_y()));
    }
}

/// Bind window mousemove - starts drag if moved enough
///
/// The listener is removed when the calling view is cleaned up.
pub fn bind_global_mousemove<K: DndValue, T: DndValue>(dnd: DndSignals<K, T>) {
    let handle = window_event_listener(ev::mousemove, move |ev| {
        let Some(pending) = dnd.pending.try_get_untracked() else { return };
        let Some(dragging) = dnd.dragging.try_get_untracked() else { return };

        if pending.is_some() && dragging.is_none() {
            let start = dnd.start.get_untracked();
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging.set(pending);
            }
        }
    });
    on_cleanup(move || handle.remove());
}

/// Create mouseenter handler for a drop target
pub fn make_on_target_mouseenter<K: DndValue, T: DndValue>(
    dnd: DndSignals<K, T>,
    target: T,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    make_on_target_mouseenter_if(dnd, target, |_, _| true)
}

/// Create mouseenter handler for a drop target that only accepts some keys
pub fn make_on_target_mouseenter_if<K, T, F>(
    dnd: DndSignals<K, T>,
    target: T,
    accepts: F,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: DndValue,
    T: DndValue,
    F: Fn(&K, &T) -> bool + Clone + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging.get_untracked() {
            if accepts(&dragging, &target) {
                dnd.drop_target.set(Some(target.clone()));
            }
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K: DndValue, T: DndValue>(
    dnd: DndSignals<K, T>,
) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging.with_untracked(|d| d.is_some()) {
            dnd.drop_target.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection
///
/// Both listeners are removed when the calling view is cleaned up.
pub fn bind_global_mouseup<K, T, F>(dnd: DndSignals<K, T>, on_drop: F)
where
    K: DndValue,
    T: DndValue,
    F: Fn(K, T) + 'static,
{
    let handle = window_event_listener(ev::mouseup, move |_ev| {
        let Some(dragging) = dnd.dragging.try_get_untracked() else { return };
        let Some(target) = dnd.drop_target.try_get_untracked() else { return };

        match classify_release(dragging, target) {
            Release::Click => {
                dnd.pending.set(None);
            }
            Release::Cancel => end_drag(&dnd),
            Release::Drop(dragged, target) => {
                end_drag(&dnd);
                on_drop(dragged, target);
            }
        }
    });
    on_cleanup(move || handle.remove());

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_moves_stay_a_click() {
        assert!(!exceeds_threshold((100, 100), (100, 100)));
        assert!(!exceeds_threshold((100, 100), (105, 95)));
    }

    #[test]
    fn test_release_without_drag_is_a_click() {
        assert_eq!(classify_release::<&str, u8>(None, None), Release::Click);
        assert_eq!(classify_release::<&str, u8>(None, Some(1)), Release::Click);
    }

    #[test]
    fn test_release_after_drag() {
        assert_eq!(classify_release::<&str, u8>(Some("t1"), None), Release::Cancel);
        assert_eq!(classify_release(Some("t1"), Some(2u8)), Release::Drop("t1", 2));
    }

    #[test]
    fn test_move_past_threshold_starts_drag() {
        assert!(exceeds_threshold((100, 100), (106, 100)));
        assert!(exceeds_threshold((100, 100), (100, 94)));
    }
}

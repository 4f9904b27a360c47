//! Thin lookups and listener plumbing over `web_sys`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{
    js_sys, Document, Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::error::{EffectError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(EffectError::Missing("window"))
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(EffectError::Missing("document"))
}

/// First element matching `selector`, cast to `T`.
pub fn query<T: JsCast>(document: &Document, selector: &'static str) -> Result<T> {
    document
        .query_selector(selector)?
        .ok_or(EffectError::Missing(selector))?
        .dyn_into::<T>()
        .map_err(|_| EffectError::Js(format!("`{}` is not the expected element type", selector)))
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Attaches `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Observes `targets` and hands every reported entry to `on_entry` along
/// with the observer, so callers can unobserve.
pub fn observe<F>(targets: &[Element], threshold: f64, mut on_entry: F) -> Result<IntersectionObserver>
where
    F: FnMut(IntersectionObserverEntry, &IntersectionObserver) + 'static,
{
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            on_entry(entry.unchecked_into::<IntersectionObserverEntry>(), &observer);
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for target in targets {
        observer.observe(target);
    }
    Ok(observer)
}

/// The first report for an element can be intersecting while still under the
/// threshold, so both are checked.
pub fn past_threshold(is_intersecting: bool, ratio: f64, threshold: f64) -> bool {
    is_intersecting && ratio >= threshold
}

/// Logs a failed DOM call at debug level. Nothing on these paths is worth
/// stopping an effect for.
pub fn log_failure<T>(what: &str, result: std::result::Result<T, JsValue>) {
    if let Err(e) = result {
        log::debug!("{} failed: {:?}", what, e);
    }
}

/// `window.scrollY`, or 0 when the browser refuses to say.
pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn inner_size(window: &Window) -> (f64, f64) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_needs_intersection_and_ratio() {
        assert!(past_threshold(true, 0.1, 0.1));
        assert!(past_threshold(true, 1.0, 0.5));
        assert!(!past_threshold(true, 0.05, 0.1));
        assert!(!past_threshold(false, 0.0, 0.1));
    }
}

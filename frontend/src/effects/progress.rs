use log::info;
use web_sys::{Document, HtmlElement};

use crate::dom;
use crate::error::{EffectError, Result};

pub const PROGRESS_SELECTOR: &str = ".scroll-progress";

/// Percentage of the page scrolled, in `[0, 100]`. A page that does not
/// scroll reports 0.
pub fn scrolled_percent(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn init(document: &Document) -> Result<()> {
    let window = dom::window()?;
    let bar: HtmlElement = dom::query(document, PROGRESS_SELECTOR)?;
    let root = document
        .document_element()
        .ok_or(EffectError::Missing("document element"))?;

    dom::listen(&window, "scroll", move |_| {
        let percent = scrolled_percent(
            root.scroll_top() as f64,
            root.scroll_height() as f64,
            root.client_height() as f64,
        );
        dom::log_failure(
            "progress width",
            bar.style().set_property("width", &format!("{}%", percent)),
        );
    })?;
    info!("Scroll progress bar attached");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_down() {
        assert_eq!(scrolled_percent(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(scrolled_percent(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scrolled_percent(1000.0, 2000.0, 1000.0), 100.0);
    }

    #[test]
    fn page_shorter_than_viewport_is_zero() {
        assert_eq!(scrolled_percent(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scrolled_percent(10.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(scrolled_percent(-40.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scrolled_percent(1100.0, 2000.0, 1000.0), 100.0);
    }
}

use log::info;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions};

use crate::config::Config;
use crate::dom;
use crate::error::Result;

pub const BUTTON_SELECTOR: &str = "#scrollTop";
pub const VISIBLE_CLASS: &str = "visible";

/// No hysteresis: visible strictly above the threshold.
pub fn should_show(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn init(document: &Document, config: &Config) -> Result<()> {
    let window = dom::window()?;
    let button: Element = dom::query(document, BUTTON_SELECTOR)?;

    {
        let button = button.clone();
        let window_clone = window.clone();
        let threshold = config.scroll_top_threshold;
        dom::listen(&window, "scroll", move |_| {
            let show = should_show(dom::scroll_y(&window_clone), threshold);
            dom::log_failure(
                "scroll-to-top class",
                button.class_list().toggle_with_force(VISIBLE_CLASS, show),
            );
        })?;
    }

    {
        let window_clone = window.clone();
        dom::listen(&button, "click", move |_| {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window_clone.scroll_to_with_scroll_to_options(&options);
        })?;
    }
    info!("Scroll-to-top control attached");
    Ok(())
}

use log::{debug, info};
use web_sys::{Document, Element};

use crate::config::Config;
use crate::dom;
use crate::error::Result;

pub const REVEAL_SELECTOR: &str = ".fade-in, .gallery-img";
pub const VISIBLE_CLASS: &str = "visible";

/// Adds the visible marker once. Returns whether this call changed anything.
pub fn reveal(element: &Element) -> bool {
    let classes = element.class_list();
    if classes.contains(VISIBLE_CLASS) {
        return false;
    }
    classes.add_1(VISIBLE_CLASS).is_ok()
}

pub fn init(document: &Document, config: &Config) -> Result<()> {
    let elements = dom::query_all(document, REVEAL_SELECTOR)?;
    if elements.is_empty() {
        debug!("No reveal targets on this page");
        return Ok(());
    }

    let threshold = config.reveal_threshold;
    // Elements stay observed after being revealed.
    dom::observe(&elements, threshold, move |entry, _| {
        if dom::past_threshold(entry.is_intersecting(), entry.intersection_ratio(), threshold) {
            reveal(&entry.target());
        }
    })?;
    info!("Watching {} elements for reveal", elements.len());
    Ok(())
}

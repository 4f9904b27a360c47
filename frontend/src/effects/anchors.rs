use log::info;
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions};

use crate::dom;
use crate::error::Result;

pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

/// `"#pricing"` -> `Some("pricing")`. A bare `#` has no target.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn init(document: &Document) -> Result<()> {
    let anchors = dom::query_all(document, ANCHOR_SELECTOR)?;
    for anchor in &anchors {
        let href = anchor.get_attribute("href").unwrap_or_default();
        let document = document.clone();
        dom::listen(anchor, "click", move |e| {
            e.prevent_default();
            // No matching section: the jump is still suppressed.
            if let Some(target) = fragment_id(&href).and_then(|id| document.get_element_by_id(id)) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    info!("Smooth scrolling wired for {} anchors", anchors.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_ids() {
        assert_eq!(fragment_id("#pricing"), Some("pricing"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("pricing"), None);
        assert_eq!(fragment_id("#a b"), Some("a b"));
    }
}

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlFormElement};

use crate::config::Config;
use crate::dom;
use crate::error::Result;

pub const FORM_ID: &str = "contactForm";

fn find_form(document: &Document) -> Option<HtmlFormElement> {
    document
        .get_element_by_id(FORM_ID)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
}

/// The contact form is optional. Without it nothing is attached.
pub fn init(document: &Document, config: &Config) -> Result<()> {
    let Some(form) = find_form(document) else {
        debug!("No #{} on this page, form handler disabled", FORM_ID);
        return Ok(());
    };

    let window = dom::window()?;
    let message = config.form_ack_message.clone();
    let form_clone = form.clone();
    dom::listen(&form, "submit", move |e| {
        e.prevent_default();
        dom::log_failure("form acknowledgement", window.alert_with_message(&message));
        form_clone.reset();
    })?;
    info!("Contact form handler attached");
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn page_without_form_starts_cleanly() {
        let document = dom::document().unwrap();
        assert!(find_form(&document).is_none());
        assert!(init(&document, &Config::default()).is_ok());
    }

    #[wasm_bindgen_test]
    fn non_form_element_with_the_id_is_ignored() {
        let document = dom::document().unwrap();
        let div = document.create_element("div").unwrap();
        div.set_id(FORM_ID);
        document.body().unwrap().append_child(&div).unwrap();

        assert!(find_form(&document).is_none());
        assert!(init(&document, &Config::default()).is_ok());
        div.remove();
    }

    #[wasm_bindgen_test]
    fn finds_the_contact_form() {
        let document = dom::document().unwrap();
        let form = document.create_element("form").unwrap();
        form.set_id(FORM_ID);
        document.body().unwrap().append_child(&form).unwrap();

        assert!(find_form(&document).is_some());
        assert!(init(&document, &Config::default()).is_ok());
        form.remove();
    }
}

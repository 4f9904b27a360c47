use log::{debug, error, info};
use web_sys::Document;

mod config;
mod dom;
mod error;
mod effects {
    pub mod anchors;
    pub mod carousel;
    pub mod contact_form;
    pub mod counter;
    pub mod nav;
    pub mod particles;
    pub mod progress;
    pub mod reveal;
    pub mod scroll_top;
}

use config::Config;
use error::{EffectError, Result};

/// Logs how an effect came up. Returns whether it is running.
fn report(name: &str, outcome: Result<()>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(EffectError::Missing(what)) => {
            debug!("Skipping {}: {} not on this page", name, what);
            false
        }
        Err(e) => {
            error!("Failed to start {}: {}", name, e);
            false
        }
    }
}

fn start(document: &Document) {
    let config = Config::from_document(document);

    let outcomes = [
        ("particle field", effects::particles::init(document, &config)),
        ("reveal", effects::reveal::init(document, &config)),
        ("counters", effects::counter::init(document, &config)),
        ("carousel", effects::carousel::init(document, &config)),
        ("smooth scroll", effects::anchors::init(document)),
        ("navigation", effects::nav::init(document, &config)),
        ("scroll progress", effects::progress::init(document)),
        ("scroll to top", effects::scroll_top::init(document, &config)),
        ("contact form", effects::contact_form::init(document, &config)),
    ];
    let total = outcomes.len();
    let running = outcomes
        .into_iter()
        .map(|(name, outcome)| report(name, outcome))
        .filter(|&running| running)
        .count();
    info!("{} of {} page effects running", running, total);
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page effects");
    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            error!("No document to attach to: {}", e);
            return;
        }
    };

    if document.ready_state() == "loading" {
        let ready_document = document.clone();
        if let Err(e) = dom::listen(&document, "DOMContentLoaded", move |_| start(&ready_document)) {
            error!("Could not wait for DOMContentLoaded: {}", e);
        }
    } else {
        start(&document);
    }
}

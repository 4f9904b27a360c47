use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::{debug, info};
use web_sys::{Document, HtmlElement};

use crate::config::Config;
use crate::dom;
use crate::error::{EffectError, Result};

pub const TRACK_SELECTOR: &str = ".carousel";
pub const CARD_SELECTOR: &str = ".testimonial-card";
pub const PREV_SELECTOR: &str = ".prev";
pub const NEXT_SELECTOR: &str = ".next";

/// Index of the testimonial card in view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slides {
    index: usize,
    count: usize,
}

impl Slides {
    /// `None` when there is nothing to slide through.
    pub fn new(count: usize) -> Option<Self> {
        (count > 0).then_some(Self { index: 0, count })
    }

    /// Wraps any offset, negative ones included, into `[0, count)`.
    pub fn show(&mut self, i: i64) -> usize {
        self.index = i.rem_euclid(self.count as i64) as usize;
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.show(self.index as i64 + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.show(self.index as i64 - 1)
    }
}

pub fn transform_for(index: usize) -> String {
    format!("translateX(-{}%)", index * 100)
}

struct Carousel {
    track: HtmlElement,
    slides: Cell<Slides>,
}

impl Carousel {
    fn step(&self, forward: bool) {
        let mut slides = self.slides.get();
        let index = if forward { slides.next() } else { slides.prev() };
        self.slides.set(slides);
        dom::log_failure(
            "carousel transform",
            self.track.style().set_property("transform", &transform_for(index)),
        );
    }
}

pub fn init(document: &Document, config: &Config) -> Result<()> {
    let track: HtmlElement = dom::query(document, TRACK_SELECTOR)?;
    let cards = dom::query_all(document, CARD_SELECTOR)?;
    let slides = Slides::new(cards.len()).ok_or(EffectError::Missing(CARD_SELECTOR))?;
    let carousel = Rc::new(Carousel {
        track,
        slides: Cell::new(slides),
    });

    for (selector, forward) in [(PREV_SELECTOR, false), (NEXT_SELECTOR, true)] {
        match document.query_selector(selector)? {
            Some(button) => {
                let carousel = carousel.clone();
                dom::listen(&button, "click", move |_| carousel.step(forward))?;
            }
            None => debug!("Carousel has no {} button", selector),
        }
    }

    {
        let carousel = carousel.clone();
        Interval::new(config.carousel_interval_ms, move || carousel.step(true)).forget();
    }
    info!("Carousel running over {} cards", cards.len());
    Ok(())
}

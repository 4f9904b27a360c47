use std::cell::Cell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::Config;
use crate::dom;
use crate::error::{EffectError, Result};

pub const TOGGLE_SELECTOR: &str = ".nav-toggle";
pub const LIST_SELECTOR: &str = ".nav-links";
pub const LINK_SELECTOR: &str = ".nav-links a";
pub const OPEN_CLASS: &str = "open";
pub const ACTIVE_CLASS: &str = "active";

/// Mobile menu open/closed state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    open: bool,
}

impl Menu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Index of the last section whose top is at or above `scroll_y + offset`.
/// `tops` must be in document order.
pub fn active_section(tops: &[f64], scroll_y: f64, offset: f64) -> Option<usize> {
    let probe = scroll_y + offset;
    tops.iter().rposition(|&top| top <= probe)
}

struct NavMenu {
    toggle: Element,
    list: Element,
    state: Cell<Menu>,
}

impl NavMenu {
    fn update(&self, change: impl FnOnce(&mut Menu)) {
        let mut menu = self.state.get();
        change(&mut menu);
        self.state.set(menu);

        let open = menu.is_open();
        dom::log_failure("toggle class", self.toggle.class_list().toggle_with_force(OPEN_CLASS, open));
        dom::log_failure("menu class", self.list.class_list().toggle_with_force(OPEN_CLASS, open));
        dom::log_failure(
            "aria-expanded",
            self.toggle
                .set_attribute("aria-expanded", if open { "true" } else { "false" }),
        );
    }
}

pub fn init(document: &Document, config: &Config) -> Result<()> {
    let window = dom::window()?;
    let toggle = document
        .query_selector(TOGGLE_SELECTOR)?
        .ok_or(EffectError::Missing(TOGGLE_SELECTOR))?;
    let list = document
        .query_selector(LIST_SELECTOR)?
        .ok_or(EffectError::Missing(LIST_SELECTOR))?;
    let links = dom::query_all(document, LINK_SELECTOR)?;

    let menu = Rc::new(NavMenu {
        toggle: toggle.clone(),
        list,
        state: Cell::new(Menu::default()),
    });

    {
        let menu = menu.clone();
        dom::listen(&toggle, "click", move |_| {
            menu.update(|m| {
                m.toggle();
            })
        })?;
    }

    for link in &links {
        let menu = menu.clone();
        let window_clone = window.clone();
        let breakpoint = config.mobile_breakpoint;
        dom::listen(link, "click", move |_| {
            let (width, _) = dom::inner_size(&window_clone);
            if width <= breakpoint {
                menu.update(Menu::close);
            }
        })?;
    }

    let sections: Vec<HtmlElement> = links
        .iter()
        .filter_map(|link| link.get_attribute("href"))
        .filter_map(|href| href.strip_prefix('#').map(str::to_owned))
        .filter(|id| !id.is_empty())
        .filter_map(|id| document.get_element_by_id(&id))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let section_count = sections.len();

    let highlight = {
        let window = window.clone();
        let offset = config.nav_offset;
        Rc::new(move || {
            let tops: Vec<f64> = sections.iter().map(|s| s.offset_top() as f64).collect();
            let current = active_section(&tops, dom::scroll_y(&window), offset)
                .map(|i| format!("#{}", sections[i].id()));

            for link in &links {
                dom::log_failure("clear active link", link.class_list().remove_1(ACTIVE_CLASS));
            }
            if let Some(href) = current {
                if let Some(link) = links
                    .iter()
                    .find(|a| a.get_attribute("href").as_deref() == Some(href.as_str()))
                {
                    dom::log_failure("mark active link", link.class_list().add_1(ACTIVE_CLASS));
                }
            }
        })
    };

    {
        let highlight = highlight.clone();
        dom::listen(&window, "scroll", move |_| highlight())?;
    }
    highlight();

    info!("Navigation wired, tracking {} sections", section_count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_toggles_and_closes() {
        let mut menu = Menu::default();
        assert!(!menu.is_open());
        assert!(menu.toggle());
        assert!(!menu.toggle());
        menu.toggle();
        menu.close();
        assert!(!menu.is_open());
        menu.close();
        assert!(!menu.is_open());
    }

    #[test]
    fn picks_section_under_the_nav_bar() {
        let tops = [0.0, 800.0, 1600.0];
        assert_eq!(active_section(&tops, 750.0, 120.0), Some(1));
        assert_eq!(active_section(&tops, 0.0, 120.0), Some(0));
        assert_eq!(active_section(&tops, 1480.0, 120.0), Some(2));
        assert_eq!(active_section(&tops, 1479.0, 120.0), Some(1));
    }

    #[test]
    fn nothing_active_above_first_section() {
        let tops = [400.0, 900.0];
        assert_eq!(active_section(&tops, 100.0, 120.0), None);
        assert_eq!(active_section(&[], 5000.0, 120.0), None);
    }
}

use gloo_timers::callback::Timeout;
use log::{info, warn};
use web_sys::{Document, Element};

use crate::config::Config;
use crate::dom;
use crate::error::Result;

pub const COUNTER_SELECTOR: &str = ".counter";
pub const TARGET_ATTRIBUTE: &str = "data-target";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Show this value and tick again.
    Continue(i64),
    /// Show the target and stop.
    Done(i64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    target: i64,
    increment: f64,
}

impl CountUp {
    pub fn new(target: i64, speed: f64) -> Self {
        let speed = if speed > 0.0 { speed } else { 1.0 };
        Self {
            target,
            increment: target as f64 / speed,
        }
    }

    pub fn next(&self, current: i64) -> Step {
        if current >= self.target {
            return Step::Done(self.target);
        }
        let next = (current as f64 + self.increment).ceil() as i64;
        if next >= self.target {
            Step::Done(self.target)
        } else {
            Step::Continue(next)
        }
    }

    /// Steps from the text currently shown. Empty text counts as 0; text that
    /// is not a number ("1,000", "50+") jumps straight to the target.
    pub fn next_from_text(&self, text: &str) -> Step {
        let text = text.trim();
        if text.is_empty() {
            return self.next(0);
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => self.next(value as i64),
            _ => Step::Done(self.target),
        }
    }
}

fn tick(element: Element, count: CountUp, step_ms: u32) {
    let shown = element.text_content().unwrap_or_default();
    match count.next_from_text(&shown) {
        Step::Continue(value) => {
            element.set_text_content(Some(&value.to_string()));
            Timeout::new(step_ms, move || tick(element, count, step_ms)).forget();
        }
        Step::Done(target) => element.set_text_content(Some(&target.to_string())),
    }
}

pub fn init(document: &Document, config: &Config) -> Result<()> {
    let counters = dom::query_all(document, COUNTER_SELECTOR)?;
    if counters.is_empty() {
        return Ok(());
    }

    let threshold = config.counter_threshold;
    let speed = config.counter_speed;
    let step_ms = config.counter_step_ms;
    dom::observe(&counters, threshold, move |entry, observer| {
        if !dom::past_threshold(entry.is_intersecting(), entry.intersection_ratio(), threshold) {
            return;
        }
        let element = entry.target();
        observer.unobserve(&element);

        let raw = element.get_attribute(TARGET_ATTRIBUTE).unwrap_or_default();
        match raw.trim().parse::<i64>() {
            Ok(target) => tick(element, CountUp::new(target, speed), step_ms),
            Err(_) => warn!("Counter has unusable {}=\"{}\"", TARGET_ATTRIBUTE, raw),
        }
    })?;
    info!("Watching {} counters", counters.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(count: CountUp, start: i64) -> (Vec<i64>, i64) {
        let mut shown = Vec::new();
        let mut current = start;
        loop {
            match count.next(current) {
                Step::Continue(value) => {
                    shown.push(value);
                    current = value;
                }
                Step::Done(target) => return (shown, target),
            }
            assert!(shown.len() < 10_000, "count-up did not terminate");
        }
    }

    #[test]
    fn counts_to_exact_target_and_stops() {
        let count = CountUp::new(100, 200.0);
        let (shown, last) = run(count, 0);
        assert_eq!(last, 100);
        assert!(shown.windows(2).all(|w| w[0] <= w[1]));
        assert!(shown.iter().all(|&v| v < 100));
        assert_eq!(count.next(100), Step::Done(100));
    }

    #[test]
    fn large_targets_take_about_speed_steps() {
        let (shown, last) = run(CountUp::new(25_000, 200.0), 0);
        assert_eq!(last, 25_000);
        assert!((195..=200).contains(&shown.len()), "took {} steps", shown.len());
    }

    #[test]
    fn zero_or_negative_target_finishes_immediately() {
        assert_eq!(CountUp::new(0, 200.0).next(0), Step::Done(0));
        assert_eq!(CountUp::new(-5, 200.0).next(0), Step::Done(-5));
    }

    #[test]
    fn resumes_from_displayed_value() {
        let count = CountUp::new(1000, 200.0);
        assert_eq!(count.next(500), Step::Continue(505));
        assert_eq!(count.next(998), Step::Done(1000));
    }

    #[test]
    fn reads_back_displayed_text() {
        let count = CountUp::new(100, 200.0);
        assert_eq!(count.next_from_text(""), Step::Continue(1));
        assert_eq!(count.next_from_text("  41 "), Step::Continue(42));
        assert_eq!(count.next_from_text("100"), Step::Done(100));
    }

    #[test]
    fn unreadable_text_jumps_to_target() {
        let count = CountUp::new(1000, 200.0);
        assert_eq!(count.next_from_text("1,000"), Step::Done(1000));
        assert_eq!(count.next_from_text("50+"), Step::Done(1000));
        assert_eq!(count.next_from_text("NaN"), Step::Done(1000));
    }

    #[test]
    fn degenerate_speed_does_not_divide_by_zero() {
        assert_eq!(CountUp::new(10, 0.0).next(0), Step::Done(10));
    }
}

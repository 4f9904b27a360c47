use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{js_sys, CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::config::Config;
use crate::dom;
use crate::error::{EffectError, Result};

pub const CANVAS_SELECTOR: &str = "#hero-canvas";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Particle {
    /// `rng` yields values in `[0, 1)`.
    pub fn random(width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
        Self {
            x: rng() * width,
            y: rng() * height,
            radius: rng() * 2.0 + 0.5,
            vx: rng() * 0.5 - 0.25,
            vy: rng() * 0.5 - 0.25,
        }
    }

    fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;
        bounce(&mut self.x, &mut self.vx, width);
        bounce(&mut self.y, &mut self.vy, height);
    }
}

/// Mirrors a wall crossing back inside `[0, extent]` and turns the velocity around.
fn bounce(pos: &mut f64, vel: &mut f64, extent: f64) {
    let extent = extent.max(0.0);
    if *pos < 0.0 {
        *pos = -*pos;
        *vel = vel.abs();
    } else if *pos > extent {
        *pos = 2.0 * extent - *pos;
        *vel = -vel.abs();
    }
    // A shrunken surface can leave the mirrored point outside too.
    *pos = pos.clamp(0.0, extent);
}

pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(count: usize, width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
        let particles = (0..count).map(|_| Particle::random(width, height, rng)).collect();
        Self { particles }
    }

    pub fn step(&mut self, width: f64, height: f64) {
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

pub fn init(document: &Document, config: &Config) -> Result<()> {
    let window = dom::window()?;
    let canvas: HtmlCanvasElement = dom::query(document, CANVAS_SELECTOR)?;
    let context = canvas
        .get_context("2d")?
        .ok_or(EffectError::Missing("2d canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)?;

    fit_to_viewport(&window, &canvas);
    {
        let window_clone = window.clone();
        let canvas = canvas.clone();
        dom::listen(&window, "resize", move |_| fit_to_viewport(&window_clone, &canvas))?;
    }

    let mut rng = js_sys::Math::random;
    let field = ParticleField::new(
        config.particle_count,
        canvas.width() as f64,
        canvas.height() as f64,
        &mut rng,
    );
    info!("Particle field started with {} particles", config.particle_count);
    animate(window, canvas, context, field, config.particle_fill.clone())
}

fn fit_to_viewport(window: &Window, canvas: &HtmlCanvasElement) {
    let (width, height) = dom::inner_size(window);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
}

fn animate(
    window: Window,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    mut field: ParticleField,
    fill: String,
) -> Result<()> {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next_frame = frame.clone();
    let window_clone = window.clone();

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;
        context.clear_rect(0.0, 0.0, width, height);

        field.step(width, height);
        context.set_fill_style_str(&fill);
        for p in field.particles() {
            context.begin_path();
            if context.arc(p.x, p.y, p.radius, 0.0, TAU).is_ok() {
                context.fill();
            }
        }

        if let Some(callback) = next_frame.borrow().as_ref() {
            dom::log_failure(
                "next animation frame",
                window_clone.request_animation_frame(callback.as_ref().unchecked_ref()),
            );
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = frame.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn inside(p: &Particle, width: f64, height: f64) -> bool {
        (0.0..=width).contains(&p.x) && (0.0..=height).contains(&p.y)
    }

    #[test]
    fn new_particles_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::new(80, 1280.0, 720.0, &mut || rng.gen::<f64>());
        assert_eq!(field.particles().len(), 80);
        for p in field.particles() {
            assert!(inside(p, 1280.0, 720.0));
            assert!((0.5..2.5).contains(&p.radius));
            assert!((-0.25..0.25).contains(&p.vx));
            assert!((-0.25..0.25).contains(&p.vy));
        }
    }

    #[test]
    fn particles_never_leave_the_surface() {
        let mut rng = StdRng::seed_from_u64(42);
        // Tiny surface so every particle hits the walls many times.
        let (width, height) = (3.0, 2.0);
        let mut field = ParticleField::new(80, width, height, &mut || rng.gen::<f64>());
        for _ in 0..5_000 {
            field.step(width, height);
            assert!(field.particles().iter().all(|p| inside(p, width, height)));
        }
    }

    #[test]
    fn bounce_keeps_speed() {
        let mut p = Particle { x: 0.1, y: 5.0, radius: 1.0, vx: -0.25, vy: 0.0 };
        p.advance(10.0, 10.0);
        assert_eq!(p.vx, 0.25);
        assert!((p.x - 0.15).abs() < 1e-12);

        let mut p = Particle { x: 9.9, y: 5.0, radius: 1.0, vx: 0.25, vy: 0.0 };
        p.advance(10.0, 10.0);
        assert_eq!(p.vx, -0.25);
        assert!((p.x - 9.85).abs() < 1e-12);
    }

    #[test]
    fn shrinking_surface_pulls_particles_back_in() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::new(80, 1920.0, 1080.0, &mut || rng.gen::<f64>());
        field.step(400.0, 300.0);
        assert!(field.particles().iter().all(|p| inside(p, 400.0, 300.0)));
    }
}

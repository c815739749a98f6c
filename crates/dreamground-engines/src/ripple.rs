//! Ripple view: particles that spawn on a timer, grow and fade, then retire
//! into a pool.

use dreamground_core::{Argb, DrawSurface, Paint, RippleSettings, RippleStyle, UnitInterval};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::interpolator::CurvePreset;
use crate::pool::{Pool, Recycle, Slot};

/// One ripple.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Trace {
    pub x: f32,
    pub y: f32,
    /// Spawn time in milliseconds.
    pub birth: u64,
    /// Radius multiplier sampled from the radius fluctuation.
    pub scale: f32,
}

impl Recycle for Trace {}

/// Particle lifecycle engine behind the ripple view.
#[derive(Debug)]
pub struct RippleEngine {
    settings: RippleSettings,
    curves: CurvePreset,
    pool: Pool<Trace>,
    /// Live particles in spawn order.
    live: Vec<Slot>,
    /// Scratch buffers for retiring without allocating each tick.
    spare: Vec<Slot>,
    dead: Vec<Slot>,
    last_spawn_ms: Option<u64>,
    /// Pointer press waiting to be turned into a ripple on the next tick.
    pending_touch: Option<(f32, f32)>,
    rng: StdRng,
}

impl RippleEngine {
    pub fn new(settings: RippleSettings) -> Self {
        let settings = settings.sanitized();
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        log::debug!(
            "ripple engine: style {:?}, lifetime {} ms, pool of {}",
            settings.style,
            settings.lifetime_ms,
            settings.pool_capacity
        );
        Self {
            curves: CurvePreset::for_style(settings.style),
            pool: Pool::new(settings.pool_capacity),
            live: Vec::with_capacity(settings.pool_capacity),
            spare: Vec::with_capacity(settings.pool_capacity),
            dead: Vec::new(),
            last_spawn_ms: None,
            pending_touch: None,
            rng,
            settings,
        }
    }

    pub fn radius_fluctuation(&self) -> f32 {
        self.settings.radius_fluctuation.get()
    }

    /// Set the radius fluctuation, clamped into `[0, 1]`.
    pub fn set_radius_fluctuation(&mut self, value: f32) {
        self.settings.radius_fluctuation = UnitInterval::new(value);
    }

    pub fn style(&self) -> RippleStyle {
        self.settings.style
    }

    pub fn set_style(&mut self, style: RippleStyle) {
        self.settings.style = style;
        self.curves = CurvePreset::for_style(style);
    }

    /// Queue a ripple at a pointer position; it spawns on the next tick.
    pub fn touch(&mut self, x: f32, y: f32) {
        self.pending_touch = Some((x, y));
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn pool(&self) -> &Pool<Trace> {
        &self.pool
    }

    /// Live particles in spawn order.
    pub fn traces(&self) -> impl Iterator<Item = &Trace> {
        self.live.iter().filter_map(|slot| self.pool.get(slot))
    }

    /// Normalized age of `trace` at `now_ms`. Never negative; exceeds `1.0`
    /// once the trace has outlived its lifetime.
    pub fn progress(&self, trace: &Trace, now_ms: u64) -> f32 {
        let age = now_ms.saturating_sub(trace.birth);
        age as f32 / self.settings.lifetime_ms.max(1) as f32
    }

    /// Add a particle at `(x, y)` born at `birth_ms`.
    pub fn spawn_at(&mut self, x: f32, y: f32, birth_ms: u64) {
        let f = self.settings.radius_fluctuation.get();
        let scale = self.rng.random_range(1.0 - f..=1.0 + f);

        let slot = self.pool.acquire();
        if let Some(trace) = self.pool.get_mut(&slot) {
            *trace = Trace {
                x,
                y,
                birth: birth_ms,
                scale,
            };
        }
        self.live.push(slot);
        log::trace!("spawned ripple at ({x:.1}, {y:.1})");
    }

    /// Retire expired particles, then spawn if the incubation interval has
    /// passed.
    pub fn update(&mut self, now_ms: u64, width: u32, height: u32) {
        self.retire_expired(now_ms);

        if let Some((x, y)) = self.pending_touch.take() {
            self.spawn_at(x, y, now_ms);
        }

        let due = self
            .last_spawn_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.settings.incubate_interval_ms);
        if due && width > 0 && height > 0 {
            let x = self.rng.random_range(0.0..width as f32);
            let y = self.rng.random_range(0.0..height as f32);
            self.spawn_at(x, y, now_ms);
            self.last_spawn_ms = Some(now_ms);
        }
    }

    fn retire_expired(&mut self, now_ms: u64) {
        let lifetime = self.settings.lifetime_ms.max(1);
        // Survivors keep spawn order; both buffers are reused across ticks.
        let mut kept = std::mem::take(&mut self.spare);
        for slot in self.live.drain(..) {
            let alive = self
                .pool
                .get(&slot)
                .is_some_and(|trace| now_ms.saturating_sub(trace.birth) <= lifetime);
            if alive {
                kept.push(slot);
            } else {
                self.dead.push(slot);
            }
        }
        self.spare = std::mem::replace(&mut self.live, kept);
        if self.dead.is_empty() {
            return;
        }

        log::trace!("retiring {} ripples", self.dead.len());
        for slot in self.dead.drain(..) {
            self.pool.release(slot);
        }
    }

    /// Draw the live particles as they look at `now_ms`.
    pub fn draw(&self, canvas: &mut dyn DrawSurface, now_ms: u64) {
        canvas.clear(self.settings.background_color);

        for trace in self.traces() {
            let progress = self.progress(trace, now_ms).min(1.0);
            let radius =
                self.settings.ripple_radius * trace.scale * self.curves.radius.eval(progress);
            if radius <= 0.0 || !radius.is_finite() {
                continue;
            }
            let color = self
                .settings
                .ripple_color
                .scale_alpha(self.curves.alpha.eval(progress));
            canvas.draw_circle(trace.x, trace.y, radius, self.paint(color));
        }
    }

    fn paint(&self, color: Argb) -> Paint {
        match self.settings.style {
            RippleStyle::Ripple => Paint::Stroke {
                color,
                width: self.settings.stroke_width,
            },
            RippleStyle::Drop => Paint::Fill(color),
        }
    }

    /// One frame: update the simulation and draw it.
    pub fn update_canvas(&mut self, canvas: &mut dyn DrawSurface, now_ms: u64) {
        self.update(now_ms, canvas.width(), canvas.height());
        self.draw(canvas, now_ms);
    }
}

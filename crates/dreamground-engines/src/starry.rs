//! Starry sky view: a random star field that re-flashes on a fixed interval.

use dreamground_core::{Argb, DrawSurface, Paint, StarrySettings, hsl_to_rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub color: Argb,
}

#[derive(Debug)]
pub struct StarrySky {
    settings: StarrySettings,
    stars: Vec<Star>,
    last_flash_ms: Option<u64>,
    last_size: (u32, u32),
    rng: StdRng,
}

impl StarrySky {
    pub fn new(settings: StarrySettings) -> Self {
        let settings = settings.sanitized();
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            settings,
            stars: Vec::new(),
            last_flash_ms: None,
            last_size: (0, 0),
            rng,
        }
    }

    /// Number of stars for a `width x height` canvas.
    pub fn star_count(&self, width: u32, height: u32) -> usize {
        (width as f32 * height as f32 * self.settings.density.get()).floor() as usize
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Resample the sky when the flash interval has passed or the canvas
    /// changed size.
    pub fn update(&mut self, now_ms: u64, width: u32, height: u32) {
        let resized = self.last_size != (width, height);
        let due = self
            .last_flash_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.settings.flash_interval_ms);
        if !(resized || due) {
            return;
        }
        self.last_size = (width, height);
        self.last_flash_ms = Some(now_ms);
        self.flash(width, height);
    }

    fn flash(&mut self, width: u32, height: u32) {
        self.stars.clear();
        if width == 0 || height == 0 {
            return;
        }
        let alpha = (self.settings.star_alpha.get() * 255.0).round() as u8;
        let count = self.star_count(width, height);
        for _ in 0..count {
            let hue = self.rng.random_range(0.0..360.0);
            let lightness = self.rng.random_range(0.5..=0.9);
            self.stars.push(Star {
                x: self.rng.random_range(0.0..width as f32),
                y: self.rng.random_range(0.0..height as f32),
                color: hsl_to_rgb(hue, 1.0, lightness).with_alpha(alpha),
            });
        }
    }

    pub fn draw(&self, canvas: &mut dyn DrawSurface) {
        canvas.clear(self.settings.background_color);
        for star in &self.stars {
            canvas.draw_circle(star.x, star.y, self.settings.star_size, Paint::Fill(star.color));
        }
    }

    pub fn update_canvas(&mut self, canvas: &mut dyn DrawSurface, now_ms: u64) {
        self.update(now_ms, canvas.width(), canvas.height());
        self.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSurface;
    use dreamground_core::UnitInterval;

    fn sky() -> StarrySky {
        StarrySky::new(StarrySettings {
            density: UnitInterval::new(0.01),
            star_alpha: UnitInterval::new(0.5),
            flash_interval_ms: 100,
            seed: Some(5),
            ..Default::default()
        })
    }

    #[test]
    fn test_star_count_follows_density() {
        let sky = sky();
        assert_eq!(sky.star_count(100, 50), 50);
        assert_eq!(sky.star_count(0, 50), 0);
    }

    #[test]
    fn test_stars_stay_on_canvas_with_alpha() {
        let mut sky = sky();
        sky.update(0, 100, 50);
        assert_eq!(sky.stars().len(), 50);
        for star in sky.stars() {
            assert!((0.0..100.0).contains(&star.x));
            assert!((0.0..50.0).contains(&star.y));
            assert_eq!(star.color.a(), 128);
        }
    }

    #[test]
    fn test_flashes_on_interval() {
        let mut sky = sky();
        sky.update(0, 100, 50);
        let first = sky.stars().to_vec();
        sky.update(50, 100, 50);
        assert_eq!(sky.stars(), first.as_slice());
        sky.update(100, 100, 50);
        assert_ne!(sky.stars(), first.as_slice());
    }

    #[test]
    fn test_resize_resamples_immediately() {
        let mut sky = sky();
        sky.update(0, 100, 50);
        sky.update(10, 200, 50);
        assert_eq!(sky.stars().len(), 100);
    }

    #[test]
    fn test_draws_one_circle_per_star() {
        let mut sky = sky();
        let mut canvas = RecordingSurface::new(40, 40);
        sky.update_canvas(&mut canvas, 0);
        assert_eq!(canvas.circles().len(), 16);
    }

    #[test]
    fn test_density_is_clamped() {
        let sky = StarrySky::new(StarrySettings {
            density: UnitInterval::new(4.0),
            ..Default::default()
        });
        assert_eq!(sky.star_count(10, 10), 100);
    }

    #[test]
    fn test_infinite_star_size_never_reaches_the_canvas() {
        let mut sky = StarrySky::new(StarrySettings {
            star_size: f32::INFINITY,
            seed: Some(2),
            ..Default::default()
        });
        let mut canvas = RecordingSurface::new(100, 100);
        sky.update_canvas(&mut canvas, 0);
        let circles = canvas.circles();
        assert!(!circles.is_empty());
        assert!(circles.iter().all(|&(_, _, radius, _)| radius == 1.0));
    }
}

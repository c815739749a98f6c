//! Double-buffered off-screen surface shared between the render thread and
//! the UI thread.

use std::sync::{Arc, Mutex, MutexGuard};

use dreamground_core::PixelCanvas;
use dreamground_engines::Surface;

#[derive(Debug, Default)]
struct FrameSlot {
    /// Size the next frame should have, in pixels. Set by the UI thread.
    viewport: (u32, u32),
    /// Last committed frame.
    front: Option<PixelCanvas>,
    /// Previously shown frame, recycled as the next back buffer.
    spare: Option<PixelCanvas>,
    posted: u64,
}

/// UI-side handle to the shared frame.
#[derive(Debug, Clone, Default)]
pub struct SharedFrame {
    slot: Arc<Mutex<FrameSlot>>,
}

impl SharedFrame {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, FrameSlot>> {
        match self.slot.lock() {
            Ok(guard) => Some(guard),
            Err(_) => {
                log::warn!("frame lock poisoned");
                None
            }
        }
    }

    /// Set the pixel size of the drawing area. Zero in either dimension
    /// makes the surface unavailable.
    pub fn set_viewport(&self, width: u32, height: u32) {
        if let Some(mut slot) = self.lock() {
            slot.viewport = (width, height);
        }
    }

    /// Run `f` on the last committed frame, if any.
    pub fn with_front<R>(&self, f: impl FnOnce(&PixelCanvas) -> R) -> Option<R> {
        let slot = self.lock()?;
        slot.front.as_ref().map(f)
    }

    /// Number of frames committed so far.
    #[cfg(test)]
    pub fn frames_posted(&self) -> u64 {
        self.lock().map(|slot| slot.posted).unwrap_or(0)
    }

    /// Producer handle for the render thread.
    pub fn surface(&self) -> FrameSurface {
        FrameSurface {
            shared: self.clone(),
        }
    }
}

/// Render-thread side of a [`SharedFrame`].
#[derive(Debug)]
pub struct FrameSurface {
    shared: SharedFrame,
}

impl Surface for FrameSurface {
    type Canvas = PixelCanvas;

    fn lock_canvas(&mut self) -> Option<PixelCanvas> {
        let mut slot = self.shared.lock()?;
        let (width, height) = slot.viewport;
        if width == 0 || height == 0 {
            return None;
        }
        let mut canvas = slot
            .spare
            .take()
            .unwrap_or_else(|| PixelCanvas::new(width, height));
        canvas.resize(width, height);
        Some(canvas)
    }

    fn unlock_canvas_and_post(&mut self, canvas: PixelCanvas) {
        let Some(mut slot) = self.shared.lock() else {
            return;
        };
        // A frame drawn for an outdated viewport is still shown once; the
        // next frame picks up the new size.
        slot.spare = slot.front.replace(canvas);
        slot.posted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamground_core::{Argb, DrawSurface};

    #[test]
    fn test_unavailable_until_viewport_is_set() {
        let shared = SharedFrame::new();
        let mut surface = shared.surface();
        assert!(surface.lock_canvas().is_none());

        shared.set_viewport(10, 0);
        assert!(surface.lock_canvas().is_none());

        shared.set_viewport(10, 4);
        let canvas = surface.lock_canvas().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (10, 4));
    }

    #[test]
    fn test_post_publishes_front_and_recycles() {
        let shared = SharedFrame::new();
        shared.set_viewport(3, 2);
        let mut surface = shared.surface();
        assert!(shared.with_front(|_| ()).is_none());

        let mut canvas = surface.lock_canvas().unwrap();
        canvas.clear(Argb::RED);
        surface.unlock_canvas_and_post(canvas);
        assert_eq!(shared.with_front(|c| c.pixel(2, 1)), Some(Some(Argb::RED)));

        let mut canvas = surface.lock_canvas().unwrap();
        canvas.clear(Argb::GREEN);
        surface.unlock_canvas_and_post(canvas);
        assert_eq!(shared.with_front(|c| c.pixel(0, 0)), Some(Some(Argb::GREEN)));
        assert_eq!(shared.frames_posted(), 2);
    }

    #[test]
    fn test_back_buffer_follows_viewport() {
        let shared = SharedFrame::new();
        shared.set_viewport(4, 4);
        let mut surface = shared.surface();
        let canvas = surface.lock_canvas().unwrap();
        surface.unlock_canvas_and_post(canvas);
        let canvas = surface.lock_canvas().unwrap();
        surface.unlock_canvas_and_post(canvas);

        shared.set_viewport(6, 2);
        let canvas = surface.lock_canvas().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (6, 2));
    }
}

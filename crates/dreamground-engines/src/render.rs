//! Fixed-interval render loop running on a dedicated thread.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use dreamground_core::DrawSurface;

/// Default pause between two frames (~50 Hz).
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(20);

/// The producer side of an off-screen surface.
pub trait Surface: Send + 'static {
    type Canvas: DrawSurface;

    /// Get a canvas to draw the next frame into, or `None` if the surface is
    /// not ready. May block briefly.
    fn lock_canvas(&mut self) -> Option<Self::Canvas>;

    /// Commit a finished frame.
    fn unlock_canvas_and_post(&mut self, canvas: Self::Canvas);
}

/// Something that advances its simulation and draws one frame per tick.
pub trait Scene: Send + 'static {
    /// Input forwarded from the UI thread.
    type Input: Send + 'static;

    /// Update the simulation to `elapsed_ms` and draw it.
    fn update_canvas(&mut self, canvas: &mut dyn DrawSurface, elapsed_ms: u64);

    fn on_input(&mut self, input: Self::Input);
}

enum Control<I> {
    Input(I),
    Stop,
}

/// Handle to a running render thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct RenderThread<I> {
    /// Flag checked at the top of every frame.
    running: Arc<RwLock<bool>>,
    control: Sender<Control<I>>,
    handle: Option<JoinHandle<()>>,
}

impl<I: Send + 'static> RenderThread<I> {
    /// Spawn the loop. `scene` moves onto the render thread and is only ever
    /// touched from there.
    pub fn start<S, E>(surface: S, scene: E, interval: Duration) -> io::Result<Self>
    where
        S: Surface,
        E: Scene<Input = I>,
    {
        let running = Arc::new(RwLock::new(true));
        let (control, rx) = mpsc::channel();

        let flag = running.clone();
        let handle = thread::Builder::new()
            .name("dreamground-render".to_string())
            .spawn(move || run(surface, scene, interval, &flag, &rx))?;

        log::info!("render thread started ({} ms interval)", interval.as_millis());
        Ok(Self {
            running,
            control,
            handle: Some(handle),
        })
    }

    /// Forward input to the scene. Returns `false` once the thread is gone.
    pub fn send_input(&self, input: I) -> bool {
        self.control.send(Control::Input(input)).is_ok()
    }

    pub fn is_running(&self) -> bool {
        self.running.read().map(|r| *r).unwrap_or(false)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the loop and wait for the thread to exit. An in-flight wait
    /// between frames is cut short.
    pub fn stop_rendering(&mut self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
        let _ = self.control.send(Control::Stop);

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("render thread panicked");
            } else {
                log::info!("render thread stopped");
            }
        }
    }
}

impl<I> Drop for RenderThread<I> {
    fn drop(&mut self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
        let _ = self.control.send(Control::Stop);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run<S, E>(
    mut surface: S,
    mut scene: E,
    interval: Duration,
    running: &RwLock<bool>,
    control: &Receiver<Control<E::Input>>,
) where
    S: Surface,
    E: Scene,
{
    let started = Instant::now();

    loop {
        if let Ok(is_running) = running.read()
            && !*is_running
        {
            break;
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        update_surface(&mut surface, &mut scene, elapsed_ms);

        // Sleep until the next frame, applying input as it arrives.
        let deadline = Instant::now() + interval;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match control.recv_timeout(deadline - now) {
                Ok(Control::Input(input)) => scene.on_input(input),
                Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => return,
                Err(RecvTimeoutError::Timeout) => break,
            }
        }
    }
}

/// Draw one frame. A surface that is not ready skips the frame.
fn update_surface<S: Surface, E: Scene>(surface: &mut S, scene: &mut E, elapsed_ms: u64) {
    let Some(mut canvas) = surface.lock_canvas() else {
        log::trace!("surface not ready, skipping frame at {elapsed_ms} ms");
        return;
    };
    scene.update_canvas(&mut canvas, elapsed_ms);
    surface.unlock_canvas_and_post(canvas);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use dreamground_core::{Argb, PixelCanvas};

    #[derive(Default)]
    struct Counters {
        locks: AtomicUsize,
        posts: AtomicUsize,
    }

    struct TestSurface {
        ready: bool,
        counters: Arc<Counters>,
    }

    impl Surface for TestSurface {
        type Canvas = PixelCanvas;

        fn lock_canvas(&mut self) -> Option<PixelCanvas> {
            self.counters.locks.fetch_add(1, Ordering::SeqCst);
            self.ready.then(|| PixelCanvas::new(4, 4))
        }

        fn unlock_canvas_and_post(&mut self, _canvas: PixelCanvas) {
            self.counters.posts.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct Log {
        ticks: Vec<u64>,
        inputs: Vec<u32>,
    }

    struct TestScene {
        log: Arc<Mutex<Log>>,
    }

    impl Scene for TestScene {
        type Input = u32;

        fn update_canvas(&mut self, canvas: &mut dyn DrawSurface, elapsed_ms: u64) {
            canvas.clear(Argb::BLACK);
            self.log.lock().unwrap().ticks.push(elapsed_ms);
        }

        fn on_input(&mut self, input: u32) {
            self.log.lock().unwrap().inputs.push(input);
        }
    }

    fn start(
        ready: bool,
        interval: Duration,
    ) -> (RenderThread<u32>, Arc<Counters>, Arc<Mutex<Log>>) {
        let counters = Arc::new(Counters::default());
        let log = Arc::new(Mutex::new(Log::default()));
        let surface = TestSurface {
            ready,
            counters: counters.clone(),
        };
        let scene = TestScene { log: log.clone() };
        let thread = RenderThread::start(surface, scene, interval).unwrap();
        (thread, counters, log)
    }

    #[test]
    fn test_frames_are_sequential() {
        let (mut thread, counters, log) = start(true, Duration::from_millis(5));
        thread::sleep(Duration::from_millis(80));
        thread.stop_rendering();

        let ticks = log.lock().unwrap().ticks.clone();
        assert!(ticks.len() >= 2, "only {} frames", ticks.len());
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(counters.posts.load(Ordering::SeqCst), ticks.len());
        assert!(!thread.is_running());
    }

    #[test]
    fn test_stop_interrupts_the_wait() {
        let (mut thread, _counters, log) = start(true, Duration::from_secs(30));
        thread::sleep(Duration::from_millis(50));

        let begun = Instant::now();
        thread.stop_rendering();
        assert!(begun.elapsed() < Duration::from_secs(5));
        assert_eq!(log.lock().unwrap().ticks.len(), 1);
    }

    #[test]
    fn test_unavailable_surface_skips_frames() {
        let (mut thread, counters, log) = start(false, Duration::from_millis(5));
        thread::sleep(Duration::from_millis(50));
        thread.stop_rendering();

        assert!(counters.locks.load(Ordering::SeqCst) >= 1);
        assert_eq!(counters.posts.load(Ordering::SeqCst), 0);
        assert!(log.lock().unwrap().ticks.is_empty());
    }

    #[test]
    fn test_input_reaches_the_scene() {
        let (mut thread, _counters, log) = start(true, Duration::from_millis(5));
        assert!(thread.send_input(7));
        assert!(thread.send_input(9));
        thread::sleep(Duration::from_millis(50));
        thread.stop_rendering();

        assert_eq!(log.lock().unwrap().inputs, vec![7, 9]);
        assert!(!thread.send_input(1));
    }

    #[test]
    fn test_drop_stops_the_thread() {
        let (thread, _counters, log) = start(true, Duration::from_secs(30));
        drop(thread);
        let frames = log.lock().unwrap().ticks.len();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(log.lock().unwrap().ticks.len(), frames);
    }
}

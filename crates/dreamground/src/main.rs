use std::io::{self, Write, stdout};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
};

use dreamground_config::Config;
use dreamground_core::{Argb, SceneKind};
use dreamground_engines::{ActiveScene, RenderThread, SceneInput};

mod frame_view;
mod logging;
mod overlay;
mod surface;

use frame_view::FrameView;
use overlay::{HostInput, HostedScene};
use surface::SharedFrame;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    if let Some(path) = &log_path {
        log::info!("logging to {}", path.display());
    }

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("{e}, using default configuration");
        Config::default()
    });

    let terminal = ratatui::init();
    enable_mouse_capture(&mut stdout(), ratatui::restore)?;
    let result = App::new(config).run(terminal);
    let _ = crossterm::execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// Turn on mouse reporting, running `restore` before handing back the error
/// if the terminal refuses.
fn enable_mouse_capture(out: &mut impl Write, restore: impl FnOnce()) -> io::Result<()> {
    crossterm::execute!(out, EnableMouseCapture).inspect_err(|_| restore())
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Scene currently on screen.
    scene: SceneKind,
    show_clock: bool,
    /// Frame exchanged with the render thread.
    shared: SharedFrame,
    /// Screen area the scene is drawn in.
    viewport: Rect,
    render: Option<RenderThread<HostInput>>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        Self {
            running: false,
            scene: config.scene,
            show_clock: config.show_clock,
            config,
            shared: SharedFrame::new(),
            viewport: Rect::default(),
            render: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.start_rendering()?;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.stop_rendering();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Scene
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        // Two pixel rows per terminal row.
        self.viewport = chunks[0];
        self.shared
            .set_viewport(chunks[0].width as u32, chunks[0].height as u32 * 2);
        self.shared.with_front(|canvas| {
            frame.render_widget(FrameView::new(canvas), chunks[0]);
        });

        let color = Color::Cyan;
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "s".bold().fg(color),
            format!(" scene ({})  ", self.scene.name()).dark_gray(),
            "r".bold().fg(color),
            " toggle style  ".dark_gray(),
            "c".bold().fg(color),
            " toggle clock".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(20))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key)?,
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('s')) => self.cycle_scene()?,
            (_, KeyCode::Char('r')) => self.send(HostInput::Scene(SceneInput::ToggleStyle)),
            (_, KeyCode::Char('c')) => self.toggle_clock(),
            _ => {}
        }
        Ok(())
    }

    /// Forwards left-button mouse events to the scene as pointer input.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let Some((x, y)) = self.to_pixel(mouse.column, mouse.row) else {
            return;
        };
        let input = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => SceneInput::PointerDown { x, y },
            MouseEventKind::Drag(MouseButton::Left) => SceneInput::PointerMoved { x, y },
            MouseEventKind::Up(MouseButton::Left) => SceneInput::PointerUp,
            _ => return,
        };
        self.send(HostInput::Scene(input));
    }

    /// Map a terminal cell to canvas pixel coordinates.
    fn to_pixel(&self, column: u16, row: u16) -> Option<(f32, f32)> {
        let area = self.viewport;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return None;
        }
        Some(((column - area.x) as f32, ((row - area.y) * 2) as f32))
    }

    fn send(&self, input: HostInput) {
        if let Some(render) = &self.render
            && !render.send_input(input)
        {
            log::warn!("render thread is gone, dropping {input:?}");
        }
    }

    /// Build the current scene and start drawing it.
    fn start_rendering(&mut self) -> color_eyre::Result<()> {
        let scene = ActiveScene::new(
            self.scene,
            &self.config.ripple,
            &self.config.wave,
            &self.config.starry,
        );
        let hosted = HostedScene::new(scene, self.show_clock, self.background());
        let render =
            RenderThread::start(self.shared.surface(), hosted, self.config.refresh_interval())?;
        self.render = Some(render);
        Ok(())
    }

    fn stop_rendering(&mut self) {
        if let Some(mut render) = self.render.take() {
            render.stop_rendering();
        }
    }

    /// Switch to the next scene, restarting the render thread.
    fn cycle_scene(&mut self) -> color_eyre::Result<()> {
        self.stop_rendering();
        self.scene = self.scene.next();
        log::info!("switching to {} scene", self.scene.name());
        self.start_rendering()
    }

    fn toggle_clock(&mut self) {
        self.show_clock = !self.show_clock;
        self.send(HostInput::ToggleClock);
    }

    /// Background color of the current scene.
    fn background(&self) -> Argb {
        match self.scene {
            SceneKind::Ripple => self.config.ripple.background_color,
            SceneKind::Wave => self.config.wave.background_color,
            SceneKind::StarrySky => self.config.starry.background_color,
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct BrokenTerminal;

    impl Write for BrokenTerminal {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_mouse_capture_restores_terminal() {
        let restored = Cell::new(false);
        let result = enable_mouse_capture(&mut BrokenTerminal, || restored.set(true));
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_mouse_capture_leaves_terminal_alone_on_success() {
        let restored = Cell::new(false);
        let mut out = Vec::new();
        enable_mouse_capture(&mut out, || restored.set(true)).unwrap();
        assert!(!out.is_empty());
        assert!(!restored.get());
    }

    #[test]
    fn test_pointer_maps_to_pixels() {
        let mut app = App::new(Config::default());
        app.viewport = Rect::new(2, 1, 10, 5);
        assert_eq!(app.to_pixel(4, 3), Some((2.0, 4.0)));
        assert_eq!(app.to_pixel(1, 3), None);
        assert_eq!(app.to_pixel(4, 6), None);
    }
}

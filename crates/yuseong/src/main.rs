mod pane;

use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use rand::thread_rng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    symbols::Marker,
    text::Line,
    widgets::canvas::Canvas,
};
use yuseong_config::Config;
use yuseong_core::AnimationSpeed;
use yuseong_cursor::PointerTracker;
use yuseong_effect::{MeteorShape, hsl_to_rgb};

use crate::pane::MeteorPane;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?.sanitize();
    let terminal = ratatui::init();
    let _ = execute!(stdout(), EnableMouseCapture);
    let result = App::new(config).run(terminal);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded settings, already sanitized.
    config: Config,
    /// Frame clock multiplier, cycled with `s`.
    speed: AnimationSpeed,
    /// One meteor pane per lane.
    panes: Vec<MeteorPane>,
    /// Pointer state fed by terminal mouse events.
    pointer: PointerTracker,
    /// Whether the pointer glyph is drawn.
    show_pointer: bool,
    /// Instant of the previous frame tick.
    last_tick: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let speed = AnimationSpeed::from_name(&config.speed).unwrap_or_default();
        let panes = build_panes(&config);
        let show_pointer = config.cursor.enabled;
        Self {
            running: false,
            config,
            speed,
            panes,
            pointer: PointerTracker::new(),
            show_pointer,
            last_tick: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.last_tick = Instant::now();
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.tick();
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Advance every pane by the elapsed wall time, scaled by the speed.
    fn tick(&mut self) {
        let dt = self.last_tick.elapsed().as_secs_f32() * self.speed.multiplier();
        self.last_tick = Instant::now();
        for pane in &mut self.panes {
            pane.update(dt);
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let chunks =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());
        let lanes =
            Layout::horizontal(vec![Constraint::Fill(1); self.panes.len()]).split(chunks[0]);

        for (pane, lane) in self.panes.iter_mut().zip(lanes.iter()) {
            let rect = pane.rect(*lane);
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            pane.effect.resize(rect.width, rect.height);
            let (w, h) = pane.effect.surface_size();
            let effect = &pane.effect;
            let canvas = Canvas::default()
                .marker(Marker::Braille)
                .x_bounds([0.0, f64::from(w)])
                .y_bounds([0.0, f64::from(h)])
                .paint(|ctx| ctx.draw(&MeteorShape::new(effect)));
            frame.render_widget(canvas, rect);
        }

        self.render_pointer(frame);
        self.render_status(frame, chunks[1]);
    }

    /// Draws the pointer glyph over the finished frame.
    fn render_pointer(&mut self, frame: &mut Frame) {
        if !self.show_pointer || self.config.cursor.glyph.is_empty() {
            return;
        }
        let Some(position) = self.pointer.position() else {
            return;
        };
        if let Some(cell) = frame.buffer_mut().cell_mut((position.x, position.y)) {
            cell.set_symbol(&self.config.cursor.glyph);
            cell.set_fg(accent());
        }
    }

    /// Renders the key hints, the pointer readout and the impact marker.
    fn render_status(&mut self, frame: &mut Frame, area: Rect) {
        let accent = accent();
        let mut spans = vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "r".bold().fg(accent),
            " relaunch  ".dark_gray(),
            "s".bold().fg(accent),
            format!(" speed: {}  ", self.speed.label()).dark_gray(),
            "c".bold().fg(accent),
            " cursor".dark_gray(),
        ];
        if let Some(position) = self.pointer.position() {
            spans.push(format!("  {},{}", position.x, position.y).fg(accent));
        }
        if self.panes.iter().any(|pane| pane.effect.collided()) {
            spans.push("  impact".bold().fg(accent));
        }
        frame.render_widget(Line::from(spans).centered(), area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls briefly so the animation clock keeps a steady beat.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(16))? {
            loop {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                    Event::Mouse(mouse) => self.on_mouse_event(mouse),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
                // Drain the queue so a burst of pointer events cannot
                // stall the frame clock
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => self.relaunch(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('c')) => self.toggle_pointer(),
            _ => {}
        }
    }

    /// Feeds pointer movement into the tracker.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer.update(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    /// Relaunch every meteor with freshly rolled options and flights.
    fn relaunch(&mut self) {
        self.panes = build_panes(&self.config);
    }

    /// Cycle the animation speed.
    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
    }

    /// Toggle the pointer glyph overlay.
    fn toggle_pointer(&mut self) {
        self.show_pointer = !self.show_pointer;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// One pane per configured lane, each with its own rolls.
fn build_panes(config: &Config) -> Vec<MeteorPane> {
    let mut rng = thread_rng();
    (0..config.meteor.count)
        .map(|_| MeteorPane::new(&config.meteor, &mut rng))
        .collect()
}

/// Accent color for keys and the pointer glyph, from the meteor palette.
fn accent() -> Color {
    let (r, g, b) = hsl_to_rgb(30.0, 1.0, 0.7);
    Color::Rgb(r, g, b)
}

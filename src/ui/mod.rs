//! Terminal presentation: layout, event loop and shared app state.

mod calculator;
mod chat;
mod circle;
mod controls;
mod info;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tracing::warn;

use crate::angle::{self, snap::snap, Angle};
use crate::animation::AnimationDriver;
use crate::calculator::{self as calc, AngleUnit, CalcResult};
use crate::config::{Config, Settings};
use crate::expr;
use crate::theme::Theme;
use crate::tutor::{ChatMessage, ChatRole, TurnRequest, TutorEvent, TutorHandle, GREETING, UNAVAILABLE};
use circle::CircleGeometry;

/// Which element keyboard input goes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Circle,
    Degrees,
    Radians,
    Calculator,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Circle => Focus::Degrees,
            Focus::Degrees => Focus::Radians,
            Focus::Radians => Focus::Calculator,
            Focus::Calculator => Focus::Circle,
        }
    }
}

/// A one-line text field being edited.
#[derive(Debug, Default)]
pub struct InputField {
    pub buffer: String,
}

impl InputField {
    fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    fn backspace(&mut self) {
        self.buffer.pop();
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

pub struct App {
    pub angle: Angle,
    pub settings: Settings,
    pub theme: Theme,
    pub config: Config,
    pub driver: AnimationDriver,
    pub focus: Focus,
    pub degree_field: InputField,
    pub radian_field: InputField,
    pub calc_field: InputField,
    pub calc_unit: AngleUnit,
    pub calc_result: Option<CalcResult>,
    pub chat_open: bool,
    pub chat_log: Vec<ChatMessage>,
    pub chat_field: InputField,
    pub chat_pending: bool,
    pub tutor: TutorHandle,
    pub dragging: bool,
    pub status: Option<String>,
    circle_geometry: Option<CircleGeometry>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, tutor: TutorHandle) -> Self {
        let settings = config.initial_settings();
        let mut driver = AnimationDriver::new();
        driver.set_running(settings.animate);

        let mut chat_log = vec![ChatMessage::assistant(GREETING)];
        if !tutor.is_enabled() {
            chat_log.push(ChatMessage::assistant(UNAVAILABLE));
        }

        Self {
            angle: Angle::from_degrees(config.display.initial_angle_deg),
            settings,
            theme: config.display.theme,
            config,
            driver,
            focus: Focus::Circle,
            degree_field: InputField::default(),
            radian_field: InputField::default(),
            calc_field: InputField::default(),
            calc_unit: AngleUnit::Degrees,
            calc_result: None,
            chat_open: false,
            chat_log,
            chat_field: InputField::default(),
            chat_pending: false,
            tutor,
            dragging: false,
            status: None,
            circle_geometry: None,
            should_quit: false,
        }
    }

    /// Replace the shared angle, optionally snapping to the key-angle grid.
    fn set_angle(&mut self, radians: f64, apply_snap: bool) {
        let radians = if apply_snap && self.settings.snap {
            snap(radians, self.config.snap_threshold_radians())
        } else {
            radians
        };
        self.angle = Angle::from_radians(radians);
    }

    fn toggle_animation(&mut self) {
        self.settings.animate = !self.settings.animate;
        self.driver.set_running(self.settings.animate);
    }

    /// Apply a calculator result: the computed angle becomes the shared
    /// angle and any running animation stops so the result stays visible.
    fn apply_calc_result(&mut self, result: CalcResult) {
        self.calc_result = Some(result);
        self.settings.animate = false;
        self.driver.stop();
        self.set_angle(result.radians, false);
    }

    fn commit_degree_field(&mut self) {
        let raw = self.degree_field.take();
        if let Ok(degrees) = raw.trim().parse::<f64>() {
            if degrees.is_finite() {
                self.set_angle(degrees.to_radians(), false);
            }
        }
        // Invalid input keeps the previous angle, with no visible error.
        self.focus = Focus::Circle;
    }

    fn commit_radian_field(&mut self) {
        let raw = self.radian_field.take();
        if let Ok(radians) = expr::evaluate(&raw) {
            self.set_angle(radians, false);
        }
        self.focus = Focus::Circle;
    }

    fn commit_calc_field(&mut self) {
        if let Some(result) = calc::evaluate(&self.calc_field.buffer, self.calc_unit) {
            self.apply_calc_result(result);
        }
    }

    fn send_chat_message(&mut self) {
        if self.chat_pending || self.chat_field.buffer.trim().is_empty() {
            return;
        }
        if !self.tutor.is_enabled() {
            return;
        }
        let message = self.chat_field.take();
        // The API requires the conversation to open with a user turn, so
        // the greeting (and a possible unavailable notice) is not history.
        let history: Vec<ChatMessage> = self
            .chat_log
            .iter()
            .skip_while(|msg| msg.role == ChatRole::Assistant)
            .cloned()
            .collect();
        self.chat_log.push(ChatMessage::user(message.clone()));
        if self.tutor.send(TurnRequest { history, message }) {
            self.chat_pending = true;
        } else {
            self.chat_log.push(ChatMessage::assistant(UNAVAILABLE));
        }
    }

    fn poll_tutor(&mut self) {
        if let Some(event) = self.tutor.poll() {
            self.chat_pending = false;
            let text = match event {
                TutorEvent::Reply(text) => text,
                TutorEvent::Failed(text) => text,
            };
            self.chat_log.push(ChatMessage::assistant(text));
        }
    }

    fn save_settings(&mut self) {
        match self.config.save_settings(&self.settings, self.theme) {
            Ok(path) => {
                self.status = Some(format!("settings saved to {}", path.display()));
            }
            Err(e) => {
                warn!("Failed to save settings: {}", e);
                self.status = Some("could not save settings".to_string());
            }
        }
    }
}

pub async fn run(config: Config, tutor: TutorHandle) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config, tutor).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
    tutor: TutorHandle,
) -> Result<()> {
    let mut app = App::new(config, tutor);
    let started = Instant::now();
    let frame_budget = Duration::from_secs_f64(1.0 / 60.0);

    loop {
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;

        // Advance the animation; the driver ignores ticks while stopped.
        let advanced = app.driver.tick(now_ms, app.angle.radians, app.settings.speed);
        if advanced != app.angle.radians {
            app.angle = Angle::from_radians(advanced);
        }

        app.poll_tutor();

        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(frame_budget)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let background =
        ratatui::widgets::Block::default().style(Style::default().bg(app.theme.background()));
    frame.render_widget(background, area);

    let body_and_status = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(body_and_status[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(6)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(8)])
        .split(columns[1]);

    app.circle_geometry = Some(circle::render(frame, left[0], app));
    calculator::render(frame, left[1], app);
    controls::render(frame, right[0], app);
    info::render(frame, right[1], app);
    render_status(frame, body_and_status[1], app);

    if app.chat_open {
        chat::render(frame, area, app);
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let status = match &app.status {
        Some(message) => format!(" {} ", message),
        None => {
            let play = if app.settings.animate { "pause" } else { "play" };
            format!(
                " [space]{} [s]nap:{} [r]ef [y]sym [t]heme:{} [c]hat [w]rite-config [tab]focus [q]uit ",
                play,
                if app.settings.snap { "on" } else { "off" },
                app.theme.name(),
            )
        }
    };

    for (i, ch) in status.chars().enumerate() {
        if i < area.width as usize {
            let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
            if let Some(cell) = cell {
                cell.set_char(ch);
                cell.set_fg(app.theme.muted());
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // One-shot status messages clear on the next key.
    app.status = None;

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.chat_open {
        handle_chat_key(app, key);
        return;
    }

    match app.focus {
        Focus::Circle => handle_global_key(app, key),
        Focus::Degrees => handle_field_key(app, key, FieldKind::Degrees),
        Focus::Radians => handle_field_key(app, key, FieldKind::Radians),
        Focus::Calculator => handle_field_key(app, key, FieldKind::Calculator),
    }
}

fn handle_global_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char(' ') => app.toggle_animation(),
        KeyCode::Char('s') => app.settings.snap = !app.settings.snap,
        KeyCode::Char('r') => app.settings.show_reference = !app.settings.show_reference,
        KeyCode::Char('y') => app.settings.show_symmetry = !app.settings.show_symmetry,
        KeyCode::Char('t') => app.theme = app.theme.next(),
        KeyCode::Char('c') => app.chat_open = true,
        KeyCode::Char('w') => app.save_settings(),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            app.settings.speed = (app.settings.speed + 0.1).min(5.0);
        }
        KeyCode::Char('-') | KeyCode::Down => {
            app.settings.speed = (app.settings.speed - 0.1).max(0.1);
        }
        KeyCode::Left => {
            let radians = app.angle.radians - 1.0_f64.to_radians();
            app.set_angle(radians, false);
        }
        KeyCode::Right => {
            let radians = app.angle.radians + 1.0_f64.to_radians();
            app.set_angle(radians, false);
        }
        KeyCode::Tab => app.focus = app.focus.next(),
        _ => {}
    }
}

#[derive(Clone, Copy)]
enum FieldKind {
    Degrees,
    Radians,
    Calculator,
}

fn handle_field_key(app: &mut App, key: KeyEvent, kind: FieldKind) {
    match key.code {
        KeyCode::Esc => {
            match kind {
                FieldKind::Degrees => app.degree_field.take(),
                FieldKind::Radians => app.radian_field.take(),
                FieldKind::Calculator => app.calc_field.take(),
            };
            app.focus = Focus::Circle;
        }
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::Enter => match kind {
            FieldKind::Degrees => app.commit_degree_field(),
            FieldKind::Radians => app.commit_radian_field(),
            FieldKind::Calculator => app.commit_calc_field(),
        },
        KeyCode::Backspace => match kind {
            FieldKind::Degrees => app.degree_field.backspace(),
            FieldKind::Radians => app.radian_field.backspace(),
            FieldKind::Calculator => app.calc_field.backspace(),
        },
        KeyCode::Char('u') if matches!(kind, FieldKind::Calculator) => {
            app.calc_unit = app.calc_unit.toggle();
        }
        KeyCode::Char(c) => {
            let field = match kind {
                FieldKind::Degrees => &mut app.degree_field,
                FieldKind::Radians => &mut app.radian_field,
                FieldKind::Calculator => &mut app.calc_field,
            };
            field.push(c);
        }
        _ => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.chat_open = false,
        KeyCode::Enter => app.send_chat_message(),
        KeyCode::Backspace => app.chat_field.backspace(),
        KeyCode::Char(c) => app.chat_field.push(c),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.chat_open {
        return;
    }
    let Some(geometry) = app.circle_geometry else {
        return;
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if geometry.contains(mouse.column, mouse.row) {
                app.dragging = true;
                drag_to(app, geometry, mouse.column, mouse.row);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.dragging {
                drag_to(app, geometry, mouse.column, mouse.row);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.dragging = false;
        }
        _ => {}
    }
}

fn drag_to(app: &mut App, geometry: CircleGeometry, column: u16, row: u16) {
    let (x, y) = geometry.point_at(column, row);
    // The exact center has no angle; keep the previous one.
    if let Some(radians) = angle::angle_from_point(x, y) {
        app.set_angle(radians, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn test_app() -> App {
        App::new(Config::default(), tutor::TutorHandle::disabled())
    }

    #[test]
    fn starts_at_the_configured_angle() {
        let app = test_app();
        assert_relative_eq!(app.angle.radians, FRAC_PI_4, epsilon = 1e-12);
        assert!(!app.settings.animate);
    }

    #[test]
    fn degree_field_commit_sets_the_angle() {
        let mut app = test_app();
        app.focus = Focus::Degrees;
        app.degree_field.buffer = "90".to_string();
        app.commit_degree_field();
        assert_relative_eq!(app.angle.radians, FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(app.focus, Focus::Circle);
    }

    #[test]
    fn invalid_degree_input_keeps_the_previous_angle() {
        let mut app = test_app();
        let before = app.angle;
        app.degree_field.buffer = "ninety".to_string();
        app.commit_degree_field();
        assert_eq!(app.angle, before);
    }

    #[test]
    fn radian_field_accepts_pi_expressions() {
        let mut app = test_app();
        app.radian_field.buffer = "pi/2".to_string();
        app.commit_radian_field();
        assert_relative_eq!(app.angle.radians, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn radian_field_parse_failure_is_silent() {
        let mut app = test_app();
        let before = app.angle;
        app.radian_field.buffer = "pi)".to_string();
        app.commit_radian_field();
        assert_eq!(app.angle, before);
    }

    #[test]
    fn calculator_result_stops_the_animation() {
        let mut app = test_app();
        app.toggle_animation();
        assert!(app.settings.animate);
        app.calc_field.buffer = "90".to_string();
        app.commit_calc_field();
        assert!(!app.settings.animate);
        assert_relative_eq!(app.angle.radians, FRAC_PI_2, epsilon = 1e-12);
        assert!(app.calc_result.is_some());
    }

    #[test]
    fn dragging_snaps_when_enabled() {
        let mut app = test_app();
        // 44° is within the default 5° window of the 45° grid entry.
        app.set_angle(44.0_f64.to_radians(), true);
        assert_relative_eq!(app.angle.radians, FRAC_PI_4, epsilon = 1e-12);

        app.settings.snap = false;
        app.set_angle(44.0_f64.to_radians(), true);
        assert_relative_eq!(app.angle.radians, 44.0_f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn negative_degree_input_wraps() {
        let mut app = test_app();
        app.degree_field.buffer = "-90".to_string();
        app.commit_degree_field();
        assert_relative_eq!(app.angle.degrees, 270.0, epsilon = 1e-9);
    }

    #[test]
    fn chat_send_without_credential_is_disabled() {
        let mut app = test_app();
        let log_len = app.chat_log.len();
        app.chat_field.buffer = "what is cosine?".to_string();
        app.send_chat_message();
        assert!(!app.chat_pending);
        assert_eq!(app.chat_log.len(), log_len);
    }
}

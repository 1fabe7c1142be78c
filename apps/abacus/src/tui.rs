//! The terminal front-end.
//!
//! Raw mode plus alternate screen, drawn at a fixed tick: each pass drains
//! settled evaluation outcomes, polls for one key event, and redraws.
//! Evaluations run as spawned tasks with a clone of the client; outcomes
//! come back over a channel, so the loop never blocks on the network.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use abacus_api::dto::HealthResponse;
use abacus_core::buttons::{self, ButtonConfig, ButtonVariant, GRID_COLUMNS};
use abacus_core::{AngleUnit, Key, Mode};
use abacus_history::KvStore;

use crate::keymap::{map_key, Action};
use crate::session::Session;
use crate::{Context as _, Result};

/// Poll interval of the event loop.
const TICK_RATE: Duration = Duration::from_millis(50);

/// How long a pressed button stays highlighted.
const PRESS_HIGHLIGHT: Duration = Duration::from_millis(150);

/// Messages from spawned service calls back into the loop.
enum ServiceReply {
    Evaluation {
        ticket: abacus_core::EvalTicket,
        outcome: abacus_api::Result<f64>,
    },
    Health(abacus_api::Result<HealthResponse>),
}

/// Last known state of the evaluation service, shown in the status bar.
enum ServiceHealth {
    Probing,
    Reachable(String),
    Unreachable,
}

/// Run the calculator UI until the user quits.
///
/// The terminal is restored before any error propagates; persisted history
/// is already saved on every mutation, so a failure here loses nothing.
pub async fn run<S: KvStore>(session: Session<S>) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(session);
    app.spawn_health_probe();
    let result = app.run_loop(&mut terminal).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    terminal
        .backend_mut()
        .execute(LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    result
}

/// Presentation state on top of the session: drawer, highlight, health.
struct App<S> {
    session: Session<S>,
    drawer_open: bool,
    drawer_state: ListState,
    pressed: Option<(Key, Instant)>,
    health: ServiceHealth,
    replies_tx: mpsc::UnboundedSender<ServiceReply>,
    replies_rx: mpsc::UnboundedReceiver<ServiceReply>,
    should_quit: bool,
}

impl<S: KvStore> App<S> {
    fn new(session: Session<S>) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        Self {
            session,
            drawer_open: false,
            drawer_state: ListState::default(),
            pressed: None,
            health: ServiceHealth::Probing,
            replies_tx,
            replies_rx,
            should_quit: false,
        }
    }

    /// One-shot startup probe; failure only colors the status bar.
    fn spawn_health_probe(&self) {
        let client = self.session.client().clone();
        let tx = self.replies_tx.clone();
        tokio::spawn(async move {
            let result = client.check_health().await;
            let _ = tx.send(ServiceReply::Health(result));
        });
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            self.drain_replies();
            self.expire_highlight();

            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(TICK_RATE).context("Failed to poll events")? {
                if let Event::Key(key) = event::read().context("Failed to read event")? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(&key);
                    }
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    // === Service replies ===

    fn drain_replies(&mut self) {
        while let Ok(reply) = self.replies_rx.try_recv() {
            match reply {
                ServiceReply::Evaluation { ticket, outcome } => {
                    self.session.settle(ticket, outcome);
                }
                ServiceReply::Health(Ok(health)) => {
                    debug!(version = %health.version, "evaluation service healthy");
                    self.health = ServiceHealth::Reachable(health.version);
                }
                ServiceReply::Health(Err(err)) => {
                    warn!(%err, "health probe failed");
                    self.health = ServiceHealth::Unreachable;
                }
            }
        }
    }

    // === Input ===

    fn handle_key(&mut self, event: &KeyEvent) {
        // Ctrl-C quits from anywhere, drawer included.
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.drawer_open {
            self.handle_drawer_key(event);
            return;
        }
        let Some(action) = map_key(event, self.session.calculator().mode()) else {
            return;
        };
        match action {
            Action::Press(key) => self.press(key),
            Action::ToggleMode => self.session.calculator_mut().toggle_mode(),
            Action::ToggleUnit => self.session.calculator_mut().toggle_angle_unit(),
            Action::ToggleHistory => self.open_drawer(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn press(&mut self, key: Key) {
        self.pressed = Some((key, Instant::now()));
        if let Some(dispatch) = self.session.press(key) {
            let client = self.session.client().clone();
            let tx = self.replies_tx.clone();
            tokio::spawn(async move {
                let outcome = client.evaluate(&dispatch.request).await;
                // A closed receiver means the loop already exited.
                let _ = tx.send(ServiceReply::Evaluation {
                    ticket: dispatch.ticket,
                    outcome,
                });
            });
        }
    }

    fn handle_drawer_key(&mut self, event: &KeyEvent) {
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => self.drawer_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.drawer_next(),
            KeyCode::Enter => self.recall_selected(),
            KeyCode::Backspace | KeyCode::Delete => {
                self.session.clear_history();
                self.drawer_state.select(None);
            }
            KeyCode::Esc | KeyCode::Char('h') => self.drawer_open = false,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn open_drawer(&mut self) {
        self.drawer_open = true;
        let selected = if self.session.history().is_empty() {
            None
        } else {
            Some(0)
        };
        self.drawer_state.select(selected);
    }

    fn drawer_next(&mut self) {
        let len = self.session.history().len();
        if len == 0 {
            return;
        }
        let next = match self.drawer_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.drawer_state.select(Some(next));
    }

    fn drawer_previous(&mut self) {
        if self.session.history().is_empty() {
            return;
        }
        let previous = self.drawer_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.drawer_state.select(Some(previous));
    }

    fn recall_selected(&mut self) {
        let Some(displayed) = self.drawer_state.selected() else {
            return;
        };
        let len = self.session.history().len();
        if displayed >= len {
            return;
        }
        // The drawer lists newest first; history stores oldest first.
        self.session.recall(len - 1 - displayed);
        self.drawer_open = false;
    }

    fn expire_highlight(&mut self) {
        if let Some((_, at)) = self.pressed {
            if at.elapsed() >= PRESS_HIGHLIGHT {
                self.pressed = None;
            }
        }
    }

    fn is_highlighted(&self, key: Key) -> bool {
        self.pressed
            .is_some_and(|(pressed, at)| pressed == key && at.elapsed() < PRESS_HIGHLIGHT)
    }

    // === Rendering ===

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let (main, drawer) = if self.drawer_open {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(32), Constraint::Length(36)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(main);

        self.draw_display(frame, rows[0]);
        self.draw_keypad(frame, rows[1]);
        self.draw_status(frame, rows[2]);

        if let Some(drawer_area) = drawer {
            self.draw_drawer(frame, drawer_area);
        }
    }

    fn draw_display(&self, frame: &mut Frame, area: Rect) {
        let calc = self.session.calculator();

        // The error message takes the expression line while set.
        let context_line = if let Some(error) = calc.error() {
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::from(Span::styled(
                calc.expression().to_string(),
                Style::default().fg(Color::DarkGray),
            ))
        }
        .alignment(Alignment::Right);

        let value_line = Line::from(Span::styled(
            calc.current_value().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right);

        let loading_line = if calc.is_loading() {
            Line::from(Span::styled(
                "evaluating...",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::default()
        };

        let display = Paragraph::new(vec![context_line, value_line, loading_line])
            .block(Block::default().borders(Borders::ALL).title(" abacus "));
        frame.render_widget(display, area);
    }

    fn draw_keypad(&self, frame: &mut Frame, area: Rect) {
        let layout = buttons::layout(self.session.calculator().mode());
        let rows = keypad_rows(layout);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, rows.len() as u32); rows.len()])
            .split(area);

        for (row, row_area) in rows.iter().zip(row_areas.iter()) {
            let constraints: Vec<Constraint> = row
                .iter()
                .map(|b| Constraint::Ratio(if b.wide { 2 } else { 1 }, GRID_COLUMNS as u32))
                .collect();
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(constraints)
                .split(*row_area);
            for (button, cell) in row.iter().zip(cells.iter()) {
                self.draw_button(frame, *cell, button);
            }
        }
    }

    fn draw_button(&self, frame: &mut Frame, area: Rect, button: &ButtonConfig) {
        let mut style = match button.variant {
            ButtonVariant::Primary => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ButtonVariant::Secondary => Style::default().fg(Color::Cyan),
            ButtonVariant::Default => Style::default(),
        };
        if self.is_highlighted(button.key) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let cell = Paragraph::new(button.label)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(cell, area);
    }

    fn draw_drawer(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .session
            .history()
            .entries()
            .iter()
            .rev()
            .map(|entry| ListItem::new(entry.clone()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" History "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut self.drawer_state);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let calc = self.session.calculator();
        let mode = match calc.mode() {
            Mode::Basic => "BASIC",
            Mode::Scientific => "SCI",
        };
        let unit = match calc.angle_unit() {
            AngleUnit::Degrees => "DEG",
            AngleUnit::Radians => "RAD",
        };
        let health = match &self.health {
            ServiceHealth::Probing => "service: probing".to_string(),
            ServiceHealth::Reachable(version) => format!("service: ok v{version}"),
            ServiceHealth::Unreachable => "service: unreachable".to_string(),
        };
        let hints = if self.drawer_open {
            "[up/down] select  [Enter] recall  [Del] clear  [Esc] close"
        } else {
            "[m]ode  [u]nit  [h]istory  [q]uit"
        };

        let style = if matches!(self.health, ServiceHealth::Unreachable) {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        let status = Paragraph::new(format!(" {mode} | {unit} | {health} | {hints}"))
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, area);
    }
}

/// Split a keypad slice into rows of [`GRID_COLUMNS`] width units; a wide
/// button counts for two.
fn keypad_rows(layout: &[ButtonConfig]) -> Vec<&[ButtonConfig]> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut units = 0;
    for (i, button) in layout.iter().enumerate() {
        units += if button.wide { 2 } else { 1 };
        if units >= GRID_COLUMNS {
            rows.push(&layout[start..=i]);
            start = i + 1;
            units = 0;
        }
    }
    rows
}

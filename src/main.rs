use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};

use cricsage_terminal::catalog;
use cricsage_terminal::config::PredictorConfig;
use cricsage_terminal::predictor;
use cricsage_terminal::state::{
    AppState, Delta, FormField, Phase, PredictionResult, ProviderCommand, apply_delta, meter_ratio,
};

const TITLE: &str = "CricSage: Cricket Predictor";

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => self.state.focus_prev(),
            KeyCode::Right | KeyCode::Char('l') => self.state.cycle_focused(1),
            KeyCode::Left | KeyCode::Char('h') => self.state.cycle_focused(-1),
            KeyCode::Enter | KeyCode::Char('p') => self.submit(),
            _ => {}
        }
    }

    fn submit(&mut self) {
        let Some(cmd) = self.state.begin_submit() else {
            return;
        };
        let seq = match &cmd {
            ProviderCommand::Predict { seq, .. } => *seq,
        };
        let sent = self
            .cmd_tx
            .as_ref()
            .is_some_and(|tx| tx.send(cmd).is_ok());
        if !sent {
            apply_delta(
                &mut self.state,
                Delta::PredictionSettled {
                    seq,
                    outcome: Err("Prediction service unavailable".to_string()),
                },
            );
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = PredictorConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    predictor::spawn_provider(tx, cmd_rx, config);

    let mut app = App::new(Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(48), Constraint::Min(30)])
        .split(chunks[1]);
    render_form(frame, body[0], &app.state);
    render_outcome(frame, body[1], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(
        "Tab/j/k Move | ←/→ h/l Choose | Enter/p Predict | ? Help | q Quit",
    )
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let status = match state.phase {
        Phase::Idle => "READY",
        Phase::Loading { .. } => "PREDICTING",
        Phase::Success => "OK",
        Phase::Failure => "ERROR",
    };
    let line1 = format!("   o   {TITLE} | {status}");
    let line2 = "  /|".to_string();
    let line3 = " //|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Match Setup").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    for (idx, field) in FormField::ALL.into_iter().enumerate() {
        let focused = state.focus == field;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        if field == FormField::Submit {
            let label_style = if state.can_submit() {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let button = Paragraph::new(state.submit_label())
                .alignment(Alignment::Center)
                .style(label_style)
                .block(Block::default().borders(Borders::ALL).border_style(border_style));
            frame.render_widget(button, rows[idx]);
            continue;
        }

        let text_style = if state.is_loading() || state.selected_value(field).is_none() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let arrows = if focused && !state.is_loading() {
            format!("< {} >", state.field_label(field))
        } else {
            state.field_label(field).to_string()
        };
        let selector = Paragraph::new(arrows).style(text_style).block(
            Block::default()
                .title(field_title(field))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(selector, rows[idx]);
    }
}

fn field_title(field: FormField) -> &'static str {
    match field {
        FormField::Team1 => "Team 1",
        FormField::Team2 => "Team 2",
        FormField::Venue => "Venue",
        FormField::Submit => "",
    }
}

fn render_outcome(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(message) = state.error_text() {
        let error = Paragraph::new(format!("Error:\n{message}"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Prediction").borders(Borders::ALL));
        frame.render_widget(error, area);
        return;
    }

    let Some(prediction) = state.visible_prediction() else {
        let hint = if state.is_loading() {
            "Predicting..."
        } else {
            "Pick two teams and a venue, then press Enter to predict."
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Prediction").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    render_prediction(frame, area, prediction);
}

fn render_prediction(frame: &mut Frame, area: Rect, prediction: &PredictionResult) {
    let title = format!(
        "{} vs {} @ {}",
        prediction.team1, prediction.team2, prediction.predicted_at
    );
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    let venue = Paragraph::new(format!("Venue: {}", prediction.venue));
    frame.render_widget(venue, rows[0]);

    let heading_style = Style::default().add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new("Win Probability:").style(heading_style),
        rows[1],
    );
    render_probability_bar(frame, rows[2], prediction, &prediction.team1, Color::Green);
    render_probability_bar(frame, rows[3], prediction, &prediction.team2, Color::Red);

    frame.render_widget(
        Paragraph::new("Predicted Score Range:").style(heading_style),
        rows[4],
    );
    frame.render_widget(Paragraph::new(prediction.predicted_score.as_str()), rows[5]);

    render_key_players(frame, rows[6], prediction);
}

fn render_probability_bar(
    frame: &mut Frame,
    area: Rect,
    prediction: &PredictionResult,
    team: &str,
    color: Color,
) {
    let row = Rect {
        height: area.height.min(1),
        ..area
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(10)])
        .split(row);
    let probability = prediction.win_probability_for(team).unwrap_or("--");
    frame.render_widget(
        Paragraph::new(format!("{}: ", catalog::team_label(team))),
        cols[0],
    );
    frame.render_widget(meter(probability, color), cols[1]);
}

fn render_key_players(frame: &mut Frame, area: Rect, prediction: &PredictionResult) {
    let Some(players) = prediction.key_players.as_ref() else {
        return;
    };
    if area.height < 2 {
        return;
    }

    const CARD_HEIGHT: u16 = 3;
    const COLUMNS: usize = 2;
    frame.render_widget(
        Paragraph::new("Key Players to Watch:").style(Style::default().add_modifier(Modifier::BOLD)),
        Rect { height: 1, ..area },
    );
    let grid = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };
    let visible_rows = (grid.height / CARD_HEIGHT) as usize;
    let card_width = grid.width / COLUMNS as u16;

    for (idx, player) in players.iter().take(visible_rows * COLUMNS).enumerate() {
        let card = Rect {
            x: grid.x + (idx % COLUMNS) as u16 * card_width,
            y: grid.y + (idx / COLUMNS) as u16 * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT,
        };
        let block = Block::default()
            .title(player.name.as_str())
            .borders(Borders::ALL);
        let inner = block.inner(card);
        frame.render_widget(block, card);
        frame.render_widget(meter(&player.probability, Color::Cyan), inner);
    }
}

fn meter(probability: &str, color: Color) -> Gauge<'static> {
    Gauge::default()
        .ratio(meter_ratio(probability))
        .label(probability.to_string())
        .gauge_style(Style::default().fg(color).bg(Color::Black))
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "CricSage - Help",
        "",
        "Form:",
        "  Tab / j / ↓    Next field",
        "  S-Tab / k / ↑  Previous field",
        "  → / l          Next option",
        "  ← / h          Previous option",
        "  Enter / p      Predict",
        "",
        "Global:",
        "  ?              Toggle help",
        "  q / Esc        Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState, Wrap},
};
use std::io::{stdout, Stdout};

use crate::client::TrainingTracker;
use crate::program::{self, PROGRAM_DAYS, PROGRAM_WEEKS, Workout, WorkoutType};
use crate::progress;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const DAYS_OF_WEEK: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// App state for TUI
pub struct App {
    tracker: TrainingTracker,
    today: NaiveDate,
    month: (i32, u32),
    selected_week: u32,
    selected_row: usize,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub async fn new(mut tracker: TrainingTracker) -> Self {
        tracker.load().await;
        let today = Local::now().date_naive();
        let selected_week = tracker
            .current_day(today)
            .map(week_for_day)
            .unwrap_or(1);

        Self {
            tracker,
            today,
            month: (today.year(), today.month()),
            selected_week,
            selected_row: 0,
            status: None,
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        restore_terminal()?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            if event::poll(std::time::Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key).await;
            }
        }
        Ok(())
    }

    fn selected_day(&self) -> i64 {
        selected_program_day(self.selected_week, self.selected_row)
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => {
                self.tracker.load().await;
                self.status = Some("Reloaded".to_string());
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.selected_week = c.to_digit(10).unwrap_or(1);
                self.selected_row = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_row = (self.selected_row + 1).min(6);
            }
            KeyCode::Left => self.month = shift_month(self.month, -1),
            KeyCode::Right => self.month = shift_month(self.month, 1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.tracker.start_date().is_none() {
                    return;
                }
                let day = self.selected_day();
                self.status = Some(if self.tracker.toggle_workout_complete(day).await {
                    format!("Day {} updated", day)
                } else {
                    format!("Could not update day {}", day)
                });
            }
            KeyCode::Char('t') if self.tracker.start_date().is_none() => {
                self.status = Some(if self.tracker.set_start_date(self.today).await {
                    self.month = (self.today.year(), self.today.month());
                    self.selected_week = 1;
                    "Program started today".to_string()
                } else {
                    "Could not save start date".to_string()
                });
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let title = match self.tracker.start_date() {
            Some(start) => format!("2K Erg Training | Started {}", start.format("%b %-d")),
            None => "2K Erg Training".to_string(),
        };
        let header = Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        match self.tracker.start_date() {
            Some(start) => self.render_dashboard(frame, chunks[1], start),
            None => self.render_setup(frame, chunks[1]),
        }

        // Footer
        let keys = "q: quit | r: reload | 1-4: week | ↑↓: select | space: toggle | ←→: month";
        let footer_text = match &self.status {
            Some(status) => format!("{}  [{}]", keys, status),
            None => keys.to_string(),
        };
        let footer = Paragraph::new(footer_text)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn render_setup(&self, frame: &mut Frame, area: Rect) {
        let text = if self.tracker.is_loading() {
            "Loading...".to_string()
        } else {
            format!(
                "No start date yet.\n\nPress t to start the {}-day program today ({}),\nor run `ergotracker start YYYY-MM-DD`.",
                PROGRAM_DAYS,
                self.today.format("%Y-%m-%d")
            )
        };
        let setup = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Get started"));
        frame.render_widget(setup, area);
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect, start: NaiveDate) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(10), Constraint::Min(12)])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(6)])
            .split(top[0]);

        self.render_streak(frame, left[0]);
        self.render_weekly(frame, left[1]);
        self.render_calendar(frame, top[1], start);
        self.render_workouts(frame, rows[1]);
    }

    fn render_streak(&self, frame: &mut Frame, area: Rect) {
        let streak = self.tracker.streak(self.today);
        let flame = if streak > 0 { Color::LightRed } else { Color::DarkGray };
        let text = Line::from(vec![
            Span::styled(format!("🔥 {}", streak), Style::default().fg(flame).bold()),
            Span::raw(format!("   completed: {}", self.tracker.total_completed())),
        ]);
        let card = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Your Streak"));
        frame.render_widget(card, area);
    }

    fn render_weekly(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Weekly Progress");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(1); PROGRAM_WEEKS as usize])
            .split(inner);

        for (stat, line) in self.tracker.weekly_stats().iter().zip(lines.iter()) {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Green))
                .ratio(stat.ratio())
                .label(format!("W{} {}/{}", stat.week, stat.completed, stat.total));
            frame.render_widget(gauge, *line);
        }
    }

    fn render_calendar(&self, frame: &mut Frame, area: Rect, start: NaiveDate) {
        let (year, month) = self.month;
        let title = NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default();

        let grid = progress::calendar_month(start, year, month, self.tracker.completed_workouts(), self.today)
            .unwrap_or_default();

        let rows: Vec<Row> = grid
            .chunks(7)
            .map(|week| {
                Row::new(week.iter().map(|day| {
                    let marker = day.workout.map(|w| w.kind.marker()).unwrap_or(' ');
                    let done = if day.is_completed { '✓' } else { ' ' };
                    let mut style = match (day.in_month, day.workout) {
                        (false, _) => Style::default().fg(Color::DarkGray),
                        (true, Some(w)) => Style::default().fg(workout_color(w.kind)),
                        (true, None) => Style::default(),
                    };
                    if day.is_completed {
                        style = style.fg(Color::Green);
                    }
                    if day.is_today {
                        style = style.reversed();
                    }
                    Cell::from(format!("{:>2}{}{}", day.date.day(), marker, done)).style(style)
                }))
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(5); 7])
            .header(Row::new(DAYS_OF_WEEK).style(Style::default().bold()))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(table, area);
    }

    fn render_workouts(&self, frame: &mut Frame, area: Rect) {
        let panes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(3)])
            .split(area);

        let current_day = self.tracker.current_day(self.today);

        let rows: Vec<Row> = program::week_workouts(self.selected_week)
            .map(|w| {
                let day = i64::from(w.day);
                let done = if self.tracker.is_workout_completed(day) { "✓" } else { "" };
                let mut title = w.title.to_string();
                if w.optional {
                    title.push_str(" (optional)");
                }
                let mut row = Row::new(vec![
                    Cell::from(format!("{:>2}", w.day)),
                    Cell::from(w.kind.label()).style(Style::default().fg(workout_color(w.kind))),
                    Cell::from(title),
                    Cell::from(w.description),
                    Cell::from(done).style(Style::default().fg(Color::Green)),
                ]);
                if current_day == Some(day) {
                    row = row.style(Style::default().bold());
                }
                row
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(10),
                Constraint::Length(30),
                Constraint::Min(20),
                Constraint::Length(4),
            ],
        )
        .header(Row::new(vec!["Day", "Type", "Workout", "Description", "Done"])
            .style(Style::default().bold()))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(format!("Week {}", self.selected_week)));

        let mut state = TableState::default().with_selected(Some(self.selected_row));
        frame.render_stateful_widget(table, panes[0], &mut state);

        let detail = u32::try_from(self.selected_day())
            .ok()
            .and_then(program::find_workout)
            .map(detail_line)
            .unwrap_or_default();
        let details = Paragraph::new(detail)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Details"));
        frame.render_widget(details, panes[1]);
    }
}

fn workout_color(kind: WorkoutType) -> Color {
    match kind {
        WorkoutType::Steady => Color::Blue,
        WorkoutType::Intervals => Color::Yellow,
        WorkoutType::Race => Color::Red,
        WorkoutType::Rest => Color::Gray,
    }
}

/// One-line summary of a workout for the details pane
fn detail_line(workout: &Workout) -> String {
    format!(
        "Day {}: {}",
        workout.day,
        workout.details.unwrap_or(workout.description)
    )
}

/// Program week containing `day`, clamped to the program
fn week_for_day(day: i64) -> u32 {
    (day.clamp(1, PROGRAM_DAYS as i64) as u32).div_ceil(7)
}

fn selected_program_day(week: u32, row: usize) -> i64 {
    i64::from((week - 1) * 7) + row as i64 + 1
}

fn shift_month((year, month): (i32, u32), delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

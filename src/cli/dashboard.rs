//! Interactive TUI dashboard
//!
//! A sidebar holds the five controls (age min, age max, class, travel type,
//! highlight). Any change re-runs the whole pipeline through the session and
//! redraws the three views from the fresh snapshot.
//!
//! Keys: Up/Down/Tab move focus, Left/Right adjust by one step,
//! PageUp/PageDown adjust ages by five, `r` resets, `q`/Esc quits.

use std::io::{stdout, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Terminal,
};

use crate::pipeline::{
    CorrelationResult, DashboardSession, DashboardSnapshot, DashboardView, HistogramResult,
    RateResult, Satisfaction, NO_HIGHLIGHT_OPTION,
};
use crate::report::{EMPTY_VIEW_NOTICE, INSUFFICIENT_DATA_NOTICE};

/// Age step for PageUp/PageDown.
const LARGE_AGE_STEP: i64 = 5;

/// Width of the correlation bars in cells.
const CORRELATION_BAR_WIDTH: f64 = 20.0;

// ============================================================================
// State
// ============================================================================

/// A sidebar control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    AgeMin,
    AgeMax,
    Class,
    TravelType,
    Highlight,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::AgeMin,
        Control::AgeMax,
        Control::Class,
        Control::TravelType,
        Control::Highlight,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Control::AgeMin => "Age from",
            Control::AgeMax => "Age to",
            Control::Class => "Class",
            Control::TravelType => "Travel type",
            Control::Highlight => "Highlight",
        }
    }

    fn position(&self) -> usize {
        Control::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    fn next(&self) -> Control {
        Control::ALL[(self.position() + 1) % Control::ALL.len()]
    }

    fn prev(&self) -> Control {
        let len = Control::ALL.len();
        Control::ALL[(self.position() + len - 1) % len]
    }
}

/// Outcome of handling one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    Continue,
    Quit,
}

/// Session plus the UI focus and the latest snapshot.
pub struct DashboardState<'a> {
    session: DashboardSession<'a>,
    focus: Control,
    snapshot: DashboardSnapshot,
}

impl<'a> DashboardState<'a> {
    pub fn new(session: DashboardSession<'a>) -> Self {
        let snapshot = session.snapshot();
        Self {
            session,
            focus: Control::AgeMin,
            snapshot,
        }
    }

    pub fn session(&self) -> &DashboardSession<'a> {
        &self.session
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> DashboardSnapshot {
        self.snapshot
    }

    pub fn focus(&self) -> Control {
        self.focus
    }

    /// Current value of a control as displayed in the sidebar.
    pub fn control_value(&self, control: Control) -> String {
        let criteria = self.session.criteria();
        match control {
            Control::AgeMin => criteria.age_min().to_string(),
            Control::AgeMax => criteria.age_max().to_string(),
            Control::Class => criteria.class().as_option().to_string(),
            Control::TravelType => criteria.travel_type().as_option().to_string(),
            Control::Highlight => self
                .session
                .highlight()
                .unwrap_or(NO_HIGHLIGHT_OPTION)
                .to_string(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DashboardAction {
        if key.kind != KeyEventKind::Press {
            return DashboardAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return DashboardAction::Quit;
            }
            KeyCode::Up | KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Down | KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::PageDown => self.adjust(-LARGE_AGE_STEP),
            KeyCode::PageUp => self.adjust(LARGE_AGE_STEP),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.reset();
                self.refresh();
            }
            _ => {}
        }
        DashboardAction::Continue
    }

    /// Move the focused control by `delta` steps and recompute.
    ///
    /// Ages stay within the dataset bounds and never cross each other;
    /// categorical controls cycle through their options one at a time.
    fn adjust(&mut self, delta: i64) {
        let controls = self.session.controls().clone();
        let (lower, upper) = controls.age_bounds;
        let (age_min, age_max) = {
            let c = self.session.criteria();
            (c.age_min(), c.age_max())
        };

        let changed = match self.focus {
            Control::AgeMin => {
                let value = shift_age(age_min, delta, lower, age_max);
                value != age_min && self.session.set_age_range(value, age_max).is_ok()
            }
            Control::AgeMax => {
                let value = shift_age(age_max, delta, age_min, upper);
                value != age_max && self.session.set_age_range(age_min, value).is_ok()
            }
            Control::Class => {
                let current = self.control_value(Control::Class);
                match cycle(&controls.class_options, &current, delta.signum()) {
                    Some(option) => {
                        self.session.set_class(option);
                        true
                    }
                    None => false,
                }
            }
            Control::TravelType => {
                let current = self.control_value(Control::TravelType);
                match cycle(&controls.travel_type_options, &current, delta.signum()) {
                    Some(option) => {
                        self.session.set_travel_type(option);
                        true
                    }
                    None => false,
                }
            }
            Control::Highlight => {
                let current = self.control_value(Control::Highlight);
                match cycle(&controls.highlight_options, &current, delta.signum()) {
                    Some(option) => {
                        self.session.set_highlight(option);
                        true
                    }
                    None => false,
                }
            }
        };

        if changed {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.snapshot = self.session.snapshot();
    }
}

fn shift_age(value: u32, delta: i64, lower: u32, upper: u32) -> u32 {
    let shifted = i64::from(value) + delta;
    shifted.clamp(i64::from(lower), i64::from(upper.max(lower))) as u32
}

fn cycle<'o>(options: &'o [String], current: &str, step: i64) -> Option<&'o str> {
    if options.is_empty() || step == 0 {
        return None;
    }
    let len = options.len() as i64;
    let position = options.iter().position(|o| o == current).unwrap_or(0) as i64;
    let next = (position + step).rem_euclid(len) as usize;
    Some(options[next].as_str())
}

// ============================================================================
// Terminal Setup/Teardown
// ============================================================================

/// Setup terminal for TUI rendering with panic-safe cleanup
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    // Install panic hook for clean terminal restoration
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        teardown_terminal();
        original_hook(panic_info);
    }));

    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

// ============================================================================
// Entry Point / Event Loop
// ============================================================================

/// Run the dashboard until the user quits, returning the last snapshot.
pub fn run_dashboard(session: DashboardSession<'_>) -> Result<DashboardSnapshot> {
    let mut state = DashboardState::new(session);
    let mut terminal = setup_terminal()?;

    let result = run_dashboard_loop(&mut terminal, &mut state);

    teardown_terminal();
    result.map(|_| state.into_snapshot())
}

fn run_dashboard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut DashboardState<'_>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render_dashboard(f, state))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if state.handle_key(key) == DashboardAction::Quit {
                    return Ok(());
                }
            }
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the complete dashboard
pub fn render_dashboard(f: &mut Frame, state: &DashboardState<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(f.area());

    render_sidebar(f, chunks[0], state);

    let snapshot = state.snapshot();
    match &snapshot.view {
        DashboardView::Empty => render_notice(f, chunks[1], "Dashboard", EMPTY_VIEW_NOTICE),
        DashboardView::Populated {
            histogram,
            rates,
            correlations,
        } => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);
            let bottom = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(rows[1]);

            render_histogram(f, rows[0], histogram);
            render_rates(f, bottom[0], &snapshot.rate_title(), rates);
            render_correlations(f, bottom[1], correlations);
        }
    }
}

fn render_sidebar(f: &mut Frame, area: Rect, state: &DashboardState<'_>) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(area);

    let items: Vec<ListItem> = Control::ALL
        .iter()
        .map(|&control| {
            let focused = control == state.focus();
            let marker = if focused { "▶ " } else { "  " };
            let style = if focused {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("{:<12}", control.title()), style),
                Span::styled(
                    state.control_value(control),
                    Style::default().fg(Color::Yellow),
                ),
            ]))
        })
        .collect();

    let snapshot = state.snapshot();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(
            " Filters · {}/{} ",
            snapshot.filtered_records, snapshot.total_records
        ))
        .title_style(Style::default().fg(Color::Cyan).bold());
    f.render_widget(List::new(items).block(block), sections[0]);

    let help = vec![
        help_line("↑/↓", "select"),
        help_line("←/→", "adjust"),
        help_line("PgUp/PgDn", "age ±5"),
        help_line("r", "reset"),
        help_line("q/Esc", "quit"),
    ];
    let help_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(help).block(help_block), sections[1]);
}

fn help_line(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<10}", key), Style::default().fg(Color::Cyan)),
        Span::styled(action, Style::default().fg(Color::DarkGray)),
    ])
}

fn render_notice(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" {} ", title));
    let paragraph = Paragraph::new(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Yellow),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block);
    f.render_widget(paragraph, area);
}

fn render_histogram(f: &mut Frame, area: Rect, histogram: &HistogramResult) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::raw(" Age Distribution · "),
            Span::styled("satisfied", Style::default().fg(Color::Blue)),
            Span::raw(" / "),
            Span::styled("dissatisfied", Style::default().fg(Color::Red)),
            Span::raw(" "),
        ]));

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(1);

    for bucket in &histogram.buckets {
        let group = BarGroup::default()
            .label(Line::from(format!("{:.0}", bucket.left)))
            .bars(&[
                Bar::default()
                    .value(bucket.satisfied as u64)
                    .style(Style::default().fg(Color::Blue)),
                Bar::default()
                    .value(bucket.dissatisfied as u64)
                    .style(Style::default().fg(Color::Red)),
            ]);
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}

fn render_rates(f: &mut Frame, area: Rect, title: &str, rates: &RateResult) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    for (entry, row) in rates.entries.iter().zip([rows[1], rows[2]]) {
        let color = match entry.satisfaction {
            Satisfaction::Dissatisfied => Color::Red,
            Satisfaction::Satisfied => Color::Blue,
        };
        let gauge = Gauge::default()
            .block(Block::default().title(entry.satisfaction.label()))
            .gauge_style(Style::default().fg(color))
            .ratio((entry.percentage / 100.0).clamp(0.0, 1.0))
            .label(format!("{} ({:.1}%)", entry.count, entry.percentage));
        f.render_widget(gauge, row);
    }
}

fn render_correlations(f: &mut Frame, area: Rect, correlations: &CorrelationResult) {
    let title = "Service Feature Correlation";
    let features = match correlations {
        CorrelationResult::InsufficientData => {
            render_notice(f, area, title, INSUFFICIENT_DATA_NOTICE);
            return;
        }
        CorrelationResult::Ranked(features) => features,
    };

    let items: Vec<ListItem> = features
        .iter()
        .map(|feature| {
            let length = (feature.correlation.abs() * CORRELATION_BAR_WIDTH).round() as usize;
            let (glyph, color) = if feature.correlation >= 0.0 {
                ("█", Color::Green)
            } else {
                ("▒", Color::Magenta)
            };
            let style = if feature.highlighted {
                Style::default().fg(Color::Red).bold()
            } else {
                Style::default().fg(color)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", feature.display_label), style),
                Span::styled(format!("{:>6.2} ", feature.correlation), style),
                Span::styled(glyph.repeat(length), style),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title));
    f.render_widget(List::new(items).block(block), area);
}

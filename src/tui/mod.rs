// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

//! Terminal UI demo.
//!
//! Simulates a conversation page inside the terminal (one pixel per row) and
//! hosts the tracker against it: the left pane is the scrollable
//! conversation, the right sidebar is the navigation overlay with the active
//! turn highlighted. Scrolling, navigation locks, snap corrections and
//! debounced rebuilds all run through the same core API a real host would
//! drive.

use std::error::Error;
use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};

use crate::host::{HostPage, Scroller, SimPage};
use crate::model::Role;
use crate::source::{MessageScan, RebuildScheduler, TranscriptTurn, TurnSource};
use crate::track::Tracker;

#[cfg(test)]
mod tests;

const SIDEBAR_WIDTH: u16 = 36;
const SCROLL_STEP: f64 = 3.0;
const TOAST_DURATION: Duration = Duration::from_secs(2);
const ACTIVE_COLOR: Color = Color::LightGreen;
const CURSOR_COLOR: Color = Color::Cyan;
const REFERENCE_MARK_COLOR: Color = Color::DarkGray;

/// Demo-shell knobs set from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Host the conversation inside a nested scroll region instead of the
    /// root scroller.
    pub nested: bool,
    /// Event poll timeout per loop iteration.
    pub tick: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { nested: false, tick: Duration::from_millis(16) }
    }
}

/// Runs the interactive demo until the user quits.
pub fn run(transcript: Vec<TranscriptTurn>, options: RunOptions) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let (cols, rows) = crossterm::terminal::size()?;
    let mut app = App::new(transcript, layout_for(cols, rows), options.nested, Instant::now());

    while !app.should_quit {
        let now = Instant::now();
        app.advance(now);
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(options.tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Event::Resize(cols, rows) => {
                    app.handle_resize(layout_for(cols, rows), Instant::now());
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Conversation pane geometry derived from the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PaneLayout {
    pub(crate) viewport_rows: u16,
    pub(crate) wrap_width: u16,
}

pub(crate) fn layout_for(cols: u16, rows: u16) -> PaneLayout {
    let pane_cols = cols.saturating_sub(SIDEBAR_WIDTH).max(20);
    PaneLayout {
        viewport_rows: rows.saturating_sub(1).max(4),
        // Two gutter columns for the reference-line marker.
        wrap_width: pane_cols.saturating_sub(2).max(16),
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

pub(crate) struct App {
    transcript: Vec<TranscriptTurn>,
    page: SimPage,
    /// The scroller the scroll keys drive: the root, or the nested region.
    scroller: Scroller,
    nested: bool,
    tracker: Tracker,
    scan: MessageScan,
    rebuild: RebuildScheduler,
    layout: PaneLayout,
    cursor: usize,
    should_quit: bool,
    toast: Option<Toast>,
    appended: usize,
}

impl App {
    pub(crate) fn new(
        transcript: Vec<TranscriptTurn>,
        layout: PaneLayout,
        nested: bool,
        now: Instant,
    ) -> Self {
        let (page, scroller) = build_page(&transcript, layout, nested);
        let mut app = Self {
            transcript,
            page,
            scroller,
            nested,
            tracker: Tracker::new(),
            scan: MessageScan,
            rebuild: RebuildScheduler::new(),
            layout,
            cursor: 0,
            should_quit: false,
            toast: None,
            appended: 0,
        };
        let snapshot = app.scan.snapshot(&app.page);
        app.tracker.apply_snapshot(snapshot);
        app.tracker.on_frame(&mut app.page, now);
        app
    }

    /// One cooperative step: animations, due rebuilds, the frame pass.
    pub(crate) fn advance(&mut self, now: Instant) {
        if self.page.tick(now) {
            self.tracker.on_scroll_or_resize(now);
        }
        if self.rebuild.due(now) {
            self.apply_rebuild(now);
        }
        self.tracker.on_frame(&mut self.page, now);
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') => self.drag(SCROLL_STEP, now),
            KeyCode::Char('k') => self.drag(-SCROLL_STEP, now),
            KeyCode::Char('d') => self.drag(self.page.client_height(self.scroller) / 2.0, now),
            KeyCode::Char('u') => self.drag(-self.page.client_height(self.scroller) / 2.0, now),
            KeyCode::Char('g') => {
                self.page.drag_to(self.scroller, 0.0);
                self.tracker.on_scroll_or_resize(now);
            }
            KeyCode::Char('G') => {
                self.page.drag_to(self.scroller, self.page.max_scroll(self.scroller));
                self.tracker.on_scroll_or_resize(now);
            }
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Enter => self.tracker.navigate(&mut self.page, self.cursor, now),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.tracker.navigate(&mut self.page, index, now);
                if index < self.tracker.turns().len() {
                    self.cursor = index;
                }
            }
            KeyCode::Char('a') => {
                self.append_turn();
                self.rebuild.notify(now);
                self.set_toast("Turn appended; sidebar rebuilds shortly", now);
            }
            _ => {}
        }
    }

    pub(crate) fn handle_resize(&mut self, layout: PaneLayout, now: Instant) {
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        let scroll = self.page.scroll_top(self.scroller);
        let (page, scroller) = build_page(&self.transcript, layout, self.nested);
        self.page = page;
        self.scroller = scroller;
        self.page.drag_to(self.scroller, scroll);
        let snapshot = self.scan.snapshot(&self.page);
        self.tracker.apply_snapshot(snapshot);
        self.tracker.on_scroll_or_resize(now);
    }

    fn drag(&mut self, delta: f64, now: Instant) {
        self.page.drag_by(self.scroller, delta);
        self.tracker.on_scroll_or_resize(now);
    }

    fn move_cursor(&mut self, delta: i64) {
        let len = self.tracker.turns().len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor as i64 + delta;
        self.cursor = cursor.clamp(0, len as i64 - 1) as usize;
    }

    fn append_turn(&mut self) {
        self.appended += 1;
        let n = self.appended;
        self.transcript.push(TranscriptTurn {
            role: Role::User,
            text: format!("Appended question {n}: does the sidebar keep up?"),
        });
        self.transcript.push(TranscriptTurn {
            role: Role::Assistant,
            text: format!("Simulated answer {n}. The rebuild is debounced, so bursts coalesce."),
        });
    }

    /// Debounce elapsed: rebuild the page from the transcript and hand the
    /// tracker a fresh snapshot.
    fn apply_rebuild(&mut self, now: Instant) {
        let scroll = self.page.scroll_top(self.scroller);
        let (page, scroller) = build_page(&self.transcript, self.layout, self.nested);
        self.page = page;
        self.scroller = scroller;
        self.page.drag_to(self.scroller, scroll);
        let snapshot = self.scan.snapshot(&self.page);
        self.tracker.apply_snapshot(snapshot);
        self.tracker.on_scroll_or_resize(now);
        let len = self.tracker.turns().len();
        if len > 0 {
            self.cursor = self.cursor.min(len - 1);
        } else {
            self.cursor = 0;
        }
    }

    fn set_toast(&mut self, message: impl Into<String>, now: Instant) {
        self.toast = Some(Toast { message: message.into(), expires_at: now + TOAST_DURATION });
    }

    pub(crate) fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    #[cfg(test)]
    pub(crate) fn page(&self) -> &SimPage {
        &self.page
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Builds the simulated page from the transcript: every message becomes a
/// block of `header + wrapped lines + blank` rows. With `nested` the
/// messages live inside an independently scrollable region instead of the
/// root scroller, so the demo exercises the nested-container locator path.
pub(crate) fn build_page(
    transcript: &[TranscriptTurn],
    layout: PaneLayout,
    nested: bool,
) -> (SimPage, Scroller) {
    let mut page = SimPage::new(f64::from(layout.viewport_rows));
    let (parent, scroller) = if nested {
        let region = page.push_scroll_region(None, f64::from(layout.viewport_rows));
        (Some(region), Scroller::Node(region))
    } else {
        (None, Scroller::Root)
    };
    for turn in transcript {
        let lines = wrap_text(&turn.text, layout.wrap_width as usize);
        let height = lines.len() as f64 + 2.0;
        page.push_message(parent, turn.role, turn.text.clone(), height);
    }
    (page, scroller)
}

/// Greedy word wrap; words longer than the width are split hard.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let mut word = word;
            loop {
                let fits = width.saturating_sub(if current.is_empty() { 0 } else { current.chars().count() + 1 });
                if word.chars().count() <= fits {
                    if !current.is_empty() {
                        current.push(' ');
                    }
                    current.push_str(word);
                    break;
                }
                if current.is_empty() {
                    let cut = word
                        .char_indices()
                        .nth(width)
                        .map(|(pos, _)| pos)
                        .unwrap_or(word.len());
                    lines.push(word[..cut].to_string());
                    word = &word[cut..];
                } else {
                    lines.push(std::mem::take(&mut current));
                }
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(area);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDEBAR_WIDTH)])
        .split(rows[0]);

    draw_conversation(frame, app, panes[0]);
    draw_sidebar(frame, app, panes[1]);
    draw_footer(frame, app, rows[1]);
}

fn draw_conversation(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let viewport = area.height as usize;
    let reference_row = (viewport as f64 * crate::track::REFERENCE_LINE_RATIO) as usize;
    let mut rows: Vec<Line<'_>> = vec![Line::default(); viewport];

    for (node, role, text) in app.page.messages() {
        let Some(rect) = app.page.rect(node) else {
            continue;
        };
        if rect.bottom() <= 0.0 || rect.top >= viewport as f64 {
            continue;
        }
        let top = rect.top as i64;
        let (who, style) = match role {
            Role::User => ("User", Style::default().add_modifier(Modifier::BOLD)),
            Role::Assistant => ("Assistant", Style::default().fg(Color::Gray)),
        };
        let mut block_lines = vec![Line::styled(who.to_string(), style)];
        for line in wrap_text(text, app.layout.wrap_width as usize) {
            block_lines.push(Line::raw(line));
        }
        for (offset, line) in block_lines.into_iter().enumerate() {
            let row = top + offset as i64;
            if (0..viewport as i64).contains(&row) {
                rows[row as usize] = line;
            }
        }
    }

    // Gutter marker for the reference line the estimator measures against.
    let lines: Vec<Line<'_>> = rows
        .into_iter()
        .enumerate()
        .map(|(row, line)| {
            let marker = if row == reference_row { "▶ " } else { "  " };
            let mut spans =
                vec![Span::styled(marker, Style::default().fg(REFERENCE_MARK_COLOR))];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_sidebar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let active = app.tracker.active_index();
    let items: Vec<ListItem<'_>> = app
        .tracker
        .turns()
        .iter()
        .enumerate()
        .map(|(index, turn)| {
            let cursor = if index == app.cursor { "▸ " } else { "  " };
            let mut style = Style::default();
            if Some(index) == active {
                style = style.fg(ACTIVE_COLOR).add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::styled(cursor, Style::default().fg(CURSOR_COLOR)),
                Span::styled(turn.label().to_string(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::LEFT)
            .title("Turns"),
    );
    let mut state = ListState::default();
    state.select(Some(app.cursor.min(app.tracker.turns().len().saturating_sub(1))));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let toast_suffix = match app.toast.as_ref().map(|t| (t.message.clone(), t.expires_at)) {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };
    let lock_marker = if app.tracker.is_locked() { " [locked]" } else { "" };
    let help = format!(
        "j/k d/u g/G scroll  ↑/↓+Enter or 1-9 jump  a append  q quit{lock_marker}{toast_suffix}"
    );
    frame.render_widget(
        Paragraph::new(Line::styled(help, Style::default().fg(Color::Gray))),
        area,
    );
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

/// Built-in transcript for `--demo`.
pub fn demo_transcript() -> Vec<TranscriptTurn> {
    let pairs: [(&str, &str); 6] = [
        (
            "How does the navigator decide which turn is active?",
            "It measures the distance from each turn's box to a reference line \
             fixed at 30% of the viewport height and picks the closest one. \
             Ties go to the earlier turn, which keeps fast scrolling stable.",
        ),
        (
            "What happens when I click an entry in the sidebar?",
            "The clicked turn becomes active immediately and a short lock \
             suppresses the scroll-position estimate while the page glides to \
             the target, so the highlight never flickers through intermediate \
             turns.",
        ),
        (
            "And if I grab the scrollbar during that animation?",
            "Your scrolling keeps refreshing the lock's idle deadline; about \
             140ms after you stop, the lock releases and the estimator takes \
             over again. A hard ceiling of 1.2s guarantees it never sticks.",
        ),
        (
            "Why is there a snap after the smooth scroll finishes?",
            "Animated scrolls do not always land pixel-exact. At release the \
             navigator re-measures the target and, if the miss exceeds a \
             couple of pixels, issues one instant corrective scroll.",
        ),
        (
            "Does the sidebar survive the page re-rendering its content?",
            "Rebuild notifications are debounced for 250ms. If the rebuilt \
             list has the same labels, nothing is replaced; otherwise the \
             turns are rebuilt wholesale and the active index is revalidated.",
        ),
        (
            "What does the marker in the left gutter show?",
            "That is the reference line itself. Whichever turn sits closest \
             to it is the one highlighted in this sidebar.",
        ),
    ];
    pairs
        .into_iter()
        .flat_map(|(question, answer)| {
            [
                TranscriptTurn { role: Role::User, text: question.to_string() },
                TranscriptTurn { role: Role::Assistant, text: answer.to_string() },
            ]
        })
        .collect()
}

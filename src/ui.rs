use crate::aggregate::{display_value, to_percentage, weight_sum};
use crate::form::{format_number, FormField, GradeForm};
use crate::gradebook::Gradebook;
use crate::grades::Subject;
use crate::theme::{Palette, Theme};
use anyhow::{Context as AnyhowContext, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use tracing::{debug, info, warn};

pub const TITLE: &str = "My Awesome Grades";

/// Inline edit of one row of the selected subject, tracked by position
#[derive(Debug, Clone, PartialEq)]
pub struct RowEdit {
    pub index: usize,
    pub form: GradeForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Overview,
    Detail,
    Editing,
    Dialog,
}

pub struct App {
    pub gradebook: Gradebook,
    /// Card under the cursor on the overview row
    pub card_cursor: usize,
    /// Subject whose detail table is open (index into the gradebook)
    pub selected: Option<usize>,
    pub grade_state: TableState,
    pub editing: Option<RowEdit>,
    /// Buffer of the "Add New Grade" dialog while it is open
    pub dialog: Option<GradeForm>,
    pub theme: Theme,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(gradebook: Gradebook, theme: Theme) -> Self {
        Self {
            gradebook,
            card_cursor: 0,
            selected: None,
            grade_state: TableState::default(),
            editing: None,
            dialog: None,
            theme,
            status: None,
            should_quit: false,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.dialog.is_some() {
            Mode::Dialog
        } else if self.editing.is_some() {
            Mode::Editing
        } else if self.selected.is_some() {
            Mode::Detail
        } else {
            Mode::Overview
        }
    }

    pub fn selected_subject(&self) -> Option<&Subject> {
        self.selected.and_then(|i| self.gradebook.subjects().get(i))
    }

    fn selected_name(&self) -> Option<String> {
        self.selected_subject().map(|s| s.name.clone())
    }

    fn selected_len(&self) -> usize {
        self.selected_subject().map(|s| s.grades.len()).unwrap_or(0)
    }

    // ========================================================================
    // KEY HANDLING
    // ========================================================================

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.mode() {
            Mode::Dialog => self.handle_dialog_key(key),
            Mode::Editing => self.handle_edit_key(key),
            Mode::Detail => self.handle_detail_key(key),
            Mode::Overview => self.handle_overview_key(key),
        }
    }

    fn handle_overview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.next_card(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.previous_card(),
            KeyCode::Enter => self.select_subject(self.card_cursor),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Esc => self.close_detail(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.next_card();
                self.select_subject(self.card_cursor);
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                self.previous_card();
                self.select_subject(self.card_cursor);
            }
            KeyCode::Down | KeyCode::Char('j') => self.next_row(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_row(),
            KeyCode::Char('a') => self.open_dialog(),
            KeyCode::Char('e') | KeyCode::Enter => self.toggle_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected_row(),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.toggle_edit(),
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Down => self.next_row(),
            KeyCode::Up => self.previous_row(),
            KeyCode::Delete => self.delete_selected_row(),
            _ => {
                if let Some(edit) = self.editing.as_mut() {
                    edit_form(&mut edit.form, key);
                }
            }
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_dialog(),
            KeyCode::Esc => {
                self.dialog = None;
                debug!("add dialog cancelled");
            }
            _ => {
                if let Some(form) = self.dialog.as_mut() {
                    edit_form(form, key);
                }
            }
        }
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    pub fn next_card(&mut self) {
        let len = self.gradebook.len();
        if len == 0 {
            return;
        }
        self.card_cursor = if self.card_cursor >= len - 1 {
            0
        } else {
            self.card_cursor + 1
        };
    }

    pub fn previous_card(&mut self) {
        let len = self.gradebook.len();
        if len == 0 {
            return;
        }
        self.card_cursor = if self.card_cursor == 0 {
            len - 1
        } else {
            self.card_cursor - 1
        };
    }

    pub fn select_subject(&mut self, index: usize) {
        let Some(subject) = self.gradebook.subjects().get(index) else {
            return;
        };
        debug!(subject = %subject.name, "subject selected");

        self.card_cursor = index;
        self.selected = Some(index);
        self.editing = None;
        self.grade_state = TableState::default();
        self.clamp_row_selection();
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
        self.editing = None;
        self.grade_state = TableState::default();
    }

    pub fn next_row(&mut self) {
        let len = self.selected_len();
        if len == 0 {
            return;
        }
        let i = match self.grade_state.selected() {
            Some(i) if i < len - 1 => i + 1,
            _ => 0,
        };
        self.grade_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.selected_len();
        if len == 0 {
            return;
        }
        let i = match self.grade_state.selected() {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.grade_state.select(Some(i));
    }

    fn clamp_row_selection(&mut self) {
        let len = self.selected_len();
        let row = match self.grade_state.selected() {
            _ if len == 0 => None,
            None => Some(0),
            Some(i) => Some(i.min(len - 1)),
        };
        self.grade_state.select(row);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        info!(theme = self.theme.name(), "theme toggled");
    }

    // ========================================================================
    // GRADE MUTATIONS
    // ========================================================================

    pub fn open_dialog(&mut self) {
        if self.selected.is_some() {
            self.dialog = Some(GradeForm::blank());
        }
    }

    pub fn submit_dialog(&mut self) {
        let (Some(form), Some(name)) = (self.dialog.take(), self.selected_name()) else {
            return;
        };

        let grade = form.to_grade();
        let assignment = grade.assignment.clone();
        self.gradebook.add_grade(&name, grade);
        self.clamp_row_selection();
        self.status = Some(format!("Added '{}' to {}", assignment, name));
    }

    /// Start editing the row under the cursor, or save the row being edited.
    pub fn toggle_edit(&mut self) {
        let Some(name) = self.selected_name() else {
            return;
        };

        if let Some(edit) = self.editing.take() {
            match self.gradebook.update_grade(&name, edit.form.to_grade(), edit.index) {
                Ok(_) => {
                    self.status = Some(format!("Saved row {} of {}", edit.index + 1, name));
                }
                Err(err) => {
                    warn!(error = %err, "update rejected");
                    self.status = Some(err.to_string());
                }
            }
            return;
        }

        let Some(index) = self.grade_state.selected() else {
            return;
        };
        let form = self
            .selected_subject()
            .and_then(|s| s.grades.get(index))
            .map(GradeForm::from_grade);
        if let Some(form) = form {
            self.editing = Some(RowEdit { index, form });
            debug!(subject = %name, index, "row edit started");
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn delete_selected_row(&mut self) {
        let (Some(name), Some(index)) = (self.selected_name(), self.grade_state.selected()) else {
            return;
        };

        match self.gradebook.delete_grade(&name, index) {
            Ok(_) => {
                self.editing = match self.editing.take() {
                    Some(edit) if edit.index == index => None,
                    Some(edit) if edit.index > index => Some(RowEdit {
                        index: edit.index - 1,
                        form: edit.form,
                    }),
                    other => other,
                };
                self.clamp_row_selection();
                self.status = Some(format!("Deleted row {} of {}", index + 1, name));
            }
            Err(err) => {
                warn!(error = %err, "delete rejected");
                self.status = Some(err.to_string());
            }
        }
    }
}

fn edit_form(form: &mut GradeForm, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_previous(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        warn!(error = %err, "ui loop exited with error");
    }

    res.context("UI loop failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

pub fn ui(f: &mut Frame, app: &mut App) {
    let palette = app.theme.palette();
    let area = f.size();

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(5), // Subject cards
            Constraint::Length(5), // Overall average
            Constraint::Min(0),    // Detail table
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    render_title(f, chunks[0], &palette);
    render_cards(f, chunks[1], app, &palette);
    render_overall(f, chunks[2], app, &palette);
    if app.selected_subject().is_some() {
        render_detail(f, chunks[3], app, &palette);
    }
    render_status_bar(f, chunks[4], app, &palette);

    if let Some(form) = &app.dialog {
        render_dialog(f, area, form, &palette);
    }
}

fn render_title(f: &mut Frame, area: Rect, palette: &Palette) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            TITLE,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(ratatui::layout::Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent_alt)),
    );

    f.render_widget(title, area);
}

fn render_cards(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let subjects = app.gradebook.subjects();
    if subjects.is_empty() {
        let empty = Paragraph::new("No subjects")
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let count = subjects.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            subjects
                .iter()
                .map(|_| Constraint::Ratio(1, count))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for (i, (subject, column)) in subjects.iter().zip(columns.iter()).enumerate() {
        let border = if app.selected == Some(i) {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else if app.card_cursor == i && app.mode() == Mode::Overview {
            Style::default().fg(palette.accent_alt)
        } else {
            Style::default().fg(palette.border)
        };

        let total = subject.total();
        render_score_card(
            f,
            *column,
            &format!(" {} ", subject.name),
            "Grade:",
            total,
            border,
            palette,
        );
    }
}

fn render_overall(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    render_score_card(
        f,
        area,
        " Overall Grade Average ",
        "Average:",
        app.gradebook.overall_average(),
        Style::default().fg(palette.border),
        palette,
    );
}

/// Bordered card with a "label value" line and a progress gauge
fn render_score_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    label: &str,
    value: f64,
    border: Style,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let value_line = Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", label), Style::default().fg(palette.muted)),
        Span::styled(
            format_number(display_value(value)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    f.render_widget(value_line, rows[0]);

    let percent = to_percentage(value);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.gauge).bg(palette.highlight))
        .ratio(percent / 100.0)
        .label(format!("{:.0}%", percent))
        .use_unicode(true);
    f.render_widget(gauge, rows[1]);
}

fn render_detail(f: &mut Frame, area: Rect, app: &mut App, palette: &Palette) {
    let Some(subject) = app.selected_subject() else {
        return;
    };

    let header_cells = ["Assignment", "Score", "Weight"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = subject
        .grades
        .iter()
        .enumerate()
        .map(|(i, grade)| match &app.editing {
            Some(edit) if edit.index == i => Row::new(vec![
                input_cell(&edit.form, FormField::Assignment, palette),
                input_cell(&edit.form, FormField::Score, palette),
                input_cell(&edit.form, FormField::Weight, palette),
            ]),
            _ => Row::new(vec![
                Cell::from(grade.assignment.clone()),
                Cell::from(format_number(grade.score)),
                Cell::from(format!("{}%", format_number(grade.weight * 100.0))),
            ]),
        })
        .collect();

    let title = format!(
        " {} Details · Σ weight {} ",
        subject.name,
        format_number(weight_sum(&subject.grades))
    );

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(palette.highlight)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.grade_state);
}

fn input_cell<'a>(form: &GradeForm, field: FormField, palette: &Palette) -> Cell<'a> {
    let focused = form.focus == field;
    let text = if focused {
        format!("[{}▏]", form.value(field))
    } else {
        format!("[{}]", form.value(field))
    };
    let style = if focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(palette.text)
    };
    Cell::from(text).style(style)
}

fn render_dialog(f: &mut Frame, area: Rect, form: &GradeForm, palette: &Palette) {
    let popup = centered_rect(50, 9, area);

    let mut content = vec![Line::from("")];
    for field in [FormField::Assignment, FormField::Score, FormField::Weight] {
        let focused = form.focus == field;
        let marker = if focused { "› " } else { "  " };
        let value_style = if focused {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.text)
        };
        content.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<16}", field.hint()), Style::default().fg(palette.muted)),
            Span::styled(form.value(field).to_string(), value_style),
        ]));
    }
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("  Enter", Style::default().fg(palette.accent)),
        Span::raw(" Add Grade  "),
        Span::styled("Esc", Style::default().fg(palette.danger)),
        Span::raw(" Cancel"),
    ]));

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.background).fg(palette.text))
            .title(" Add New Grade "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let key = Style::default().fg(palette.accent);
    let hints: Vec<(&str, &str)> = match app.mode() {
        Mode::Overview => vec![("←/→", "Subject"), ("Enter", "Open"), ("t", "Theme"), ("q", "Quit")],
        Mode::Detail => vec![
            ("↑/↓", "Row"),
            ("a", "Add"),
            ("e", "Edit"),
            ("d", "Delete"),
            ("Esc", "Close"),
            ("q", "Quit"),
        ],
        Mode::Editing => vec![("Tab", "Field"), ("Enter", "Save"), ("Esc", "Cancel")],
        Mode::Dialog => vec![("Tab", "Field"), ("Enter", "Add"), ("Esc", "Cancel")],
    };

    let mut status_spans = Vec::new();
    for (i, (k, label)) in hints.into_iter().enumerate() {
        if i > 0 {
            status_spans.push(Span::raw(" | "));
        }
        status_spans.push(Span::styled(k, key));
        status_spans.push(Span::raw(format!(" {}", label)));
    }

    if let Some(status) = &app.status {
        status_spans.push(Span::raw("  │  "));
        status_spans.push(Span::styled(status.clone(), Style::default().fg(palette.muted)));
    }

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );

    f.render_widget(status_bar, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// ============================================================================
// TESTS
// ============================================================================

use crate::data::HolidayRecord;
use crate::data::options::{country_by_code, month_label, type_label};
use crate::state::{
    FetchCompletion, FetchCoordinator, FetchOutcome, FetchTicket, FetchWorker, PageState,
    SearchForm,
};
use anyhow::Result;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

const ACCENT: Color = Color::Indexed(99); // indigo
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Country,
    Year,
    Month,
    Day,
    Type,
    Query,
    Submit,
}

impl Field {
    const ORDER: [Field; 7] = [
        Field::Country,
        Field::Year,
        Field::Month,
        Field::Day,
        Field::Type,
        Field::Query,
        Field::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Field {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Field {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Form(Field),
    Results,
}

/// Composition root of the page: the draft form, the fetch coordinator and
/// the view-local selection. Requests the coordinator issues are queued in
/// `outbox` for the event loop to hand to the worker.
pub struct App {
    form: SearchForm,
    coordinator: FetchCoordinator,
    focus: Focus,
    /// Selected row in the result table.
    list_cursor: usize,
    /// Open detail popup for this row of the current page.
    detail: Option<usize>,
    outbox: Vec<FetchTicket>,
    /// Advanced once per event-loop tick; drives the loading spinner.
    tick: usize,
}

impl App {
    pub fn new(form: SearchForm) -> Self {
        let coordinator = FetchCoordinator::new(form.submit());
        App {
            form,
            coordinator,
            focus: Focus::Results,
            list_cursor: 0,
            detail: None,
            outbox: Vec::new(),
            tick: 0,
        }
    }

    /// Queues the initial fetch for the form's default criteria.
    pub fn start(&mut self) {
        let ticket = self.coordinator.issue();
        self.outbox.push(ticket);
    }

    pub fn take_tickets(&mut self) -> Vec<FetchTicket> {
        std::mem::take(&mut self.outbox)
    }

    pub fn on_completion(&mut self, done: FetchCompletion) {
        if self.coordinator.complete(done.token, done.result) {
            self.list_cursor = 0;
            self.detail = None;
        }
    }

    pub fn on_tick(&mut self) {
        if self.coordinator.is_loading() {
            self.tick = self.tick.wrapping_add(1);
        }
    }

    fn submit(&mut self) {
        let ticket = self.coordinator.submit(self.form.submit());
        self.outbox.push(ticket);
        self.list_cursor = 0;
        self.detail = None;
        self.focus = Focus::Results;
    }

    fn queue(&mut self, ticket: Option<FetchTicket>) {
        if let Some(t) = ticket {
            self.outbox.push(t);
            self.list_cursor = 0;
        }
    }

    fn selected_record(&self) -> Option<&HolidayRecord> {
        self.detail.and_then(|i| self.coordinator.records().get(i))
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.detail.is_some() {
            if matches!(
                code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ')
            ) {
                self.detail = None;
            }
            return false;
        }

        match code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Results => Focus::Form(Field::Country),
                    Focus::Form(_) => Focus::Results,
                };
                return false;
            }
            _ => {}
        }

        match self.focus {
            Focus::Form(field) => {
                self.handle_form_key(field, code);
                false
            }
            Focus::Results => self.handle_results_key(code),
        }
    }

    fn handle_form_key(&mut self, field: Field, code: KeyCode) {
        match code {
            KeyCode::Up => self.focus = Focus::Form(field.prev()),
            KeyCode::Down => self.focus = Focus::Form(field.next()),
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.focus = Focus::Results,
            KeyCode::Left | KeyCode::Right => {
                let forward = code == KeyCode::Right;
                match field {
                    Field::Country => self.form.cycle_country(forward),
                    Field::Year => self.form.step_year(forward),
                    Field::Month => self.form.cycle_month(forward),
                    Field::Day => self.form.cycle_day(forward),
                    Field::Type => self.form.cycle_holiday_type(forward),
                    Field::Query | Field::Submit => {}
                }
            }
            KeyCode::Backspace => match field {
                Field::Year => self.form.pop_year_char(),
                Field::Query => self.form.pop_query_char(),
                _ => {}
            },
            KeyCode::Char(c) => match field {
                Field::Year => self.form.push_year_char(c),
                Field::Query => self.form.push_query_char(c),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) -> bool {
        let len = self.coordinator.records().len();
        match code {
            KeyCode::Up => {
                if self.list_cursor > 0 {
                    self.list_cursor -= 1;
                }
            }
            KeyCode::Down => {
                if self.list_cursor + 1 < len {
                    self.list_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if self.list_cursor < len {
                    self.detail = Some(self.list_cursor);
                }
            }
            KeyCode::Char('n') | KeyCode::Right => {
                let ticket = self.coordinator.go_to_next_page();
                self.queue(ticket);
            }
            KeyCode::Char('p') | KeyCode::Left => {
                let ticket = self.coordinator.go_to_previous_page();
                self.queue(ticket);
            }
            KeyCode::Char('r') => {
                let ticket = self.coordinator.retry();
                self.queue(Some(ticket));
            }
            KeyCode::Char('/') => self.focus = Focus::Form(Field::Query),
            KeyCode::Char('q') | KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    pub fn render(&self, f: &mut Frame) {
        let area = f.area();
        let footer_height = match self.coordinator.page_state() {
            Some(p) if p.shows_controls() => 1,
            _ => 0,
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),             // search form
                Constraint::Min(5),                // results
                Constraint::Length(footer_height), // pagination
                Constraint::Length(1),             // key hints
            ])
            .split(area);

        self.render_form(f, chunks[0]);
        self.render_results(f, chunks[1]);
        if let Some(page) = self.coordinator.page_state() {
            if page.shows_controls() {
                render_pagination(f, chunks[2], page);
            }
        }
        self.render_hints(f, chunks[3]);

        if let Some(record) = self.selected_record() {
            render_detail(f, area, record);
        }
    }

    fn field_span(&self, field: Field, label: &str, value: String) -> Vec<Span<'static>> {
        let focused = self.focus == Focus::Form(field);
        let value_style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        vec![
            Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::DIM)),
            Span::styled(value, value_style),
            Span::raw("   "),
        ]
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let country = match country_by_code(self.form.country()) {
            Some(c) => format!("{} ({})", c.name, c.code),
            None => self.form.country().to_string(),
        };
        let day = self
            .form
            .day()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "All Days".to_string());
        let query_cursor = if self.focus == Focus::Form(Field::Query) { "_" } else { "" };
        let query = format!("{}{}", self.form.search_query(), query_cursor);
        let query = if query.is_empty() {
            "e.g. Christmas, New Year...".to_string()
        } else {
            query
        };

        let mut first: Vec<Span> = Vec::new();
        first.extend(self.field_span(Field::Country, "Country", country));
        first.extend(self.field_span(Field::Year, "Year", self.form.year().to_string()));
        first.extend(self.field_span(
            Field::Month,
            "Month",
            month_label(self.form.month()).to_string(),
        ));
        first.extend(self.field_span(Field::Day, "Day", day));

        let mut second: Vec<Span> = Vec::new();
        second.extend(self.field_span(
            Field::Type,
            "Type",
            type_label(self.form.holiday_type()).to_string(),
        ));
        second.extend(self.field_span(Field::Query, "Search by Name", query));
        let button_style = if self.focus == Focus::Form(Field::Submit) {
            Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        };
        second.push(Span::styled("[ Search Holidays ]", button_style));

        let p = Paragraph::new(vec![Line::from(first), Line::from(second)]).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search Holidays "),
        );
        f.render_widget(p, area);
    }

    fn render_results(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        match self.coordinator.outcome() {
            FetchOutcome::Loading => {
                let frame = SPINNER[self.tick % SPINNER.len()];
                let p = Paragraph::new(Line::from(Span::styled(
                    format!(
                        "{frame} Loading holidays... (page {})",
                        self.coordinator.current_page()
                    ),
                    Style::default().fg(ACCENT),
                )))
                .block(block.title(" Holidays "));
                f.render_widget(p, area);
            }
            FetchOutcome::Failure(msg) => {
                let p = Paragraph::new(Line::from(Span::styled(
                    msg.clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )))
                .block(block.title(" Holidays "))
                .wrap(Wrap { trim: true });
                f.render_widget(p, area);
            }
            FetchOutcome::Success { records, .. } if records.is_empty() => {
                let p = Paragraph::new(vec![
                    Line::from(Span::styled(
                        "No holidays found",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        "Try changing your search criteria or select a different country/year.",
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
                .block(block.title(" Holidays "));
                f.render_widget(p, area);
            }
            FetchOutcome::Success { records, page } => {
                self.render_table(f, area, records, page);
            }
        }
    }

    fn render_table(&self, f: &mut Frame, area: Rect, records: &[HolidayRecord], page: &PageState) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let header = Row::new(vec![
            Cell::from("#").style(bold),
            Cell::from("Date").style(bold),
            Cell::from("Name").style(bold),
            Cell::from("Type").style(bold),
            Cell::from("Description").style(bold),
        ]);

        let offset = (u64::from(page.current_page.max(1)) - 1) * crate::calc::PAGE_SIZE;
        let rows: Vec<Row> = records
            .iter()
            .enumerate()
            .map(|(i, h)| {
                Row::new(vec![
                    Cell::from(format!("{}", offset + i as u64 + 1)),
                    Cell::from(h.date.short()),
                    Cell::from(h.name.clone()),
                    Cell::from(h.types_label()).style(Style::default().fg(Color::Magenta)),
                    Cell::from(h.description().unwrap_or("").to_string())
                        .style(Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();

        let mut table_state = TableState::default();
        table_state.select(Some(self.list_cursor.min(records.len().saturating_sub(1))));

        let border_style = if self.focus == Focus::Results {
            Style::default().fg(ACCENT)
        } else {
            Style::default()
        };
        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Length(14),
                Constraint::Length(32),
                Constraint::Length(24),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(match self.coordinator.criteria().search_text() {
                    Some(q) => format!(" Holidays matching \"{}\" ({}) ", q, page.total_count),
                    None => format!(" Holidays ({}) ", page.total_count),
                }),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        f.render_stateful_widget(table, area, &mut table_state);
    }

    fn render_hints(&self, f: &mut Frame, area: Rect) {
        let text = match (self.detail.is_some(), self.focus) {
            (true, _) => "Esc/Enter=close",
            (false, Focus::Form(_)) => {
                "↑↓=field  ←→=change  type=edit  Enter=search  Tab/Esc=results  Ctrl+C=quit"
            }
            (false, Focus::Results) => {
                "↑↓=move  Enter=details  n/→=next  p/←=prev  r=retry  /=search  Tab=form  q=quit"
            }
        };
        let hints = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(hints, area);
    }
}

// ── Free-standing render helpers ──────────────────────────────────────────────

fn nav_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }
}

fn render_pagination(f: &mut Frame, area: Rect, page: &PageState) {
    let line = Line::from(vec![
        Span::styled("◀ Previous", nav_style(page.has_previous())),
        Span::raw("   "),
        Span::styled(page.page_label(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  ·  "),
        Span::raw(page.showing_label()),
        Span::raw("   "),
        Span::styled("Next ▶", nav_style(page.has_next())),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// A rectangle of `percent_x` by `percent_y` centred in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn detail_lines(record: &HolidayRecord) -> Vec<Line<'static>> {
    let label = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled("Date", label)),
        Line::from(format!("  {}", record.date.long())),
    ];
    if let Some(desc) = record.description() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Description", label)));
        lines.push(Line::from(format!("  {desc}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Type", label)));
    lines.push(Line::from(Span::styled(
        format!("  {}", record.types_label()),
        Style::default().fg(Color::Magenta),
    )));
    if let Some(locations) = record.locations() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Locations", label)));
        lines.push(Line::from(format!("  {locations}")));
    }
    if let Some(states) = &record.states {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("States", label)));
        lines.push(Line::from(format!("  {}", states.display())));
    }
    lines
}

fn render_detail(f: &mut Frame, area: Rect, record: &HolidayRecord) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);
    let p = Paragraph::new(detail_lines(record))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(format!(" {} ", record.name))
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        );
    f.render_widget(p, popup);
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    worker: &FetchWorker,
) -> Result<()> {
    loop {
        for ticket in app.take_tickets() {
            worker.spawn(ticket);
        }
        while let Some(done) = worker.try_next() {
            app.on_completion(done);
        }
        app.on_tick();

        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

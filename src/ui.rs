use anyhow::Result;
use bank_ledger::statement::{format_amount, TIMESTAMP_FORMAT};
use bank_ledger::{Account, AccountKind, Bank, Direction};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use rust_decimal::Decimal;
use std::io;

const OPENED_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Accounts,
    Ledger,
    Statement,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Accounts => Page::Ledger,
            Page::Ledger => Page::Statement,
            Page::Statement => Page::Accounts,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Accounts => Page::Statement,
            Page::Ledger => Page::Accounts,
            Page::Statement => Page::Ledger,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Accounts => "Accounts",
            Page::Ledger => "Ledger",
            Page::Statement => "Statement",
        }
    }
}

pub struct App {
    pub bank: Bank,
    pub account_numbers: Vec<u32>,
    pub state: TableState,
    pub ledger_state: TableState,
    pub current_page: Page,
    /// Feedback from the last action, shown in the status bar
    pub message: Option<String>,
}

impl App {
    pub fn new(bank: Bank) -> Self {
        let account_numbers = bank.account_numbers();

        let mut state = TableState::default();
        if !account_numbers.is_empty() {
            state.select(Some(0));
        }

        let mut app = Self {
            bank,
            account_numbers,
            state,
            ledger_state: TableState::default(),
            current_page: Page::Accounts,
            message: None,
        };
        app.reset_ledger_selection();
        app
    }

    pub fn selected_account(&self) -> Option<&Account> {
        self.state
            .selected()
            .and_then(|i| self.account_numbers.get(i))
            .and_then(|number| self.bank.account(*number).ok())
    }

    fn reset_ledger_selection(&mut self) {
        let has_entries = self
            .selected_account()
            .map(|a| !a.ledger().is_empty())
            .unwrap_or(false);
        self.ledger_state.select(if has_entries { Some(0) } else { None });
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    fn ledger_len(&self) -> usize {
        self.selected_account().map(|a| a.ledger().len()).unwrap_or(0)
    }

    /// Move down one row on the current page, wrapping at the end
    pub fn next(&mut self) {
        match self.current_page {
            Page::Ledger => {
                let len = self.ledger_len();
                step(&mut self.ledger_state, len, true);
            }
            _ => {
                let len = self.account_numbers.len();
                step(&mut self.state, len, true);
                self.reset_ledger_selection();
            }
        }
    }

    pub fn previous(&mut self) {
        match self.current_page {
            Page::Ledger => {
                let len = self.ledger_len();
                step(&mut self.ledger_state, len, false);
            }
            _ => {
                let len = self.account_numbers.len();
                step(&mut self.state, len, false);
                self.reset_ledger_selection();
            }
        }
    }

    /// Credit a month of interest to the selected account
    pub fn accrue_selected_interest(&mut self) {
        let Some(number) = self.state.selected().and_then(|i| self.account_numbers.get(i).copied()) else {
            return;
        };

        self.message = Some(match self.bank.accrue_monthly_interest(number) {
            Ok(Some(interest)) => format!("Account {}: interest R$ {} credited", number, format_amount(interest)),
            Ok(None) => format!("Account {}: no interest to credit", number),
            Err(e) => e.to_string(),
        });
        self.reset_ledger_selection();
    }

    /// Month-end run over every savings account
    pub fn accrue_all_interest(&mut self) {
        let total = self.bank.accrue_interest_all();
        self.message = Some(format!("Interest credited: R$ {}", format_amount(total)));
        self.reset_ledger_selection();
    }

    pub fn stats(&self) -> BankStats {
        let mut stats = BankStats::default();

        for account in self.bank.accounts() {
            match account.kind() {
                AccountKind::Checking { .. } => stats.checking_count += 1,
                AccountKind::Savings => stats.savings_count += 1,
            }
            if account.balance() < Decimal::ZERO {
                stats.overdrawn_count += 1;
            }
            stats.total_balance += account.balance();
        }

        stats
    }
}

fn step(state: &mut TableState, len: usize, forward: bool) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if forward => {
            if i >= len - 1 {
                0
            } else {
                i + 1
            }
        }
        Some(i) => {
            if i == 0 {
                len - 1
            } else {
                i - 1
            }
        }
        None => 0,
    };
    state.select(Some(i));
}

#[derive(Default)]
pub struct BankStats {
    pub checking_count: usize,
    pub savings_count: usize,
    pub overdrawn_count: usize,
    pub total_balance: Decimal,
}

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

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter if app.current_page == Page::Accounts => {
                    app.current_page = Page::Statement;
                }
                KeyCode::Tab => app.next_page(),
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Char('i') => app.accrue_selected_interest(),
                KeyCode::Char('M') => app.accrue_all_interest(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Accounts => render_accounts(f, chunks[1], app),
        Page::Ledger => render_ledger(f, chunks[1], app),
        Page::Statement => render_statement(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();
    let pages = [Page::Accounts, Page::Ledger, Page::Statement];

    let mut tab_spans = vec![Span::styled(
        format!("{} ", app.bank.name()),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("CC {}  CP {}", stats.checking_count, stats.savings_count),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Total R$ {}", format_amount(stats.total_balance)),
        Style::default().fg(Color::Green),
    ));
    if stats.overdrawn_count > 0 {
        tab_spans.push(Span::raw("  "));
        tab_spans.push(Span::styled(
            format!("↓ {} overdrawn", stats.overdrawn_count),
            Style::default().fg(Color::Red),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn render_accounts(f: &mut Frame, area: Rect, app: &mut App) {
    let rows: Vec<Row> = app
        .bank
        .accounts()
        .map(|account| {
            let color = if account.balance() < Decimal::ZERO {
                Color::Red
            } else {
                Color::Green
            };

            Row::new(vec![
                Cell::from(account.number().to_string()),
                Cell::from(truncate(account.owner().name(), 24)),
                Cell::from(account.owner().formatted_cpf()),
                Cell::from(account.type_label()),
                Cell::from(format_amount(account.balance())).style(Style::default().fg(color)),
                Cell::from(format_amount(account.available_funds())),
                Cell::from(account.opened_at().format(OPENED_FORMAT).to_string()),
            ])
            .height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(26),
            Constraint::Length(16),
            Constraint::Length(28),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
    )
    .header(header_row(&["Number", "Holder", "CPF", "Type", "Balance", "Available", "Opened"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Accounts "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_ledger(f: &mut Frame, area: Rect, app: &mut App) {
    let (title, rows): (String, Vec<Row>) = match app.selected_account() {
        Some(account) => (
            format!(" Ledger - account {} ", account.number()),
            account
                .sorted_entries()
                .into_iter()
                .map(|entry| {
                    let color = match entry.direction {
                        Direction::Credit => Color::Green,
                        Direction::Debit => Color::Red,
                    };
                    Row::new(vec![
                        Cell::from(entry.timestamp.format(TIMESTAMP_FORMAT).to_string()),
                        Cell::from(entry.direction.code().to_string()).style(Style::default().fg(color)),
                        Cell::from(truncate(&entry.description, 34)),
                        Cell::from(format_amount(entry.amount)).style(Style::default().fg(color)),
                    ])
                    .height(1)
                })
                .collect(),
        ),
        None => (" Ledger ".to_string(), Vec::new()),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(21),
            Constraint::Length(4),
            Constraint::Length(36),
            Constraint::Length(14),
        ],
    )
    .header(header_row(&["Date", "C/D", "Description", "Amount"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.ledger_state);
}

fn render_statement(f: &mut Frame, area: Rect, app: &App) {
    let text: Vec<Line> = match app.selected_account() {
        Some(account) => account
            .statement()
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect(),
        None => vec![Line::from("  No account selected")],
    };

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Statement "),
    );

    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = Vec::new();

    if let Some(message) = &app.message {
        status_spans.push(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" | "));
    }

    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("i", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Interest | "));
    status_spans.push(Span::styled("M", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Month-end | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

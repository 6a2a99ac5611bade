use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthStr;

use crate::config::AppConfig;
use crate::error::Result;
use crate::fetch::{spawn_fetch, FetchState};
use crate::model::Coin;
use crate::ui::icons::IconResolver;
use crate::ui::TerminalGuard;
use crate::utils::{format_percent, format_usd_price};
use crate::view::{derive_view, SortField, SortSpec};

/// Keys bound to the sort controls, in header order.
const SORT_KEYS: [(char, SortField); 4] = [
    ('1', SortField::Rank),
    ('2', SortField::Name),
    ('3', SortField::Price),
    ('4', SortField::Change24h),
];

struct DashboardState {
    fetch: FetchState,
    fetched_at: Option<DateTime<Local>>,
    search: String,
    editing_search: bool,
    sort: SortSpec,
}

/// Fetch the listings once through the proxy, then drive the interactive
/// table until the user quits. No further network traffic after the fetch.
pub async fn run_dashboard(config: AppConfig) -> Result<()> {
    let mut handle = Some(spawn_fetch(config.proxy_url.clone()));

    let mut guard = TerminalGuard::new()?;
    let mut icons = IconResolver::new(&config.icons_dir);
    let mut state = DashboardState {
        fetch: FetchState::Loading,
        fetched_at: None,
        search: String::new(),
        editing_search: false,
        sort: SortSpec::new(),
    };

    loop {
        // Apply the fetch result exactly once. Quitting earlier just drops
        // the handle; the result is never applied to a torn-down view.
        if handle.as_ref().map(|h| h.is_finished()).unwrap_or(false) {
            if let Some(finished) = handle.take() {
                state.fetch = FetchState::from_outcome(finished.await);
                state.fetched_at = Some(Local::now());
            }
        }

        guard.terminal_mut().draw(|f| draw(f, &state, &mut icons))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if handle_key(key, &mut state) {
                    guard.restore()?;
                    return Ok(());
                }
            }
        }
    }
}

/// Returns true when the user asked to quit.
fn handle_key(key: KeyEvent, state: &mut DashboardState) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.editing_search {
        match key.code {
            KeyCode::Esc => {
                state.search.clear();
                state.editing_search = false;
            }
            KeyCode::Enter => state.editing_search = false,
            KeyCode::Backspace => {
                state.search.pop();
            }
            KeyCode::Char(c) => state.search.push(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('/') => {
            if matches!(state.fetch, FetchState::Ready(_)) {
                state.editing_search = true;
            }
        }
        KeyCode::Char(c) => {
            // Sort controls are hidden and inert while a search is active;
            // the sort spec is kept and reapplies once the search clears.
            if state.search.is_empty() && matches!(state.fetch, FetchState::Ready(_)) {
                if let Some((_, field)) = SORT_KEYS.iter().find(|(k, _)| *k == c) {
                    state.sort.select(*field);
                }
            }
        }
        _ => {}
    }

    false
}

fn draw(f: &mut Frame, state: &DashboardState, icons: &mut IconResolver) {
    match &state.fetch {
        FetchState::Loading => draw_message(f, "Loading...", Color::White),
        FetchState::Error(message) => draw_message(f, message, Color::Red),
        FetchState::Ready(coins) => {
            let rows = derive_view(coins, &state.search, state.sort);
            draw_table(f, state, icons, &rows);
        }
    }
}

fn draw_message(f: &mut Frame, message: &str, color: Color) {
    let area = centered_rect(60, 20, f.size());
    let block = Block::default().borders(Borders::ALL).title("Coin Tracker");
    f.render_widget(Clear, area);
    f.render_widget(block.clone(), area);

    let inner = block.inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new("q to quit")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        chunks[1],
    );
}

fn draw_table(f: &mut Frame, state: &DashboardState, icons: &mut IconResolver, rows: &[&Coin]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.size());

    let title = Paragraph::new("Coin Tracker\nTrack your favourite crypto assets")
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(title, chunks[0]);

    let search_line = if state.editing_search {
        format!("Search: {}▏", state.search)
    } else if state.search.is_empty() {
        String::new()
    } else {
        format!("Search: {}", state.search)
    };
    f.render_widget(
        Paragraph::new(search_line).style(Style::default().fg(Color::Yellow)),
        chunks[1],
    );

    let searching = !state.search.is_empty();

    let sort_cell = |field: SortField| -> Cell {
        let mut content = field.label().to_string();
        if !searching && field == state.sort.field {
            content.push(' ');
            content.push_str(state.sort.direction_icon());
            Cell::from(content).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Cell::from(content).style(Style::default().fg(Color::Yellow))
        }
    };

    // The icon column sits between rank and name and is never a sort target.
    let header = Row::new(vec![
        sort_cell(SortField::Rank),
        Cell::from(""),
        sort_cell(SortField::Name),
        sort_cell(SortField::Price),
        sort_cell(SortField::Change24h),
    ]);

    let body_rows: Vec<Row> = rows
        .iter()
        .map(|coin| {
            let change = coin.change_24h();
            let change_style = if change >= 0.0 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };

            Row::new(vec![
                Cell::from(coin.cmc_rank.to_string()).style(Style::default().fg(Color::Gray)),
                Cell::from(icons.resolve(&coin.symbol)),
                Cell::from(Line::from(vec![
                    Span::raw(coin.name.clone()),
                    Span::styled(
                        format!(" {}", coin.symbol),
                        Style::default().fg(Color::Gray),
                    ),
                ])),
                Cell::from(format_usd_price(coin.price())),
                Cell::from(format_percent(change)).style(change_style),
            ])
        })
        .collect();

    let name_data_width = rows
        .iter()
        .map(|coin| UnicodeWidthStr::width(coin.name.as_str()) + coin.symbol.len() + 1)
        .max()
        .unwrap_or(0);
    let name_col_width = u16::try_from(name_data_width.max(8) + 2).unwrap_or(u16::MAX);

    let widths = vec![
        Constraint::Length(6),
        Constraint::Length(3),
        Constraint::Length(name_col_width),
        Constraint::Length(16),
        Constraint::Length(10),
    ];

    let table = Table::new(body_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Top coins ({} rows)", rows.len())),
        )
        .column_spacing(1);
    f.render_widget(table, chunks[2]);

    f.render_widget(
        Paragraph::new(footer_text(state, rows.len())).style(Style::default().fg(Color::Gray)),
        chunks[3],
    );
}

fn footer_text(state: &DashboardState, visible: usize) -> String {
    if state.editing_search {
        return "Type to filter by name • Enter apply • Esc clear".to_string();
    }

    let fetched = state
        .fetched_at
        .map(|ts| ts.format("%H:%M").to_string())
        .unwrap_or_default();

    if state.search.is_empty() {
        format!(
            "{} rows • fetched {} • Sort: {} {} • 1/2/3/4 sort • / search • q quit",
            visible,
            fetched,
            state.sort.field.label(),
            state.sort.direction_icon()
        )
    } else {
        format!(
            "{} rows • fetched {} • / edit search • q quit",
            visible, fetched
        )
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
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

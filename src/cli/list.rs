use anyhow::Result;
use crossterm::{
    event::KeyCode,
    style::{Attribute, SetAttribute},
    ExecutableCommand,
};
use std::io;

use crate::api::HrApi;
use crate::cli::display::{
    print_company, print_departments, print_employee, print_error_banners,
};
use crate::cli::fail_on_errors;
use crate::cli::ui::{
    clear_screen, read_key, selection_prefix, show_help, term_size, text_input, truncate,
    visible_lines, wait_for_key, StatusBar,
};
use crate::models::{DirectoryRow, Provider};
use crate::session::Session;
use crate::table::{activate, Column, TableState};

/// Placeholder row for an empty projection
pub const NOTHING_FOUND: &str = "Nothing found";

/// Lines taken by everything except table rows
const RESERVED_LINES: usize = 7;

/// What the operator asked for when leaving the directory view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    ChangeProvider,
    Quit,
}

/// Column layout based on terminal width
struct ColumnLayout {
    name_width: usize,
    department_width: usize,
    status_width: usize,
    show_manager: bool,
}

impl ColumnLayout {
    fn for_width(width: usize) -> Self {
        if width >= 100 {
            ColumnLayout {
                name_width: 16,
                department_width: 22,
                status_width: 10,
                show_manager: true,
            }
        } else {
            ColumnLayout {
                name_width: 14,
                department_width: width.saturating_sub(2 + 14 * 2 + 10 + 8).clamp(10, 24),
                status_width: 10,
                show_manager: false,
            }
        }
    }

    fn columns(&self) -> &'static [Column] {
        if self.show_manager {
            Column::ALL
        } else {
            &Column::ALL[..4]
        }
    }

    /// Column bound to a digit key. Hidden columns have no key.
    fn sort_column_for_key(&self, key: char) -> Option<Column> {
        let index = key.to_digit(10)?.checked_sub(1)? as usize;
        self.columns().get(index).copied()
    }

    fn sort_keys(&self) -> &'static str {
        if self.show_manager {
            "1-5"
        } else {
            "1-4"
        }
    }

    fn width(&self, column: Column) -> usize {
        match column {
            Column::FirstName | Column::LastName | Column::Manager => self.name_width,
            Column::Department => self.department_width,
            Column::Status => self.status_width,
        }
    }

    fn format(&self, cells: &[(Column, String)]) -> String {
        let mut line = String::new();
        for (i, (column, text)) in cells.iter().enumerate() {
            let width = self.width(*column);
            let cell = truncate(text, width);
            if i + 1 == cells.len() {
                line.push_str(&cell);
            } else {
                line.push_str(&format!("{:<width$}  ", cell, width = width));
            }
        }
        line
    }

    fn header(&self, state: &TableState) -> String {
        let cells: Vec<(Column, String)> = self
            .columns()
            .iter()
            .map(|&column| {
                let marker = match (state.sort_by == Some(column), state.reversed) {
                    (true, false) => " ↑",
                    (true, true) => " ↓",
                    (false, _) => "",
                };
                (column, format!("{}{}", column.header(), marker))
            })
            .collect();
        self.format(&cells)
    }

    fn row(&self, row: &DirectoryRow) -> String {
        let cells: Vec<(Column, String)> = self
            .columns()
            .iter()
            .map(|&column| (column, cell_text(row, column).to_string()))
            .collect();
        self.format(&cells)
    }
}

/// Displayed cell text. Absent values are left blank.
fn cell_text(row: &DirectoryRow, column: Column) -> &str {
    match column {
        Column::Status => row.status_label(),
        _ => column.text(row),
    }
}

/// Table lines for a projection: header, then rows or the placeholder.
pub fn table_lines(rows: &[&DirectoryRow], state: &TableState, width: usize) -> Vec<String> {
    let layout = ColumnLayout::for_width(width);
    let mut lines = vec![format!("  {}", layout.header(state))];
    if rows.is_empty() {
        lines.push(format!("  {}", NOTHING_FOUND));
    } else {
        lines.extend(rows.iter().map(|row| format!("  {}", layout.row(row))));
    }
    lines
}

/// Print a projection of the directory without interaction
pub fn print_directory(rows: &[DirectoryRow], state: &TableState) {
    let projected = state.project(rows);
    let (width, _) = term_size();
    for line in table_lines(&projected, state, width) {
        println!("{}", line);
    }
    if !state.search.trim().is_empty() {
        println!("\n{} of {} match '{}'", projected.len(), rows.len(), state.search.trim());
    }
}

/// Execute the directory command
pub fn run_directory<A: HrApi>(
    session: &mut Session<A>,
    provider: Provider,
    search: Option<String>,
    sort: Option<Column>,
    descending: bool,
) -> Result<()> {
    if let Ok((ticket, token)) = session.open_provider(provider) {
        session.fetch_directory(ticket, &token);
    }

    if let Some(rows) = session.directory() {
        let state = TableState {
            sort_by: sort,
            reversed: sort.is_some() && descending,
            search: search.unwrap_or_default(),
        };
        print_directory(rows, &state);
    }

    fail_on_errors(session)
}

fn print_row_line(line: &str, selected: bool) {
    if selected {
        let mut stdout = io::stdout();
        let _ = stdout.execute(SetAttribute(Attribute::Reverse));
        print!("{}{}", selection_prefix(true), line);
        let _ = stdout.execute(SetAttribute(Attribute::Reset));
        println!();
    } else {
        println!("{}{}", selection_prefix(false), line);
    }
}

/// Interactive directory table for the selected provider.
///
/// Search and sort re-project the loaded rows; Enter fetches the highlighted
/// employee's detail.
pub fn run_directory_view<A: HrApi>(session: &mut Session<A>) -> Result<Exit> {
    let mut state = TableState::default();
    let mut cursor: usize = 0;
    let mut scroll: usize = 0;

    loop {
        clear_screen()?;
        let visible = visible_lines(RESERVED_LINES + session.errors().len());
        let (width, _) = term_size();
        let layout = ColumnLayout::for_width(width.saturating_sub(2));

        let title = match (session.selected_provider(), session.company()) {
            (Some(provider), Some(company)) => format!("{}: {}", provider.label(), company.legal_name),
            (Some(provider), None) => provider.label().to_string(),
            (None, _) => "No provider".to_string(),
        };
        println!("{}\n", title);
        print_error_banners(session.errors());

        let (selected_key, total) = match session.directory() {
            Some(rows) => {
                let projected = state.project(rows);
                cursor = cursor.min(projected.len().saturating_sub(1));
                if cursor < scroll {
                    scroll = cursor;
                } else if cursor >= scroll + visible {
                    scroll = cursor + 1 - visible;
                }

                println!("  {}", layout.header(&state));
                if projected.is_empty() {
                    println!("  {}", NOTHING_FOUND);
                }
                for (i, row) in projected.iter().enumerate().skip(scroll).take(visible) {
                    print_row_line(&layout.row(row), i == cursor);
                }

                (activate(&projected, cursor).map(str::to_string), projected.len())
            }
            None => {
                println!("  Directory not available.");
                (None, 0)
            }
        };

        let search_hint = if state.search.is_empty() {
            String::new()
        } else {
            format!("  search: {}", state.search)
        };
        let bar = StatusBar::new()
            .counter(if total == 0 { 0 } else { cursor + 1 }, total)
            .action("/", "search")
            .action(layout.sort_keys(), "sort")
            .action("c", "ompany")
            .action("d", "epts")
            .action("x", "dismiss")
            .action("p", "rovider")
            .separator()
            .action("?", "")
            .action("q", "");
        println!("\n{}{}", bar.render(), search_hint);

        match read_key()? {
            KeyCode::Down | KeyCode::Char('j') => {
                if cursor + 1 < total {
                    cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                cursor = cursor.saturating_sub(1);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                cursor = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                cursor = total.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(key) = selected_key {
                    show_employee(session, &key)?;
                }
            }
            KeyCode::Char('/') => {
                if let Some(query) = text_input("search: ", Some(&state.search))? {
                    state.set_search(query);
                    cursor = 0;
                    scroll = 0;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(column) = layout.sort_column_for_key(c) {
                    state.click(column);
                }
            }
            KeyCode::Char('c') => show_company(session)?,
            KeyCode::Char('d') => show_departments(session)?,
            KeyCode::Char('x') => {
                if let Some(id) = session.errors().oldest().map(|e| e.id) {
                    session.dismiss_error(id);
                }
            }
            KeyCode::Char('p') => return Ok(Exit::ChangeProvider),
            KeyCode::Char('?') => show_help("directory")?,
            KeyCode::Esc | KeyCode::Char('q') => return Ok(Exit::Quit),
            _ => {}
        }
    }
}

fn show_employee<A: HrApi>(session: &mut Session<A>, key: &str) -> Result<()> {
    clear_screen()?;
    let opened = session.select_employee(Some(key));

    clear_screen()?;
    print_error_banners(session.errors());
    match session.employee() {
        Some(detail) if opened => print_employee(detail),
        _ => println!("Employee details not available."),
    }
    println!("\n[enter] back");
    wait_for_key()?;

    session.close_employee();
    Ok(())
}

fn show_company<A: HrApi>(session: &Session<A>) -> Result<()> {
    clear_screen()?;
    match session.company() {
        Some(company) => print_company(company),
        None => println!("Company profile not available."),
    }
    println!("\n[enter] back");
    wait_for_key()
}

fn show_departments<A: HrApi>(session: &Session<A>) -> Result<()> {
    clear_screen()?;
    match session.company() {
        Some(company) => {
            println!("DEPARTMENTS\n");
            print_departments(company);
        }
        None => println!("Company profile not available."),
    }
    println!("\n[enter] back");
    wait_for_key()
}

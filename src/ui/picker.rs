use crate::error::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Constraint,
    style::{Modifier, Style},
    widgets::{Block, Borders, Row, Table, TableState},
    Terminal,
};
use std::io;

/// A table column: title plus the content width accumulated by the
/// config-file registries.
#[derive(Debug, Clone)]
pub struct Column {
    pub title: String,
    pub width: usize,
}

impl Column {
    pub fn new(title: impl Into<String>, width: usize) -> Self {
        Column {
            title: title.into(),
            width,
        }
    }
}

/// Full-screen single-select table. Enter confirms, q/Esc/Ctrl-C cancel.
pub struct TablePicker {
    title: String,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl TablePicker {
    pub fn new(title: impl Into<String>, columns: Vec<Column>, rows: Vec<Vec<String>>) -> Self {
        TablePicker {
            title: title.into(),
            columns,
            rows,
        }
    }

    /// Run the picker and return the selected row index, or `None` if
    /// the user cancelled. An empty row set cancels immediately.
    pub fn pick(&self) -> Result<Option<usize>> {
        if self.rows.is_empty() {
            return Ok(None);
        }

        enable_raw_mode()?;
        let mut stderr = io::stderr();
        execute!(stderr, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn run_event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    ) -> Result<Option<usize>> {
        let mut state = TableState::default();
        state.select(Some(0));

        loop {
            terminal.draw(|frame| {
                let widths: Vec<Constraint> = self
                    .columns
                    .iter()
                    .map(|c| Constraint::Length(c.width.max(c.title.len()) as u16))
                    .collect();
                let header = Row::new(self.columns.iter().map(|c| c.title.clone()))
                    .style(Style::default().add_modifier(Modifier::BOLD));
                let rows = self.rows.iter().map(|cells| Row::new(cells.clone()));

                let table = Table::new(rows, widths)
                    .header(header)
                    .block(Block::default().borders(Borders::ALL).title(self.title.clone()))
                    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                    .highlight_symbol("> ")
                    .column_spacing(2);

                frame.render_stateful_widget(table, frame.area(), &mut state);
            })?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    return Ok(None);
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                    KeyCode::Enter => return Ok(state.selected()),
                    KeyCode::Down | KeyCode::Char('j') => {
                        let i = state.selected().unwrap_or(0);
                        state.select(Some((i + 1).min(self.rows.len() - 1)));
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        let i = state.selected().unwrap_or(0);
                        state.select(Some(i.saturating_sub(1)));
                    }
                    KeyCode::Home => state.select(Some(0)),
                    KeyCode::End => state.select(Some(self.rows.len() - 1)),
                    _ => {}
                }
            }
        }
    }
}

//! Panels drawn by [`super::UiApp`]

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Row, Table};
use ratatui::Frame;

use super::{Phase, Progress};
use crate::writer::LoadStats;

const MAX_LOG_ENTRIES: usize = 200;

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Blue))
}

pub struct StatusPanel {
    pub phase: Phase,
    pub info: String,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self {
            phase: Phase::Preparing,
            info: String::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (marker, color) = match self.phase {
            Phase::Converting => ("⇄", Color::Magenta),
            Phase::Preparing => ("…", Color::Yellow),
            Phase::Loading => ("⚙", Color::Cyan),
            Phase::Complete => ("✓", Color::Green),
        };
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {} ", marker), style),
                Span::styled(self.phase.to_string(), style),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!("   {}", self.info),
                Style::default().fg(Color::Gray),
            )),
        ];

        frame.render_widget(Paragraph::new(lines).block(panel(" Cardlist to SQLite ")), area);
    }
}

/// Record gauge for the dataset being loaded
#[derive(Default)]
pub struct ProgressPanel {
    pub current: Option<Progress>,
}

impl ProgressPanel {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::Blue));

        let Some(progress) = &self.current else {
            frame.render_widget(block, area);
            return;
        };

        let label = format!(
            "{}: {}/{} records",
            progress.label, progress.current, progress.total
        );
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .ratio(progress.ratio())
            .label(label);

        frame.render_widget(gauge, area);
    }
}

/// One row per committed dataset
#[derive(Default)]
pub struct DatasetPanel {
    pub rows: Vec<LoadStats>,
}

impl DatasetPanel {
    /// Header, rows and borders
    pub fn height(&self) -> u16 {
        (self.rows.len() as u16).saturating_add(3)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(["Dataset", "Table", "Read", "Inserted", "Skipped"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.rows.iter().map(|s| {
            Row::new([
                s.tag.clone(),
                s.table.clone(),
                s.read.to_string(),
                s.inserted.to_string(),
                s.skipped.to_string(),
            ])
        });

        let widths = [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(panel(" Datasets "));

        frame.render_widget(table, area);
    }
}

pub struct LogPanel {
    entries: Vec<String>,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
        if self.entries.len() > MAX_LOG_ENTRIES {
            self.entries.remove(0);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        // Newest entries at the bottom
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.entries.len().saturating_sub(visible);
        let last = self.entries.len().saturating_sub(1);

        let items: Vec<ListItem> = self.entries[start..]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let color = if start + i == last {
                    Color::White
                } else {
                    Color::DarkGray
                };
                ListItem::new(Span::styled(format!(" {}", entry), Style::default().fg(color)))
            })
            .collect();

        frame.render_widget(List::new(items).block(panel(" Activity ")), area);
    }
}

//! Progress reporting for a load run.
//!
//! The loader talks to a [`Ui`]. [`SilentUi`] discards everything and is the
//! default, so a plain run prints nothing. [`UiApp`] is a ratatui screen
//! with the current phase, a record gauge, finished datasets and a log.

mod components;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

use crate::writer::LoadStats;
use components::{DatasetPanel, LogPanel, ProgressPanel, StatusPanel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Converting,
    Preparing,
    Loading,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Converting => write!(f, "Converting XML dumps"),
            Phase::Preparing => write!(f, "Preparing datasets"),
            Phase::Loading => write!(f, "Loading cards"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Records processed out of the line count of the current input file
#[derive(Debug, Clone, Default)]
pub struct Progress {
    pub current: u64,
    pub total: u64,
    pub label: String,
}

impl Progress {
    pub fn new(current: u64, total: u64, label: impl Into<String>) -> Self {
        Self {
            current,
            total,
            label: label.into(),
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64).min(1.0)
        }
    }
}

pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_info(&mut self, info: impl Into<String>);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);

    /// Called once per dataset after its transaction commits
    fn dataset_loaded(&mut self, stats: &LoadStats) {
        self.log(stats.to_string());
    }
}

pub struct UiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    status: StatusPanel,
    progress: ProgressPanel,
    datasets: DatasetPanel,
    log: LogPanel,
}

impl UiApp {
    /// Switch to the alternate screen and take over the terminal
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            status: StatusPanel::new(),
            progress: ProgressPanel::default(),
            datasets: DatasetPanel::default(),
            log: LogPanel::new(),
        })
    }

    fn draw(&mut self) -> Result<()> {
        let Self {
            terminal,
            status,
            progress,
            datasets,
            log,
        } = self;

        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Length(3),
                    Constraint::Length(datasets.height()),
                    Constraint::Min(4),
                ])
                .split(frame.area());

            status.render(frame, chunks[0]);
            progress.render(frame, chunks[1]);
            datasets.render(frame, chunks[2]);
            log.render(frame, chunks[3]);
        })?;

        Ok(())
    }

    /// Show the summary, wait for a key, then hand the terminal back
    pub fn finish(mut self, summary: &str) -> Result<()> {
        self.set_phase(Phase::Complete);
        self.clear_progress();
        self.log(summary);
        self.log("Press any key to exit...");

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let CrosstermEvent::Key(_) = event::read()? {
                    break;
                }
            }
        }

        self.restore()
    }

    /// Hand the terminal back without waiting
    pub fn restore(mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Ui for UiApp {
    fn set_phase(&mut self, phase: Phase) {
        self.status.phase = phase;
        self.draw().ok();
    }

    fn set_info(&mut self, info: impl Into<String>) {
        self.status.info = info.into();
        self.draw().ok();
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        self.progress.current = Some(Progress::new(current, total, label));
        self.draw().ok();
    }

    fn clear_progress(&mut self) {
        self.progress.current = None;
        self.draw().ok();
    }

    fn log(&mut self, message: impl Into<String>) {
        self.log.push(message);
        self.draw().ok();
    }

    fn dataset_loaded(&mut self, stats: &LoadStats) {
        self.datasets.rows.push(stats.clone());
        self.log(format!("{}: committed", stats.tag));
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}

/// Discards all output
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_info(&mut self, _info: impl Into<String>) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
    fn dataset_loaded(&mut self, _stats: &LoadStats) {}
}

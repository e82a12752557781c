use rusqlite::Connection;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::schema_gen::{generate_create_table, generate_insert};
use crate::error::{LoadError, LoadResult};
use crate::parser::parse_row;
use crate::schema::{DatasetConfig, DatasetSpec};
use crate::ui::{Phase, Ui};

const PROGRESS_INTERVAL: u64 = 1000;

/// Counts for one loaded dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStats {
    pub tag: String,
    pub table: String,
    pub read: u64,
    pub inserted: u64,
    /// Records whose id was already in the table
    pub skipped: u64,
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {} read, {} inserted, {} skipped",
            self.tag, self.table, self.read, self.inserted, self.skipped
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub datasets: Vec<LoadStats>,
}

impl RunSummary {
    pub fn total_inserted(&self) -> u64 {
        self.datasets.iter().map(|s| s.inserted).sum()
    }

    pub fn total_skipped(&self) -> u64 {
        self.datasets.iter().map(|s| s.skipped).sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loaded {} datasets: {} inserted, {} skipped",
            self.datasets.len(),
            self.total_inserted(),
            self.total_skipped()
        )
    }
}

pub struct CardWriter {
    conn: Connection,
}

impl CardWriter {
    /// Open (or create) the database. Existing tables and rows are kept.
    pub fn open(db_path: &Path) -> LoadResult<Self> {
        let conn = Connection::open(db_path)?;
        Ok(Self { conn })
    }

    pub fn create_table(&self, table: &str) -> LoadResult<()> {
        self.conn.execute(&generate_create_table(table), [])?;
        Ok(())
    }

    /// Insert every line of `reader` into `spec.table` inside one transaction.
    ///
    /// The first bad record aborts the import and rolls the transaction back.
    pub fn import(
        &mut self,
        spec: &DatasetSpec,
        source: &Path,
        reader: impl BufRead,
        total: u64,
        ui: &mut impl Ui,
    ) -> LoadResult<LoadStats> {
        let mut stats = LoadStats {
            tag: spec.tag.clone(),
            table: spec.table.clone(),
            ..Default::default()
        };

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&generate_insert(&spec.table))?;

            for (idx, line) in reader.lines().enumerate() {
                let line = line.map_err(|source_err| LoadError::Io {
                    path: source.to_path_buf(),
                    source: source_err,
                })?;

                let row = parse_row(&line).map_err(|err| LoadError::Record {
                    dataset: spec.tag.clone(),
                    line: idx + 1,
                    source: err,
                })?;

                for (col, value) in row.into_values().iter().enumerate() {
                    value.bind_to(col + 1, &mut stmt)?;
                }

                stats.read += 1;
                if stmt.raw_execute()? == 0 {
                    stats.skipped += 1;
                } else {
                    stats.inserted += 1;
                }

                if stats.read % PROGRESS_INTERVAL == 0 {
                    ui.set_progress(stats.read, total, spec.tag.as_str());
                }
            }
        }
        tx.commit()?;

        ui.set_progress(stats.read, total, spec.tag.as_str());
        Ok(stats)
    }

    pub fn close(self) -> LoadResult<()> {
        self.conn.close().map_err(|(_, err)| LoadError::Database(err))
    }
}

fn open_input(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => LoadError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })
}

/// Count lines for the progress total
fn count_lines(path: &Path) -> LoadResult<u64> {
    let file = open_input(path)?;
    Ok(BufReader::new(file).lines().count() as u64)
}

/// Load one dataset: create its table if needed, insert new cards, commit
/// and close the connection.
pub fn load_dataset(
    config: &DatasetConfig,
    spec: &DatasetSpec,
    ui: &mut impl Ui,
) -> LoadResult<LoadStats> {
    let input_path = config.input_path(spec);

    // Fail on a missing input before the database is touched
    let file = open_input(&input_path)?;
    let total = count_lines(&input_path)?;

    ui.set_info(format!("{} -> {}", input_path.display(), config.database().display()));
    ui.log(format!("{}: reading {}", spec.tag, input_path.display()));

    let mut writer = CardWriter::open(config.database())?;
    writer.create_table(&spec.table)?;
    let stats = writer.import(spec, &input_path, BufReader::new(file), total, ui)?;
    writer.close()?;

    ui.dataset_loaded(&stats);
    Ok(stats)
}

/// Load every configured dataset in order, stopping at the first error.
pub fn load_datasets(config: &DatasetConfig, ui: &mut impl Ui) -> LoadResult<RunSummary> {
    ui.set_phase(Phase::Preparing);
    ui.log(format!(
        "{} datasets into {}",
        config.datasets().len(),
        config.database().display()
    ));

    ui.set_phase(Phase::Loading);
    let mut summary = RunSummary::default();
    for spec in config.datasets() {
        let stats = load_dataset(config, spec, ui)?;
        summary.datasets.push(stats);
    }
    ui.clear_progress();

    Ok(summary)
}

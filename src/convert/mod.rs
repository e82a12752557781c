//! XML card dumps to the JSONL files the loader reads.
//!
//! `cardlist_<tag>.xml` (or `cardlist_<tag>.xml.gz`) in the data directory is
//! rewritten as `cardlist_<tag>.jsonl` beside it, one card per line.

mod badges;
mod xml;

pub use badges::{leading_int, normalize_awards};
pub use xml::{cards_from_xml, JsonlCard};

use flate2::read::GzDecoder;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, ConvertResult};
use crate::schema::DatasetSpec;
use crate::ui::{Phase, Ui};

const GZIP_EXTENSION: &str = "gz";

/// Result of converting one dump
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertStats {
    pub tag: String,
    pub source: PathBuf,
    pub output: PathBuf,
    pub cards: usize,
}

impl fmt::Display for ConvertStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} cards, {} -> {}",
            self.tag,
            self.cards,
            self.source.display(),
            self.output.display()
        )
    }
}

fn io_error(path: &Path, source: io::Error) -> ConvertError {
    match source.kind() {
        io::ErrorKind::NotFound => ConvertError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => ConvertError::Io {
            path: path.to_path_buf(),
            source,
        },
    }
}

/// Read a dump, decompressing it when the name ends in `.gz`
fn read_input(path: &Path) -> ConvertResult<String> {
    let file = File::open(path).map_err(|err| io_error(path, err))?;

    let mut xml = String::new();
    let read = if path.extension().is_some_and(|ext| ext == GZIP_EXTENSION) {
        GzDecoder::new(file).read_to_string(&mut xml)
    } else {
        io::BufReader::new(file).read_to_string(&mut xml)
    };
    read.map_err(|err| io_error(path, err))?;

    Ok(xml)
}

/// Convert one XML dump into a JSONL file. Lines are joined with `\n`
/// without a trailing newline. Returns the number of cards written.
pub fn convert_file(xml_path: &Path, jsonl_path: &Path) -> ConvertResult<usize> {
    let xml = read_input(xml_path)?;
    let cards = cards_from_xml(&xml)?;

    let lines = cards
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;

    fs::write(jsonl_path, lines.join("\n")).map_err(|err| ConvertError::Io {
        path: jsonl_path.to_path_buf(),
        source: err,
    })?;

    Ok(cards.len())
}

/// The dump for `spec`: plain XML if present, otherwise its gzipped form
pub fn xml_source(data_dir: &Path, spec: &DatasetSpec) -> PathBuf {
    let plain = data_dir.join(spec.xml_file());
    if plain.exists() {
        return plain;
    }

    let mut gz = plain.clone().into_os_string();
    gz.push(".");
    gz.push(GZIP_EXTENSION);
    let gz = PathBuf::from(gz);
    if gz.exists() {
        gz
    } else {
        plain
    }
}

/// Convert every dataset's dump in order, stopping at the first error.
pub fn convert_datasets(
    data_dir: &Path,
    datasets: &[DatasetSpec],
    ui: &mut impl Ui,
) -> ConvertResult<Vec<ConvertStats>> {
    ui.set_phase(Phase::Converting);
    ui.log(format!("{} dumps in {}", datasets.len(), data_dir.display()));

    let mut converted = Vec::with_capacity(datasets.len());
    for (idx, spec) in datasets.iter().enumerate() {
        let source = xml_source(data_dir, spec);
        let output = data_dir.join(&spec.input_file);
        ui.set_info(format!("{} -> {}", source.display(), output.display()));

        let cards = convert_file(&source, &output)?;
        let stats = ConvertStats {
            tag: spec.tag.clone(),
            source,
            output,
            cards,
        };
        ui.log(stats.to_string());
        ui.set_progress(idx as u64 + 1, datasets.len() as u64, spec.tag.as_str());
        converted.push(stats);
    }
    ui.clear_progress();

    Ok(converted)
}

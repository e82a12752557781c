//! Dataset descriptors: which file feeds which table

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{LoadError, LoadResult};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DATABASE: &str = "cardingser.db";
pub const DEFAULT_TAGS: &[&str] = &["S1", "S2", "S3", "S4"];

const INPUT_PREFIX: &str = "cardlist";
const INPUT_EXTENSION: &str = "jsonl";

/// One input file and the table it loads into
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSpec {
    pub tag: String,
    /// Input file, relative to the data directory
    pub input_file: PathBuf,
    pub table: String,
}

impl DatasetSpec {
    pub fn new(
        tag: impl Into<String>,
        input_file: impl Into<PathBuf>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            input_file: input_file.into(),
            table: table.into(),
        }
    }

    /// Standard layout: `cardlist_<tag>.jsonl` into table `<tag>`
    pub fn for_tag(tag: &str) -> Self {
        Self::new(
            tag,
            format!("{}_{}.{}", INPUT_PREFIX, tag, INPUT_EXTENSION),
            tag,
        )
    }

    /// XML dump the input file is converted from, e.g. `cardlist_S1.xml`
    pub fn xml_file(&self) -> PathBuf {
        self.input_file.with_extension("xml")
    }
}

/// The four season datasets, in load order
pub fn default_datasets() -> Vec<DatasetSpec> {
    DEFAULT_TAGS.iter().map(|tag| DatasetSpec::for_tag(tag)).collect()
}

/// Validated set of datasets plus where to read and write them
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    data_dir: PathBuf,
    database: PathBuf,
    datasets: Vec<DatasetSpec>,
}

impl DatasetConfig {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        database: impl Into<PathBuf>,
        datasets: Vec<DatasetSpec>,
    ) -> LoadResult<Self> {
        validate_datasets(&datasets)?;
        Ok(Self {
            data_dir: data_dir.into(),
            database: database.into(),
            datasets,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    pub fn datasets(&self) -> &[DatasetSpec] {
        &self.datasets
    }

    pub fn input_path(&self, spec: &DatasetSpec) -> PathBuf {
        self.data_dir.join(&spec.input_file)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            database: PathBuf::from(DEFAULT_DATABASE),
            datasets: default_datasets(),
        }
    }
}

fn validate_datasets(datasets: &[DatasetSpec]) -> LoadResult<()> {
    if datasets.is_empty() {
        return Err(LoadError::InvalidConfig("no datasets selected".into()));
    }

    let mut tags = HashSet::new();
    let mut tables = HashSet::new();

    for spec in datasets {
        if spec.tag.is_empty() {
            return Err(LoadError::InvalidConfig("empty dataset tag".into()));
        }
        validate_table_name(&spec.table)?;

        if !tags.insert(spec.tag.as_str()) {
            return Err(LoadError::InvalidConfig(format!(
                "duplicate dataset tag `{}`",
                spec.tag
            )));
        }
        // SQLite table names are case-insensitive
        if !tables.insert(spec.table.to_ascii_lowercase()) {
            return Err(LoadError::InvalidConfig(format!(
                "duplicate table `{}`",
                spec.table
            )));
        }
    }

    Ok(())
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
pub fn validate_table_name(name: &str) -> LoadResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if !valid {
        return Err(LoadError::InvalidConfig(format!(
            "`{}` is not a valid table name",
            name
        )));
    }
    if name.to_ascii_lowercase().starts_with("sqlite_") {
        return Err(LoadError::InvalidConfig(format!(
            "`{}` uses the reserved sqlite_ prefix",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_datasets() {
        let datasets = default_datasets();
        assert_eq!(datasets.len(), 4);
        assert_eq!(datasets[0].tag, "S1");
        assert_eq!(datasets[0].table, "S1");
        assert_eq!(datasets[3].input_file, PathBuf::from("cardlist_S4.jsonl"));
    }

    #[test]
    fn test_input_path_joins_data_dir() {
        let config = DatasetConfig::default();
        let spec = &config.datasets()[1];
        assert_eq!(
            config.input_path(spec),
            PathBuf::from("data").join("cardlist_S2.jsonl")
        );
        assert_eq!(config.database(), Path::new("cardingser.db"));
    }

    #[test]
    fn test_xml_file_sits_beside_input() {
        let spec = DatasetSpec::for_tag("S3");
        assert_eq!(spec.xml_file(), PathBuf::from("cardlist_S3.xml"));
    }

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("S1").is_ok());
        assert!(validate_table_name("_season_2").is_ok());
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("1S").is_err());
        assert!(validate_table_name("S1; DROP TABLE S2").is_err());
        assert!(validate_table_name("sqlite_master").is_err());
    }

    #[test]
    fn test_rejects_duplicate_tables() {
        let datasets = vec![
            DatasetSpec::new("a", "a.jsonl", "cards"),
            DatasetSpec::new("b", "b.jsonl", "CARDS"),
        ];
        let err = DatasetConfig::new("data", "out.db", datasets).unwrap_err();
        assert!(err.to_string().contains("duplicate table"));
    }

    #[test]
    fn test_rejects_duplicate_tags() {
        let datasets = vec![DatasetSpec::for_tag("S1"), DatasetSpec::for_tag("S1")];
        let err = DatasetConfig::new("data", "out.db", datasets).unwrap_err();
        assert!(err.to_string().contains("duplicate dataset tag"));
    }

    #[test]
    fn test_rejects_empty_selection() {
        assert!(matches!(
            DatasetConfig::new("data", "out.db", Vec::new()),
            Err(LoadError::InvalidConfig(_))
        ));
    }
}

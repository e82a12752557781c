use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::population::parse_population;
use crate::error::{RecordError, RecordResult};
use crate::schema::required_fields;

/// One card as it appears in a JSONL dump
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "NAME", deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(rename = "TYPE", deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    #[serde(rename = "MOTTO", deserialize_with = "lenient_text")]
    pub motto: Option<String>,
    #[serde(rename = "CATEGORY", deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(rename = "REGION", deserialize_with = "lenient_text")]
    pub region: Option<String>,
    #[serde(rename = "FLAG", deserialize_with = "lenient_text")]
    pub flag: Option<String>,
    #[serde(rename = "CARDCATEGORY", deserialize_with = "lenient_text")]
    pub card_category: Option<String>,
    #[serde(rename = "DESCRIPTION", default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(rename = "BADGES")]
    pub badges: Value,
    #[serde(rename = "TROPHIES")]
    pub trophies: Value,
}

/// A row ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCard {
    pub id: i64,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub motto: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub flag: Option<String>,
    pub card_category: Option<String>,
    pub population: Option<i64>,
    pub description: Option<String>,
    pub badges: String,
    pub trophies: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map(SqlValue::Text).unwrap_or(SqlValue::Null)
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(value: Option<i64>) -> Self {
        value.map(SqlValue::Integer).unwrap_or(SqlValue::Null)
    }
}

impl TryFrom<CardRecord> for StoredCard {
    type Error = RecordError;

    fn try_from(record: CardRecord) -> RecordResult<Self> {
        let population = parse_population(record.description.as_deref())?;

        Ok(Self {
            id: record.id,
            name: record.name,
            kind: record.kind,
            motto: record.motto,
            category: record.category,
            region: record.region,
            flag: record.flag,
            card_category: record.card_category,
            population,
            description: record.description,
            badges: serde_json::to_string(&record.badges)?,
            trophies: serde_json::to_string(&record.trophies)?,
        })
    }
}

impl StoredCard {
    /// Values in the same order as [`crate::schema::CARD_COLUMNS`]
    pub fn into_values(self) -> Vec<SqlValue> {
        vec![
            SqlValue::Integer(self.id),
            self.name.into(),
            self.kind.into(),
            self.motto.into(),
            self.category.into(),
            self.region.into(),
            self.flag.into(),
            self.card_category.into(),
            self.population.into(),
            self.description.into(),
            SqlValue::Text(self.badges),
            SqlValue::Text(self.trophies),
        ]
    }
}

/// Parse a JSON line into a card record
pub fn parse_card(line: &str) -> RecordResult<CardRecord> {
    let json: Value = serde_json::from_str(line)?;

    let obj = json
        .as_object()
        .ok_or_else(|| serde_json::Error::custom("record is not a JSON object"))?;
    if let Some(field) = required_fields().find(|field| !obj.contains_key(*field)) {
        return Err(RecordError::MissingField(field));
    }

    Ok(serde_json::from_value(json)?)
}

/// Parse and transform a JSON line into a row
pub fn parse_row(line: &str) -> RecordResult<StoredCard> {
    StoredCard::try_from(parse_card(line)?)
}

/// Accepts strings and other scalars. Numbers keep their JSON text form,
/// booleans become `1` / `0` the way SQLite stores them in a TEXT column.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(if b { "1" } else { "0" }.to_string())),
        number @ Value::Number(_) => Ok(Some(number.to_string())),
        other => Err(D::Error::custom(format!(
            "expected text, found {}",
            other
        ))),
    }
}

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnType {
    Integer,
    Text,
    /// JSON value stored as text
    Json,
}

impl ColumnType {
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text | ColumnType::Json => "TEXT",
        }
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub col_type: ColumnType,
    pub primary_key: bool,
    /// Key in the source record, `None` for derived columns
    pub json_field: Option<&'static str>,
}

impl Column {
    pub const fn new(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            name,
            col_type,
            primary_key: false,
            json_field: None,
        }
    }

    /// Create the primary key column
    pub const fn primary(name: &'static str, col_type: ColumnType) -> Self {
        Self {
            primary_key: true,
            ..Self::new(name, col_type)
        }
    }

    /// Set the source record key this column is read from
    pub const fn json(self, field: &'static str) -> Self {
        Self {
            json_field: Some(field),
            ..self
        }
    }
}

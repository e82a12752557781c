//! Column layout shared by every card table

use super::types::*;

/// Columns of a card table, in insert order.
pub static CARD_COLUMNS: &[Column] = &[
    Column::primary("id", ColumnType::Integer).json("ID"),
    Column::new("name", ColumnType::Text).json("NAME"),
    Column::new("type", ColumnType::Text).json("TYPE"),
    Column::new("motto", ColumnType::Text).json("MOTTO"),
    Column::new("category", ColumnType::Text).json("CATEGORY"),
    Column::new("region", ColumnType::Text).json("REGION"),
    Column::new("flag", ColumnType::Text).json("FLAG"),
    Column::new("cardcategory", ColumnType::Text).json("CARDCATEGORY"),
    // Derived from the description
    Column::new("population", ColumnType::Integer),
    Column::new("description", ColumnType::Text).json("DESCRIPTION"),
    Column::new("badges", ColumnType::Json).json("BADGES"),
    Column::new("trophies", ColumnType::Json).json("TROPHIES"),
];

/// Source keys that may be left out of a record.
pub const OPTIONAL_FIELDS: &[&str] = &["DESCRIPTION"];

/// Source keys every record must carry
pub fn required_fields() -> impl Iterator<Item = &'static str> {
    CARD_COLUMNS
        .iter()
        .filter_map(|col| col.json_field)
        .filter(|field| !OPTIONAL_FIELDS.contains(field))
}

/// Names of all card columns
pub fn column_names() -> Vec<&'static str> {
    CARD_COLUMNS.iter().map(|col| col.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_skip_description_and_derived() {
        let required: Vec<_> = required_fields().collect();
        assert_eq!(required.len(), 10);
        assert!(required.contains(&"ID"));
        assert!(required.contains(&"TROPHIES"));
        assert!(!required.contains(&"DESCRIPTION"));
    }

    #[test]
    fn test_single_primary_key() {
        let pks: Vec<_> = CARD_COLUMNS.iter().filter(|c| c.primary_key).collect();
        assert_eq!(pks.len(), 1);
        assert_eq!(pks[0].name, "id");
    }
}

use crate::schema::{column_names, CARD_COLUMNS};

/// Generate CREATE TABLE SQL for a card table. Existing tables are kept.
pub fn generate_create_table(table: &str) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS \"{}\" (\n", table);
    let mut columns = Vec::new();

    for col in CARD_COLUMNS {
        columns.push(format!("    {} {}", col.name, col.col_type.sql_type()));
    }

    let pk: Vec<&str> = CARD_COLUMNS
        .iter()
        .filter(|col| col.primary_key)
        .map(|col| col.name)
        .collect();
    columns.push(format!("    PRIMARY KEY ({})", pk.join(", ")));

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate the insert-if-absent statement for a card table
pub fn generate_insert(table: &str) -> String {
    let columns = column_names();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    format!(
        "INSERT OR IGNORE INTO \"{}\" ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    )
}

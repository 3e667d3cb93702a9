//! Remediation hints for "does not exist" database errors.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Placeholder used when the error does not name the owning table.
pub const UNKNOWN_TABLE: &str = "<table>";

/// A suggested schema repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "fix", rename_all = "snake_case")]
pub enum SchemaFix {
    AddColumn {
        table: String,
        column: String,
        statement: String,
    },
    CreateTable {
        table: String,
        hint: String,
    },
}

impl SchemaFix {
    /// One-line rendering for logs and summary output.
    pub fn summary(&self) -> String {
        match self {
            SchemaFix::AddColumn { statement, .. } => {
                format!("{statement} (adjust the data type to the schema)")
            }
            SchemaFix::CreateTable { hint, .. } => hint.clone(),
        }
    }
}

fn column_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"column "([^"]+)"(?: of relation "([^"]+)")? does not exist"#)
            .expect("static regex")
    })
}

fn relation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"relation "([^"]+)" does not exist"#).expect("static regex"))
}

/// Derive a fix from the error text, if it names a missing column or relation.
///
/// Column errors are checked first: Postgres phrases them as
/// `column "x" of relation "y" does not exist`, which also contains a
/// relation clause.
pub fn suggest(error_text: &str) -> Option<SchemaFix> {
    if let Some(caps) = column_re().captures(error_text) {
        let column = caps.get(1)?.as_str().to_string();
        let table = caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_TABLE.to_string());
        let statement = format!("ALTER TABLE {table} ADD COLUMN IF NOT EXISTS {column} TEXT;");
        return Some(SchemaFix::AddColumn {
            table,
            column,
            statement,
        });
    }

    let caps = relation_re().captures(error_text)?;
    let table = caps.get(1)?.as_str().to_string();
    let hint = format!(
        "Create table {table} from its schema definition (schema push or migration) before retrying; requests touching it fail until then"
    );
    Some(SchemaFix::CreateTable { table, hint })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_without_relation_uses_placeholder() {
        let fix = suggest(r#"error: column "workflow_data" does not exist"#).unwrap();
        assert_eq!(
            fix,
            SchemaFix::AddColumn {
                table: UNKNOWN_TABLE.to_string(),
                column: "workflow_data".to_string(),
                statement: "ALTER TABLE <table> ADD COLUMN IF NOT EXISTS workflow_data TEXT;"
                    .to_string(),
            }
        );
    }

    #[test]
    fn column_with_relation_names_the_table() {
        let fix =
            suggest(r#"column "current_workflow_step" of relation "bookings" does not exist"#)
                .unwrap();
        match fix {
            SchemaFix::AddColumn { table, column, .. } => {
                assert_eq!(table, "bookings");
                assert_eq!(column, "current_workflow_step");
            }
            other => panic!("unexpected fix {other:?}"),
        }
    }

    #[test]
    fn missing_relation_suggests_table_creation() {
        let fix = suggest(r#"relation "isrc_codes" does not exist"#).unwrap();
        assert!(matches!(fix, SchemaFix::CreateTable { ref table, .. } if table == "isrc_codes"));
        assert!(fix.summary().contains("isrc_codes"));
    }

    #[test]
    fn unrelated_text_has_no_fix() {
        assert_eq!(suggest("Access token required"), None);
    }
}

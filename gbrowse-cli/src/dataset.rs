//! JSON dataset files.
//!
//! A dataset names its columns and either lists its rows inline or points
//! at a SQLite database:
//!
//! ```json
//! {
//!   "columns": ["Id", {"name": "Name", "search": "name", "order": "name", "quickjump": "name"}],
//!   "default_order": [["Name", "asc"]],
//!   "rows": [[1, "Alice"], [2, {"value": "<b>Bob</b>", "order_value": "bob"}]]
//! }
//! ```

use std::path::Path;

use gbrowse_lib::model::Cell;
use gbrowse_lib::model::Column;
use gbrowse_lib::model::RichCell;
use gbrowse_lib::model::Width;
use gbrowse_lib::order::Direction;
use gbrowse_lib::query::QueryTemplate;
use serde::Deserialize;
use serde_json::Value;

use crate::error::CliError;

#[derive(Debug, Deserialize)]
pub struct Dataset {
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub default_order: Vec<(String, String)>,
    #[serde(default)]
    pub per_page: Option<usize>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub query: Option<QuerySpec>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    Name(String),
    Full {
        name: String,
        search: Option<String>,
        order: Option<String>,
        order_pattern: Option<String>,
        quickjump: Option<String>,
        hint: Option<String>,
        width: Option<u32>,
        #[serde(default)]
        hidden: bool,
    },
}

/// Rows fetched from a SQLite database, paged by the browser.
#[derive(Debug, Deserialize)]
pub struct QuerySpec {
    /// Relative to the dataset file.
    pub database: String,
    pub select: String,
    pub count: String,
    pub forced_order: Option<String>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn columns(&self) -> Vec<Column> {
        self.columns.iter().map(ColumnSpec::to_column).collect()
    }

    pub fn default_order(&self) -> Result<Vec<(&str, Direction)>, CliError> {
        self.default_order
            .iter()
            .map(|(label, direction)| {
                Direction::parse(direction)
                    .map(|d| (label.as_str(), d))
                    .ok_or_else(|| CliError::usage(format!("invalid direction '{}'", direction)))
            })
            .collect()
    }

    pub fn rows(&self) -> Result<Vec<Vec<Cell>>, CliError> {
        self.rows
            .iter()
            .map(|row| row.iter().map(cell_from_json).collect::<Result<Vec<_>, _>>())
            .collect()
    }

    pub fn template(&self) -> Option<QueryTemplate> {
        self.query.as_ref().map(|query| {
            let template = QueryTemplate::new(&query.select, &query.count);
            match &query.forced_order {
                Some(order) => template.forced_order(order),
                None => template,
            }
        })
    }
}

impl ColumnSpec {
    fn to_column(&self) -> Column {
        match self {
            ColumnSpec::Name(name) => Column::new(name),
            ColumnSpec::Full {
                name,
                search,
                order,
                order_pattern,
                quickjump,
                hint,
                width,
                hidden,
            } => {
                let mut column = Column::new(name);
                if let Some(key) = search {
                    column = column.search(key);
                }
                if let Some(key) = order {
                    column = column.order(key);
                }
                if let Some(pattern) = order_pattern {
                    column = column.order_pattern(pattern);
                }
                if let Some(key) = quickjump {
                    column = column.quickjump(key);
                }
                if let Some(hint) = hint {
                    column = column.hint(hint);
                }
                if let Some(width) = width {
                    column = column.width(Width::Fixed(*width));
                }
                if *hidden {
                    column = column.hidden();
                }
                column
            }
        }
    }
}

fn cell_from_json(value: &Value) -> Result<Cell, CliError> {
    Ok(match value {
        Value::Null => Cell::from(""),
        Value::String(s) => Cell::from(s.as_str()),
        Value::Number(n) => Cell::from(n.to_string()),
        Value::Bool(b) => Cell::from(b.to_string()),
        Value::Object(_) => Cell::from(serde_json::from_value::<RichCell>(value.clone())?),
        Value::Array(_) => return Err(CliError::usage("nested arrays are not cells")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset() {
        let dataset: Dataset = serde_json::from_str(
            r#"{
                "columns": ["Id", {"name": "Name", "search": "name", "order": "name", "hidden": false}],
                "default_order": [["Name", "desc"]],
                "rows": [[1, "Alice"], [null, {"value": "<b>Bob</b>", "order_value": "bob"}]]
            }"#,
        )
        .unwrap();

        let columns = dataset.columns();
        assert_eq!(columns[0].name(), "Id");
        assert_eq!(columns[1].order_key(), Some("name"));
        assert_eq!(dataset.default_order().unwrap(), [("Name", Direction::Desc)]);

        let rows = dataset.rows().unwrap();
        assert_eq!(rows[0][0], Cell::from("1"));
        assert_eq!(rows[1][0], Cell::from(""));
        assert_eq!(rows[1][1].clone().into_rich().sort_source(), "bob");
        assert!(dataset.template().is_none());
    }

    #[test]
    fn test_bad_direction() {
        let dataset: Dataset =
            serde_json::from_str(r#"{"columns": ["A"], "default_order": [["A", "sideways"]]}"#).unwrap();
        assert!(dataset.default_order().is_err());
    }
}

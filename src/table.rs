use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Text cells the loader reads as missing values.
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Int(value) => write!(f, "{value}"),
            // 10.0 renders as "10", 2.5 as "2.5"
            Value::Float(value) => write!(f, "{value}"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::DateTime(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

fn cell_value(data: &Data) -> Option<Value> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(text) if NULL_MARKERS.contains(&text.as_str()) => None,
        Data::String(text) => Some(Value::Text(text.clone())),
        Data::Int(value) => Some(Value::Int(*value)),
        Data::Float(value) => Some(Value::Float(*value)),
        Data::Bool(value) => Some(Value::Bool(*value)),
        Data::DateTime(value) => Some(Value::DateTime(match value.as_datetime() {
            Some(datetime) => NaiveDateTime::format(&datetime, "%Y-%m-%d %H:%M:%S").to_string(),
            None => value.as_f64().to_string(),
        })),
        Data::DateTimeIso(value) | Data::DurationIso(value) => Some(Value::DateTime(value.clone())),
    }
}

/// Rows of nullable cells under ordered, named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<Value>>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<Value>>>) -> Self {
        Self { columns, rows }
    }

    /// Builds a table from a worksheet range whose first row is the header.
    pub fn from_range(range: &Range<Data>) -> Self {
        let mut rows = range.rows();

        let columns = match rows.next() {
            Some(header) => column_names(header),
            None => return Self::default(),
        };

        let rows = rows
            .map(|row| {
                let mut cells = row.iter().map(cell_value).collect::<Vec<_>>();
                cells.resize(columns.len(), None);
                cells
            })
            .filter(|cells| cells.iter().any(Option::is_some))
            .collect::<Vec<_>>();

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Distinct non-null values of `column`, sorted ascending.
    pub fn entities(&self, column: &str) -> Result<Vec<String>> {
        let index = self.require_column(column)?;

        Ok(self
            .rows
            .iter()
            .filter_map(|row| row[index].as_ref())
            .map(ToString::to_string)
            .sorted()
            .dedup()
            .collect())
    }

    /// Rows whose `column` renders as `value`, in their original order.
    pub fn filter_eq(&self, column: &str, value: &str) -> Result<Table> {
        let index = self.require_column(column)?;

        let rows = self
            .rows
            .iter()
            .filter(|row| {
                row[index]
                    .as_ref()
                    .is_some_and(|cell| cell.to_string() == value)
            })
            .cloned()
            .collect();

        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }
}

fn column_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let name = match cell_value(cell) {
                Some(value) => value.to_string(),
                None => format!("Unnamed: {index}"),
            };

            let count = seen.entry(name.clone()).or_insert(0);
            let name = match *count {
                0 => name,
                n => format!("{name}.{n}"),
            };
            *count += 1;
            name
        })
        .collect()
}

/// Reads a worksheet (the first one unless `sheet` names another) into a table.
pub fn load_table(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<Table> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }

    tracing::info!("Loading spreadsheet {}", path.display());

    let spreadsheet_error = |source| Error::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_error)?;

    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|sheet| sheet == name) {
                return Err(Error::MissingSheet {
                    path: path.to_path_buf(),
                    sheet: name.to_string(),
                });
            }
            workbook.worksheet_range(name).map_err(spreadsheet_error)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::MissingSheet {
                path: path.to_path_buf(),
                sheet: "0".to_string(),
            })?
            .map_err(spreadsheet_error)?,
    };

    let table = Table::from_range(&range);

    tracing::info!(
        "Loaded {} rows and {} columns",
        table.len(),
        table.columns.len()
    );

    Ok(table)
}

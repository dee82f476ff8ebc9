use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::TableError;
use crate::params::value::Scalar;

/// Field separator for delimited text tables.
///
/// Wraps a regex applied to each trimmed line; the default pattern `\s+`
/// splits on runs of whitespace.
#[derive(Debug, Clone)]
pub struct Separator {
    regex: Regex,
}

impl Separator {
    /// Compile a separator from a regex pattern.
    pub fn new(pattern: &str) -> Result<Self, TableError> {
        let regex = Regex::new(pattern).map_err(|source| TableError::Separator {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Separator { regex })
    }

    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.regex.split(line).collect()
    }
}

impl Default for Separator {
    fn default() -> Self {
        Separator {
            regex: Regex::new(r"\s+").expect("valid pattern"),
        }
    }
}

/// One named column of scalar values.
#[derive(Debug, Clone)]
struct Column {
    name: String,
    values: Vec<Scalar>,
}

/// A rectangular set of named columns, one row per job.
///
/// Every constructor checks that at least one column is present and that
/// all columns have equal length, so a held table is always valid.
#[derive(Debug, Clone)]
pub struct ParameterTable {
    columns: Vec<Column>,
}

impl ParameterTable {
    /// Build a table from in-memory columns.
    pub fn from_columns<N>(
        columns: impl IntoIterator<Item = (N, Vec<Scalar>)>,
    ) -> Result<Self, TableError>
    where
        N: Into<String>,
    {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Column {
                name: name.into(),
                values,
            })
            .collect();
        let expected = match columns.first() {
            Some(first) => first.values.len(),
            None => return Err(TableError::Empty),
        };
        for column in &columns[1..] {
            if column.values.len() != expected {
                return Err(TableError::RaggedColumn {
                    column: column.name.clone(),
                    expected,
                    found: column.values.len(),
                });
            }
        }
        Ok(ParameterTable { columns })
    }

    /// Load a table from a file, dispatching on the `.json` extension.
    pub fn from_path(path: &Path, separator: &Separator) -> Result<Self, TableError> {
        let text = fs::read_to_string(path).map_err(|source| TableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&text),
            _ => Self::from_delimited(&text, separator),
        }
    }

    /// Parse delimited text. The first non-blank line is the header, blank
    /// lines are skipped, and every cell comes out as a `Text` value.
    pub fn from_delimited(text: &str, separator: &Separator) -> Result<Self, TableError> {
        let mut columns: Vec<Column> = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let fields = separator.split(line);
            if columns.is_empty() {
                columns = fields
                    .into_iter()
                    .map(|name| Column {
                        name: name.to_string(),
                        values: Vec::new(),
                    })
                    .collect();
            } else if fields.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    line: idx + 1,
                    expected: columns.len(),
                    found: fields.len(),
                });
            } else {
                for (column, field) in columns.iter_mut().zip(fields) {
                    column.values.push(Scalar::Text(field.to_string()));
                }
            }
        }
        if columns.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(ParameterTable { columns })
    }

    /// Parse a JSON object mapping column names to value arrays.
    pub fn from_json(text: &str) -> Result<Self, TableError> {
        let map: BTreeMap<String, Vec<Scalar>> = serde_json::from_str(text)?;
        Self::from_columns(map)
    }

    /// Number of rows (= jobs).
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |column| column.values.len())
    }

    /// Iterate columns as `(name, values)` pairs, in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Scalar])> + '_ {
        self.columns
            .iter()
            .map(|column| (column.name.as_str(), column.values.as_slice()))
    }
}

//! Extracted tables shown on the consent form.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Translatable, ValidationError};

/// A named, titled tabular dataset: ordered rows of named columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    id: String,
    title: Translatable,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Set only on the synthetic no-data table.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    placeholder: bool,
}

impl Table {
    /// Creates a table, checking that every row matches the column count.
    pub fn new(
        id: impl Into<String>,
        title: Translatable,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("table.id"));
        }
        if columns.is_empty() {
            return Err(ValidationError::empty_field("table.columns"));
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(ValidationError::invalid_format(
                "table.rows",
                format!(
                    "row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    columns.len()
                ),
            ));
        }
        Ok(Self {
            id,
            title,
            columns,
            rows,
            placeholder: false,
        })
    }

    /// Synthetic table shown when extraction found nothing, so the consent
    /// form is never blank.
    pub fn placeholder(source_name: &str) -> Self {
        Self {
            id: format!("{}_no_data_found", source_name),
            title: Translatable::en_nl(
                "Nothing went wrong, but we could not find any data",
                "Er ging niks mis, maar we konden niks vinden",
            ),
            columns: vec!["No data found".to_string()],
            rows: vec![vec!["No data found".to_string()]],
            placeholder: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &Translatable {
        &self.title
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if this is the synthetic no-data table.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

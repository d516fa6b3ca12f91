use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::table::Table;

pub mod splitter;

/// One table row rendered as `column: value` lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
}

pub fn build_documents(table: &Table) -> Vec<Document> {
    table
        .rows
        .iter()
        .map(|row| {
            let content = table
                .columns
                .iter()
                .zip(row)
                .filter_map(|(column, cell)| {
                    cell.as_ref().map(|value| format!("{column}: {value}"))
                })
                .join("\n");

            Document { content }
        })
        .collect()
}

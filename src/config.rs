use std::path::PathBuf;

use clap::Parser;

use crate::document::splitter::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::embedding::ollama::{DEFAULT_HOST, DEFAULT_MODEL};
use crate::embedding::DEFAULT_BATCH_SIZE;
use crate::store::DEFAULT_DB_DIR;

pub const DEFAULT_EXCEL_PATH: &str = "datos_agrupados.xlsx";
pub const DEFAULT_ENTITY_COLUMN: &str = "well_legal_name";

/// Index the rows of one well into a local vector store.
#[derive(Debug, Clone, Parser)]
#[command(name = "index", version)]
pub struct Settings {
    /// Spreadsheet with one row per well record.
    #[arg(long, env = "POZO_EXCEL_PATH", default_value = DEFAULT_EXCEL_PATH)]
    pub excel_path: PathBuf,

    /// Worksheet name; the first worksheet when omitted.
    #[arg(long, env = "POZO_SHEET")]
    pub sheet: Option<String>,

    #[arg(long, env = "POZO_ENTITY_COLUMN", default_value = DEFAULT_ENTITY_COLUMN)]
    pub entity_column: String,

    /// Directory holding the vector index.
    #[arg(long, env = "POZO_DB_DIR", default_value = DEFAULT_DB_DIR)]
    pub db_dir: PathBuf,

    #[arg(long, env = "OLLAMA_HOST", default_value = DEFAULT_HOST)]
    pub ollama_host: String,

    /// Embedding model served by Ollama.
    #[arg(long, env = "POZO_EMBEDDING_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "POZO_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    #[arg(long, env = "POZO_CHUNK_OVERLAP", default_value_t = DEFAULT_CHUNK_OVERLAP)]
    pub chunk_overlap: usize,

    /// Chunks sent per embedding request.
    #[arg(long, env = "POZO_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Menu number to select instead of prompting on stdin.
    #[arg(long, env = "POZO_SELECCION")]
    pub seleccion: Option<String>,
}

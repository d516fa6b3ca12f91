use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddedChunk;
use crate::error::{Error, Result};

pub const DEFAULT_DB_DIR: &str = "vectordb_excel";

const MANIFEST_FILE: &str = "collection.json";
const ENTRIES_FILE: &str = "embeddings.jsonl";

/// Persistent collection of embedded chunks.
pub trait VectorIndex {
    fn append(&mut self, entries: Vec<EmbeddedChunk>) -> Result<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Manifest {
    model: String,
    dimension: Option<usize>,
    count: usize,
}

/// Vector index stored as a directory holding a JSON manifest and one JSON
/// line per embedded chunk. Appending never rewrites existing entries.
#[derive(Debug)]
pub struct JsonVectorStore {
    dir: PathBuf,
    manifest: Manifest,
}

impl JsonVectorStore {
    /// Opens the collection under `dir`, creating the directory if needed.
    ///
    /// The manifest is rebuilt from `embeddings.jsonl` when it is missing or
    /// its count disagrees with the persisted entries.
    pub fn open(dir: impl AsRef<Path>, model: &str) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let manifest_path = dir.join(MANIFEST_FILE);
        let recorded: Option<Manifest> = if manifest_path.exists() {
            Some(serde_json::from_slice(&fs::read(&manifest_path)?)?)
        } else {
            None
        };

        let mut store = Self {
            manifest: recorded.clone().unwrap_or_else(|| Manifest {
                model: model.to_string(),
                dimension: None,
                count: 0,
            }),
            dir,
        };

        let entries = store.entries()?;
        if recorded.as_ref().map(|manifest| manifest.count) != Some(entries.len()) {
            let dimension = entries.first().map(|entry| entry.embedding.len());
            if let Some(expected) = dimension {
                if let Some(entry) = entries.iter().find(|e| e.embedding.len() != expected) {
                    return Err(Error::DimensionMismatch {
                        expected,
                        got: entry.embedding.len(),
                    });
                }
            }

            if !entries.is_empty() {
                tracing::warn!(
                    "Rebuilding manifest of {} from {} persisted entries",
                    store.dir.display(),
                    entries.len()
                );
            }

            store.manifest.dimension = dimension;
            store.manifest.count = entries.len();
            store.write_manifest()?;
        }

        if store.manifest.model != model {
            tracing::warn!(
                "Collection in {} was built with {}, now embedding with {}",
                store.dir.display(),
                store.manifest.model,
                model
            );
        }

        tracing::debug!(
            "Opened vector store {} with {} entries",
            store.dir.display(),
            store.manifest.count
        );

        Ok(store)
    }

    /// Model recorded when the collection was created.
    pub fn model(&self) -> &str {
        &self.manifest.model
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn dimension(&self) -> Option<usize> {
        self.manifest.dimension
    }

    /// Reads back every persisted entry, oldest first.
    pub fn entries(&self) -> Result<Vec<EmbeddedChunk>> {
        let path = self.dir.join(ENTRIES_FILE);
        if !path.exists() {
            return Ok(vec![]);
        }

        let reader = BufReader::new(fs::File::open(path)?);
        let mut entries = vec![];
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }

        Ok(entries)
    }

    fn write_manifest(&self) -> Result<()> {
        let tmp = self.dir.join(format!("{MANIFEST_FILE}.tmp"));
        fs::write(&tmp, serde_json::to_vec_pretty(&self.manifest)?)?;
        fs::rename(tmp, self.dir.join(MANIFEST_FILE))?;
        Ok(())
    }
}

impl VectorIndex for JsonVectorStore {
    fn append(&mut self, entries: Vec<EmbeddedChunk>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut dimension = self.manifest.dimension;
        for entry in &entries {
            let got = entry.embedding.len();
            match dimension {
                Some(expected) if expected != got => {
                    return Err(Error::DimensionMismatch { expected, got });
                }
                Some(_) => {}
                None => dimension = Some(got),
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(ENTRIES_FILE))?;
        let mut writer = BufWriter::new(file);
        for entry in &entries {
            serde_json::to_writer(&mut writer, entry)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        self.manifest.dimension = dimension;
        self.manifest.count += entries.len();
        self.write_manifest()?;

        tracing::info!(
            "Persisted {} entries to {} ({} total)",
            entries.len(),
            self.dir.display(),
            self.manifest.count
        );

        Ok(())
    }

    fn len(&self) -> usize {
        self.manifest.count
    }
}

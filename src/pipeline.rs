use crate::document::splitter::ChunkSplitter;
use crate::document::{build_documents, Document};
use crate::embedding::{embed_chunks, Embedder};
use crate::error::{Error, Result};
use crate::store::VectorIndex;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexReport {
    pub documents: usize,
    pub chunks: usize,
}

/// Documents for every row whose `column` equals `entity`.
pub fn documents_for_entity(table: &Table, column: &str, entity: &str) -> Result<Vec<Document>> {
    let subset = table.filter_eq(column, entity)?;
    if subset.is_empty() {
        return Err(Error::EmptyEntity(entity.to_string()));
    }

    tracing::debug!("{} rows for {}", subset.len(), entity);

    Ok(build_documents(&subset))
}

/// Splits, embeds and persists the documents.
pub async fn index_documents<E, V>(
    documents: &[Document],
    splitter: &ChunkSplitter,
    embedder: &E,
    index: &mut V,
    batch_size: usize,
) -> Result<IndexReport>
where
    E: Embedder,
    V: VectorIndex,
{
    let chunks = splitter.split_documents(documents);

    tracing::info!(
        "Split {} documents into {} chunks of at most {} characters",
        documents.len(),
        chunks.len(),
        splitter.chunk_size()
    );

    let report = IndexReport {
        documents: documents.len(),
        chunks: chunks.len(),
    };

    tracing::info!("Embedding with {}", embedder.model());
    let embedded = embed_chunks(embedder, chunks, batch_size).await?;

    index.append(embedded)?;

    Ok(report)
}

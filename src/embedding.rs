use serde::{Deserialize, Serialize};

use crate::document::Chunk;
use crate::error::{Error, Result};

pub mod ollama;

pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    pub embedding: Vec<f32>,
    pub chunk: Chunk,
}

/// Turns text into embedding vectors.
pub trait Embedder {
    /// Identifier of the model producing the vectors.
    fn model(&self) -> &str;

    /// One vector per input text, in input order.
    #[allow(async_fn_in_trait)]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    #[allow(async_fn_in_trait)]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        match embeddings.len() {
            1 => Ok(embeddings.remove(0)),
            got => Err(Error::EmbeddingCount { expected: 1, got }),
        }
    }
}

pub async fn embed_chunks<E: Embedder>(
    embedder: &E,
    chunks: Vec<Chunk>,
    batch_size: usize,
) -> Result<Vec<EmbeddedChunk>> {
    let batches = chunks.chunks(batch_size.max(1)).collect::<Vec<_>>();

    let mut embeddings = Vec::with_capacity(chunks.len());

    for (id, batch) in batches.iter().enumerate() {
        tracing::info!(
            "Generating embeddings for batch {} of {}",
            id + 1,
            batches.len()
        );

        let texts = batch
            .iter()
            .map(|chunk| chunk.text.clone())
            .collect::<Vec<_>>();

        let vectors = embedder.embed_batch(&texts).await?;
        if vectors.len() != texts.len() {
            return Err(Error::EmbeddingCount {
                expected: texts.len(),
                got: vectors.len(),
            });
        }

        embeddings.extend(vectors);
    }

    Ok(chunks
        .into_iter()
        .zip(embeddings)
        .map(|(chunk, embedding)| EmbeddedChunk { embedding, chunk })
        .collect())
}

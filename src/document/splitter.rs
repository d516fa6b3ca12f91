use text_splitter::{Characters, ChunkConfig, TextSplitter};

use super::{Chunk, Document};
use crate::error::{Error, Result};

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 0;

/// Splits document text into chunks of at most `chunk_size` characters,
/// breaking at the coarsest boundary (paragraph, line, word, character) that
/// fits.
pub struct ChunkSplitter {
    chunk_size: usize,
    splitter: TextSplitter<Characters>,
}

impl Default for ChunkSplitter {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            splitter: TextSplitter::new(DEFAULT_CHUNK_SIZE),
        }
    }
}

impl ChunkSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk size must be positive".into()));
        }

        let config = ChunkConfig::new(chunk_size)
            .with_overlap(chunk_overlap)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        Ok(Self {
            chunk_size,
            splitter: TextSplitter::new(config),
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.splitter.chunks(text).map(str::to_string).collect()
    }

    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|document| self.split_text(&document.content))
            .map(|text| Chunk { text })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ChunkSplitter;
    use crate::document::Document;

    fn char_len(text: &str) -> usize {
        text.chars().count()
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = ChunkSplitter::default().split_text("well_legal_name: A\ndepth: 10");
        assert_eq!(chunks, vec!["well_legal_name: A\ndepth: 10"]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let splitter = ChunkSplitter::default();
        assert!(splitter.split_text("").is_empty());
        assert!(splitter.split_text("  \n ").is_empty());
    }

    #[test]
    fn test_chunks_fit_and_do_not_overlap() {
        let text = (0..400)
            .map(|i| format!("profundidad_{i:03}"))
            .collect::<Vec<_>>()
            .join(" ");

        let chunks = ChunkSplitter::default().split_text(&text);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|chunk| char_len(chunk) <= 1000));

        // every word shows up exactly once, in order
        let words = chunks
            .iter()
            .flat_map(|chunk| chunk.split_whitespace())
            .collect::<Vec<_>>();
        let expected = text.split_whitespace().collect::<Vec<_>>();
        assert_eq!(words, expected);
    }

    #[test]
    fn test_line_rows_are_not_broken_mid_line() {
        let lines = (0..60)
            .map(|i| format!("columna_{i:02}: {}", "x".repeat(30)))
            .collect::<Vec<_>>();
        let text = lines.join("\n");

        let chunks = ChunkSplitter::default().split_text(&text);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|chunk| char_len(chunk) <= 1000));
        let rejoined = chunks
            .iter()
            .flat_map(|chunk| chunk.lines())
            .collect::<Vec<_>>();
        assert_eq!(rejoined, lines);
    }

    #[test]
    fn test_unbroken_text_is_cut_by_characters() {
        let text = "ñ".repeat(2500);
        let chunks = ChunkSplitter::default().split_text(&text);

        assert!(chunks.iter().all(|chunk| char_len(chunk) <= 1000));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        assert!(ChunkSplitter::new(10, 11).is_err());
        assert!(ChunkSplitter::new(0, 0).is_err());
        assert_eq!(ChunkSplitter::new(500, 0).unwrap().chunk_size(), 500);
    }

    #[test]
    fn test_split_documents_keeps_order() {
        let documents = vec![
            Document {
                content: "primero".into(),
            },
            Document {
                content: String::new(),
            },
            Document {
                content: "segundo".into(),
            },
        ];

        let chunks = ChunkSplitter::default().split_documents(&documents);
        let texts = chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["primero", "segundo"]);
    }
}

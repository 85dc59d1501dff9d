/// Outcome of adding an item to a chunk.
#[derive(Debug, PartialEq)]
pub enum ChunkStatus {
    /// The chunk can take more items.
    Continuable,
    /// The chunk reached its size and must be written.
    Full,
}

/// Ordered buffer of at most `chunk_size` processed items.
///
/// The chunk is owned by the step while it fills up. Once full, or once the
/// reader is exhausted, its items are handed to the writer as a slice and the
/// chunk is cleared.
pub struct Chunk<O> {
    items: Vec<O>,
    chunk_size: usize,
}

impl<O> Chunk<O> {
    pub fn new(chunk_size: usize) -> Chunk<O> {
        Chunk {
            items: Vec::new(),
            chunk_size,
        }
    }

    pub fn add_item(&mut self, item: O) -> ChunkStatus {
        self.items.push(item);

        if self.is_full() {
            ChunkStatus::Full
        } else {
            ChunkStatus::Continuable
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.chunk_size
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get_items(&self) -> &[O] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{Chunk, ChunkStatus};

    #[test]
    fn chunk_reports_full_at_its_size() {
        let mut chunk = Chunk::new(2);

        assert_eq!(chunk.add_item("a"), ChunkStatus::Continuable);
        assert_eq!(chunk.add_item("b"), ChunkStatus::Full);
        assert_eq!(chunk.get_items(), &["a", "b"]);
    }

    #[test]
    fn clear_empties_the_chunk_for_reuse() {
        let mut chunk = Chunk::new(1);
        chunk.add_item(1);

        chunk.clear();

        assert!(chunk.is_empty());
        assert!(!chunk.is_full());
        assert_eq!(chunk.add_item(2), ChunkStatus::Full);
    }
}

//! Per-effect audio accumulation

use crate::machine::StereoFrame;

/// Append-only list of per-tick audio chunks for one effect.
///
/// Created empty when an effect is triggered and consumed once by
/// [`AudioAccumulator::into_frames`].
#[derive(Debug, Default)]
pub struct AudioAccumulator {
    chunks: Vec<Vec<StereoFrame>>,
}

impl AudioAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one tick's audio. Empty chunks are ignored.
    pub fn push(&mut self, chunk: Vec<StereoFrame>) {
        if !chunk.is_empty() {
            self.chunks.push(chunk);
        }
    }

    /// Number of non-empty chunks collected
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Concatenate all chunks in collection order.
    pub fn into_frames(self) -> Vec<StereoFrame> {
        self.chunks.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chunks_ignored() {
        let mut acc = AudioAccumulator::new();
        acc.push(Vec::new());
        acc.push(Vec::new());
        assert!(acc.is_empty());
        assert!(acc.into_frames().is_empty());
    }

    #[test]
    fn test_concatenates_in_order() {
        let mut acc = AudioAccumulator::new();
        acc.push(vec![[1, 1], [2, 2]]);
        acc.push(Vec::new());
        acc.push(vec![[3, -3]]);

        assert_eq!(acc.chunk_count(), 2);
        assert_eq!(acc.into_frames(), vec![[1, 1], [2, 2], [3, -3]]);
    }
}

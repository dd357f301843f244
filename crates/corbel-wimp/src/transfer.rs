//! Pull-based data transfer.
//!
//! The save and load protocols move bytes in blocks. Producers implement
//! [`DataSource`]; the transfer layer keeps asking for the next block until
//! it receives an empty one.

/// Produces the bytes of a document one block at a time.
pub trait DataSource {
    /// Next block of data. An empty block marks the end; calling again after
    /// that keeps returning empty blocks.
    fn next_block(&mut self) -> Vec<u8>;
}

/// A [`DataSource`] over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct VecSource {
    data: Vec<u8>,
    position: usize,
    block_size: usize,
}

impl VecSource {
    pub const DEFAULT_BLOCK_SIZE: usize = 256;

    pub fn new(data: Vec<u8>) -> Self {
        Self::with_block_size(data, Self::DEFAULT_BLOCK_SIZE)
    }

    /// `block_size` is clamped to at least one byte so the source always
    /// makes progress.
    pub fn with_block_size(data: Vec<u8>, block_size: usize) -> Self {
        Self {
            data,
            position: 0,
            block_size: block_size.max(1),
        }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl DataSource for VecSource {
    fn next_block(&mut self) -> Vec<u8> {
        let end = (self.position + self.block_size).min(self.data.len());
        let block = self.data[self.position..end].to_vec();
        self.position = end;
        block
    }
}

/// Drain `source` into one buffer.
pub fn read_all(source: &mut dyn DataSource) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let block = source.next_block();
        if block.is_empty() {
            break;
        }
        tracing::trace!("transfer block of {} bytes", block.len());
        out.extend_from_slice(&block);
    }
    out
}

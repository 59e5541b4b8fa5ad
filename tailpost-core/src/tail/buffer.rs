use crate::tail::WindowError;

/// Size of a single read, and the increment the tail buffer grows by.
pub const CHUNK_SIZE: usize = 8192;

/// Growable byte arena holding the current tail window.
///
/// `capacity` is the size of the backing storage and only grows, in
/// `CHUNK_SIZE` steps, while the initial window is built. `len` is the number
/// of bytes of window content at the front of the storage.
#[derive(Debug, Default)]
pub struct TailBuffer {
    data: Vec<u8>,
    len: usize,
}

impl TailBuffer {
    /// An empty buffer. Nothing is allocated until the first read.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The window content.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Makes room for at least `additional` bytes after the content and
    /// returns that free region.
    ///
    /// Growth happens in `CHUNK_SIZE` increments, enough to hold the current
    /// content plus one full chunk.
    pub fn spare_mut(&mut self, additional: usize) -> Result<&mut [u8], WindowError> {
        let needed = self.len + additional;
        if needed > self.data.len() {
            let target = (self.len + CHUNK_SIZE.max(additional)).next_multiple_of(CHUNK_SIZE);
            self.data
                .try_reserve_exact(target - self.data.len())
                .map_err(|_| WindowError::Allocation { requested: target })?;
            self.data.resize(target, 0);
        }
        Ok(&mut self.data[self.len..needed])
    }

    /// Marks `n` bytes of the region returned by [`spare_mut`](Self::spare_mut)
    /// as content.
    pub fn commit(&mut self, n: usize) {
        debug_assert!(self.len + n <= self.data.len());
        self.len += n;
    }

    /// Drops the first `n` content bytes, compacting the rest to the front.
    pub fn discard_front(&mut self, n: usize) {
        let n = n.min(self.len);
        self.data.copy_within(n..self.len, 0);
        self.len -= n;
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Shrinks the arena to a single chunk of scratch space.
    ///
    /// Called once the follow loop takes over, when only one read-sized chunk
    /// is needed per tick.
    pub fn reset_scratch(&mut self) {
        self.len = 0;
        self.data.truncate(CHUNK_SIZE);
        self.data.resize(CHUNK_SIZE, 0);
        self.data.shrink_to_fit();
    }

    /// A full chunk of scratch space, discarding any content.
    pub fn scratch_mut(&mut self) -> Result<&mut [u8], WindowError> {
        self.len = 0;
        self.spare_mut(CHUNK_SIZE)
    }
}

use crate::conf::CountUnit;

/// Drops everything before the `count`-th line or byte (1-based) of a stream.
///
/// Chunks are fed in order; once the start position has been reached every
/// later chunk passes through untouched.
#[derive(Debug, Clone)]
pub struct SkipFilter {
    count: u64,
    unit: CountUnit,
    // The first line/byte is "already seen".
    seen: u64,
}

impl SkipFilter {
    pub fn new(count: u64, unit: CountUnit) -> Self {
        Self {
            count,
            unit,
            seen: 1,
        }
    }

    /// `true` once output is no longer suppressed.
    pub fn is_passing(&self) -> bool {
        self.seen >= self.count
    }

    /// Returns the part of `chunk` that should be emitted.
    pub fn filter<'a>(&mut self, chunk: &'a [u8]) -> &'a [u8] {
        if self.is_passing() {
            return chunk;
        }

        match self.unit {
            CountUnit::Bytes => {
                let skip = (self.count - self.seen).min(chunk.len() as u64) as usize;
                self.seen += skip as u64;
                &chunk[skip..]
            }
            CountUnit::Lines => {
                for (i, &b) in chunk.iter().enumerate() {
                    if b == b'\n' {
                        self.seen += 1;
                        if self.seen == self.count {
                            return &chunk[i + 1..];
                        }
                    }
                }
                &[]
            }
        }
    }
}

/// First id handed out by a fresh generator.
pub const FIRST_ID: u64 = 1;

/// Largest id a loaded document may carry. Anything above leaves too little
/// room for the counter to keep allocating fresh ids.
pub const MAX_ID: u64 = i64::MAX as u64;

/// Monotonic id counter owned by a single graph.
///
/// The counter only moves forward: ids are never reused, even after the
/// element that held them is removed. Clearing a graph replaces its
/// generators with fresh ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: FIRST_ID }
    }

    /// Allocate the next id.
    pub fn generate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to `generate` will return.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Make sure `id` is never handed out again.
    pub fn observe(&mut self, id: u64) {
        self.next = self.next.max(id.saturating_add(1));
    }
}

/// Id generator owned by one store.
///
/// Hands out `max(observed) + 1`, and never goes backwards: an id freed by a
/// delete is not reused for the lifetime of the sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record ids that exist, so later ids are greater than all of them.
    pub fn observe<I: IntoIterator<Item = u64>>(&mut self, ids: I) {
        if let Some(max) = ids.into_iter().max() {
            self.last = self.last.max(max);
        }
    }

    /// The id the next create will receive. Does not advance.
    pub fn peek(&self) -> u64 {
        self.last + 1
    }

    /// Highest id observed so far (0 when nothing has been seen).
    pub fn last(&self) -> u64 {
        self.last
    }
}

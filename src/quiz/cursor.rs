/// Position within the working queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueCursor {
    position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStep {
    /// Moved to the next record.
    Advanced,
    /// Came back around to the first record; one full pass is done.
    Wrapped,
    /// There is nothing to advance through.
    Empty,
}

impl QueueCursor {
    pub fn position(&self) -> usize {
        self.position
    }

    /// Index of the current record, if the queue has one.
    pub fn current(&self, len: usize) -> Option<usize> {
        (self.position < len).then_some(self.position)
    }

    pub fn advance(&mut self, len: usize) -> CursorStep {
        if len == 0 {
            self.position = 0;
            return CursorStep::Empty;
        }

        if self.position + 1 < len {
            self.position += 1;
            CursorStep::Advanced
        } else {
            self.position = 0;
            CursorStep::Wrapped
        }
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}

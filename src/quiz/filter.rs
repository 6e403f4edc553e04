use serde::{
    Deserialize,
    Serialize,
};

use crate::core::Record;

/// Which record groups the quiz queue draws from. Each predicate is
/// independent; a record is queued when any enabled one matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub unanswered: bool,
    pub incorrect: bool,
    pub correct: bool,
    pub correct_with_mistakes: bool,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self { unanswered: true, incorrect: false, correct: false, correct_with_mistakes: false }
    }
}

impl FilterSelection {
    pub fn none() -> Self {
        Self { unanswered: false, incorrect: false, correct: false, correct_with_mistakes: false }
    }

    pub fn any_enabled(&self) -> bool {
        self.unanswered || self.incorrect || self.correct || self.correct_with_mistakes
    }

    pub fn matches(&self, record: &Record) -> bool {
        (self.unanswered && record.is_unanswered())
            || (self.incorrect && record.is_incorrect())
            || (self.correct && record.is_correct())
            || (self.correct_with_mistakes && record.is_correct() && record.mistake_count > 0)
    }
}

/// Derives the working queue. Nothing enabled means an empty queue, never
/// "everything".
pub fn refilter(master: &[Record], selection: &FilterSelection) -> Vec<Record> {
    master.iter().filter(|record| selection.matches(record)).cloned().collect()
}

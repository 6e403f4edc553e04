use chrono::{
    DateTime,
    Utc,
};

use super::{
    cursor::{
        CursorStep,
        QueueCursor,
    },
    filter::{
        refilter,
        FilterSelection,
    },
    stats::{
        OverallStats,
        TodayStats,
    },
};
use crate::{
    core::{
        models::{
            fields,
            Outcome,
            Record,
        },
        TangochoError,
    },
    notion::properties::{
        date_payload,
        number_payload,
        rich_text_payload,
        status_payload,
        PropertyPatch,
    },
};

/// Remote page-property writer. `NotionStore` implements it for production;
/// tests substitute capturing or failing doubles.
pub trait RecordStore {
    fn update_properties(
        &self,
        page_id: &str,
        properties: PropertyPatch,
    ) -> Result<(), TangochoError>;
}

/// Owns every piece of mutable quiz state: the master table mirrored from
/// the remote database, the filtered queue, the cursor, and the day's
/// counters.
pub struct QuizSession {
    store: Box<dyn RecordStore>,
    filters: FilterSelection,
    master: Vec<Record>,
    queue: Vec<Record>,
    cursor: QueueCursor,
    today: TodayStats,
    loaded: bool,
}

impl QuizSession {
    pub fn new(store: Box<dyn RecordStore>, filters: FilterSelection) -> Self {
        Self {
            store,
            filters,
            master: Vec::new(),
            queue: Vec::new(),
            cursor: QueueCursor::default(),
            today: TodayStats::default(),
            loaded: false,
        }
    }

    /// Installs a completed fetch: the master table is replaced wholesale,
    /// the day's counters are re-derived, and the queue restarts from the
    /// top.
    pub fn load_records(&mut self, records: Vec<Record>) {
        self.today = TodayStats::from_records(&records, Utc::now());
        self.master = records;
        self.loaded = true;
        self.rebuild_queue();
    }

    pub fn rebuild_queue(&mut self) {
        self.queue = refilter(&self.master, &self.filters);
        self.cursor.reset();
    }

    pub fn set_filters(&mut self, filters: FilterSelection) {
        self.filters = filters;
        self.rebuild_queue();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn master(&self) -> &[Record] {
        &self.master
    }

    pub fn queue(&self) -> &[Record] {
        &self.queue
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn today(&self) -> &TodayStats {
        &self.today
    }

    pub fn overall_stats(&self) -> OverallStats {
        OverallStats::of(&self.master)
    }

    pub fn current(&self) -> Option<&Record> {
        self.cursor.current(self.queue.len()).map(|index| &self.queue[index])
    }

    pub fn advance(&mut self) -> CursorStep {
        self.cursor.advance(self.queue.len())
    }

    /// Grades a record: remote first, local tables only after the service
    /// confirmed. The day's counters are bumped up front and rolled back if
    /// the write fails.
    pub fn apply_outcome(
        &mut self,
        page_id: &str,
        outcome: Outcome,
        now: DateTime<Utc>,
    ) -> Result<(), TangochoError> {
        let record = self
            .master
            .iter()
            .find(|record| record.page_id == page_id)
            .ok_or_else(|| TangochoError::UnknownRecord(page_id.to_string()))?;

        let mistake_count = match outcome {
            Outcome::Correct => record.mistake_count,
            Outcome::Incorrect => record.mistake_count + 1,
        };
        let attempted_at = now.to_rfc3339();

        let mut patch = PropertyPatch::new();
        if outcome == Outcome::Incorrect {
            patch.insert(fields::MISTAKES.to_string(), number_payload(mistake_count));
        }
        patch.insert(fields::STATUS.to_string(), status_payload(outcome.status_name()));
        patch.insert(fields::ATTEMPTED.to_string(), date_payload(&attempted_at));

        self.today.record(outcome);
        if let Err(error) = self.store.update_properties(page_id, patch) {
            self.today.roll_back(outcome);
            return Err(error);
        }

        for row in self.rows_mut(page_id) {
            row.status = outcome.status_name().to_string();
            row.mistake_count = mistake_count;
            row.attempted_at = Some(attempted_at.clone());
        }

        Ok(())
    }

    /// Saves the memo field; the note lands in both tables only after the
    /// remote write succeeded.
    pub fn apply_note(&mut self, page_id: &str, text: &str) -> Result<(), TangochoError> {
        if !self.master.iter().any(|record| record.page_id == page_id) {
            return Err(TangochoError::UnknownRecord(page_id.to_string()));
        }

        let mut patch = PropertyPatch::new();
        patch.insert(fields::NOTE.to_string(), rich_text_payload(text));

        self.store.update_properties(page_id, patch)?;

        for row in self.rows_mut(page_id) {
            row.note = text.to_string();
        }

        Ok(())
    }

    fn rows_mut<'a>(&'a mut self, page_id: &'a str) -> impl Iterator<Item = &'a mut Record> {
        self.master
            .iter_mut()
            .chain(self.queue.iter_mut())
            .filter(move |record| record.page_id == page_id)
    }
}

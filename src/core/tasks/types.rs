use crate::core::Record;

/// Cumulative totals reported after each fetched page.
#[derive(Debug, Clone)]
pub struct FetchProgress {
    pub pages: usize,
    pub records: usize,
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    FetchProgress(FetchProgress),
    RecordsLoaded(Result<Vec<Record>, String>),
}

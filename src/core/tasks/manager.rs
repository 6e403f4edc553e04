use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
    time::Instant,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    notion::{
        api::fetch_all,
        NotionClient,
    },
    quiz::dataset::build_records,
};

pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    fetch_in_flight: bool,
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender, fetch_in_flight: false }
    }

    /// Drains everything the worker has sent since the last tick. Seeing the
    /// completion message is what re-arms `fetch_records`.
    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            if matches!(result, TaskResult::RecordsLoaded(_)) {
                self.fetch_in_flight = false;
            }
            results.push(result);
        }

        results
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch_in_flight
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    /// Fetches the whole database on a background thread and hands the built
    /// records back through the channel. Ignored while a fetch is already
    /// outstanding.
    pub fn fetch_records(&mut self, client: NotionClient, database_id: String) {
        if self.fetch_in_flight {
            return;
        }
        self.fetch_in_flight = true;

        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let start = Instant::now();

            let progress_sender = sender.clone();
            let fetched = runtime.block_on(fetch_all(&client, &database_id, move |progress| {
                let _ = progress_sender.send(TaskResult::FetchProgress(progress));
            }));

            let result = match fetched {
                Ok(pages) => {
                    let records = build_records(pages);
                    println!(
                        "Loaded {} records from Notion ({:.2}s)",
                        records.len(),
                        start.elapsed().as_secs_f32()
                    );
                    Ok(records)
                }
                Err(e) => {
                    eprintln!("Record fetch failed: {}", e);
                    Err(e.to_string())
                }
            };

            let _ = sender.send(TaskResult::RecordsLoaded(result));
        });
    }
}

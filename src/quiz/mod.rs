pub mod countdown;
pub mod cursor;
pub mod dataset;
pub mod filter;
pub mod session;
pub mod stats;

pub use countdown::Countdown;
pub use cursor::{
    CursorStep,
    QueueCursor,
};
pub use filter::FilterSelection;
pub use session::{
    QuizSession,
    RecordStore,
};
pub use stats::{
    OverallStats,
    TodayStats,
};

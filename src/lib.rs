pub mod config;
pub mod core;
pub mod notion;
pub mod quiz;

pub use crate::{
    config::Settings,
    core::{
        tasks::TaskManager,
        ExamplePair,
        Outcome,
        Record,
        TangochoError,
    },
    notion::{
        client_from_settings,
        NotionClient,
        NotionStore,
    },
    quiz::{
        FilterSelection,
        QuizSession,
    },
};

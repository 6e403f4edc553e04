pub mod errors;
pub mod models;
pub mod tasks;

pub use errors::TangochoError;
pub use models::{ ExamplePair, Outcome, Record };

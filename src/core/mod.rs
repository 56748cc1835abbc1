pub mod cases;
pub mod dispatcher;
pub mod report;
pub mod suite;

pub use crate::domain::model::{
    ApiResponse, CaseMetadata, CaseOutcome, CaseResult, HttpMethod, Operation, Resource, TestCase,
};
pub use crate::domain::ports::{Dispatch, ResponseLog};
pub use crate::utils::error::Result;

#![forbid(unsafe_code)]

pub mod config;
pub mod exam;
pub mod model;
pub mod scoring;
pub mod time;

pub use config::{ExamConfig, MarkingScheme};
pub use exam::{ExamError, ExamIntent, ExamSession, ExamStatus};
pub use time::Clock;

#![forbid(unsafe_code)]

pub mod error;
pub mod exam;
pub mod providers;

pub use exam_core::Clock;

pub use error::{ControllerError, ProviderError};
pub use exam::{ExamController, ExamSnapshot, SubmitTrigger};
pub use providers::{
    AnalysisProvider, ChatClient, GenerativeAnalysisProvider, GenerativeQuestionProvider,
    QuestionProvider,
};

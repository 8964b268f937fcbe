mod ai_settings;
mod ids;
mod progress;
mod question;
mod result;
mod subject;

pub use ai_settings::{AiSettings, AiSettingsDraft, AiSettingsError};
pub use ids::{QuestionId, SessionEpoch};
pub use progress::{ProgressMap, QuestionStatus, StatusCounts, UserProgress};
pub use question::{OptionKey, Question, QuestionDraft, QuestionError, QuestionOptions};
pub use result::ExamResult;
pub use subject::{Subject, SubjectParseError};

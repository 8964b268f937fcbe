use exam_core::model::{OptionKey, QuestionStatus};
use exam_core::{ExamSession, ExamStatus};
use services::ExamSnapshot;

use super::time_fmt::{Urgency, format_clock};

/// Which screen the exam view should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExamScreen {
    SubjectPicker,
    Loading,
    Instructions,
    Question,
    Results,
}

#[must_use]
pub fn screen_for(snapshot: &ExamSnapshot) -> ExamScreen {
    if snapshot.is_loading() {
        return ExamScreen::Loading;
    }
    match snapshot.session().status() {
        ExamStatus::Idle => ExamScreen::SubjectPicker,
        ExamStatus::Instructions => ExamScreen::Instructions,
        ExamStatus::Ongoing => ExamScreen::Question,
        ExamStatus::Submitted => ExamScreen::Results,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownVm {
    pub label: String,
    pub urgency: Urgency,
}

impl CountdownVm {
    #[must_use]
    pub fn from_seconds(seconds: u32) -> Self {
        Self {
            label: format_clock(seconds),
            urgency: Urgency::for_seconds(seconds),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionsVm {
    pub subject: String,
    pub question_count: usize,
    pub lines: Vec<String>,
}

#[must_use]
pub fn map_instructions(session: &ExamSession) -> InstructionsVm {
    InstructionsVm {
        subject: session.subject().label().to_string(),
        question_count: session.total_questions(),
        lines: session.config().instructions(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: OptionKey,
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number: usize,
    pub total: usize,
    pub subject: String,
    pub text: String,
    pub options: Vec<OptionVm>,
    pub status: QuestionStatus,
    pub is_first: bool,
    pub is_last: bool,
}

impl QuestionVm {
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("Question {} of {}", self.number, self.total)
    }
}

/// View model for the current question, if the session has one.
#[must_use]
pub fn map_current_question(session: &ExamSession) -> Option<QuestionVm> {
    let question = session.current_question()?;
    let progress = session.current_progress().copied().unwrap_or_default();
    let options = question
        .options()
        .iter()
        .map(|(key, text)| OptionVm {
            key,
            letter: key.as_char(),
            text: text.to_string(),
            selected: progress.selected_option() == Some(key),
        })
        .collect();

    Some(QuestionVm {
        number: session.current_index() + 1,
        total: session.total_questions(),
        subject: question.subject().label().to_string(),
        text: question.text().to_string(),
        options,
        status: progress.status(),
        is_first: session.current_index() == 0,
        is_last: session.is_last_question(),
    })
}

mod countdown;
mod instructions;
mod loading;
mod palette;
mod question;
mod results;
mod subject_picker;

pub(super) use countdown::Countdown;
pub(super) use instructions::InstructionsScreen;
pub(super) use loading::LoadingScreen;
pub(super) use palette::QuestionPalette;
pub(super) use question::QuestionPanel;
pub(super) use results::ResultsDashboard;
pub(super) use subject_picker::SubjectPicker;

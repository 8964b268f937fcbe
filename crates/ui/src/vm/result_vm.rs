use exam_core::MarkingScheme;
use exam_core::model::ExamResult;

use super::markdown_vm::markdown_to_html;
use super::time_fmt::format_elapsed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakdownRowVm {
    pub label: &'static str,
    pub count: u32,
    pub share: String,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub subject: String,
    pub score: String,
    pub max_score: String,
    pub accuracy: String,
    pub time_taken: String,
    pub breakdown: Vec<BreakdownRowVm>,
    /// Sanitized HTML, `None` while the analysis is still pending.
    pub analysis_html: Option<String>,
}

#[must_use]
pub fn map_result(result: &ExamResult, marking: MarkingScheme, subject: &str) -> ResultVm {
    let total = result.total_questions();
    let max_score = f64::from(total) * marking.marks_per_correct();
    let breakdown = [
        ("Correct", result.correct(), "breakdown--correct"),
        ("Wrong", result.wrong(), "breakdown--wrong"),
        ("Unattempted", result.unattempted(), "breakdown--unattempted"),
    ]
    .into_iter()
    .map(|(label, count, class)| BreakdownRowVm {
        label,
        count,
        share: share_label(count, total),
        class,
    })
    .collect();

    ResultVm {
        subject: subject.to_string(),
        score: format!("{:.2}", result.score()),
        max_score: format!("{max_score:.2}"),
        accuracy: format!("{:.1}%", result.accuracy()),
        time_taken: format_elapsed(result.time_taken_secs()),
        breakdown,
        analysis_html: result.analysis().map(markdown_to_html),
    }
}

fn share_label(count: u32, total: u32) -> String {
    if total == 0 {
        return "0.0%".into();
    }
    format!("{:.1}%", f64::from(count) / f64::from(total) * 100.0)
}

use exam_core::ExamSession;
use exam_core::model::{QuestionStatus, StatusCounts};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteCellVm {
    pub index: usize,
    pub number: usize,
    pub status: QuestionStatus,
    pub is_current: bool,
}

impl PaletteCellVm {
    #[must_use]
    pub fn class(&self) -> String {
        let base = format!("palette-cell {}", status_class(self.status));
        if self.is_current {
            format!("{base} palette-cell--current")
        } else {
            base
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntryVm {
    pub status: QuestionStatus,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteVm {
    pub cells: Vec<PaletteCellVm>,
    pub legend: Vec<LegendEntryVm>,
}

/// CSS modifier for a status swatch.
#[must_use]
pub fn status_class(status: QuestionStatus) -> &'static str {
    match status {
        QuestionStatus::Answered => "status--answered",
        QuestionStatus::NotAnswered => "status--not-answered",
        QuestionStatus::MarkedForReview => "status--review",
        QuestionStatus::Unvisited => "status--unvisited",
    }
}

#[must_use]
pub fn map_palette(session: &ExamSession) -> PaletteVm {
    let progress = session.progress();
    let cells = session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| PaletteCellVm {
            index,
            number: index + 1,
            status: progress.status_of(question.id()),
            is_current: index == session.current_index(),
        })
        .collect();

    PaletteVm {
        cells,
        legend: legend(progress.status_counts()),
    }
}

fn legend(counts: StatusCounts) -> Vec<LegendEntryVm> {
    [
        (QuestionStatus::Answered, counts.answered),
        (QuestionStatus::NotAnswered, counts.not_answered),
        (QuestionStatus::MarkedForReview, counts.marked_for_review),
        (QuestionStatus::Unvisited, counts.unvisited),
    ]
    .into_iter()
    .map(|(status, count)| LegendEntryVm {
        status,
        label: status.label(),
        count,
    })
    .collect()
}

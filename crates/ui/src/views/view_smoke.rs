use std::time::Duration;

use exam_core::model::OptionKey;
use exam_core::{ExamIntent, ExamStatus};

use super::test_harness::{HarnessOptions, StaticQuestions, ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn subject_picker_lists_every_subject() {
    let mut harness = setup_view_harness(ViewKind::Exam, HarnessOptions::default()).await;
    harness.rebuild();
    let html = harness.render();

    for label in ["Current Affairs", "Environment &amp; Ecology", "Mixed Full-Length Test"] {
        assert!(html.contains(label), "missing {label} in {html}");
    }
    assert!(html.contains("subject-card--selected"), "no selection in {html}");
    assert!(html.contains("Start Current Affairs Test"), "missing start in {html}");
    assert!(!html.contains("not configured"), "unexpected notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subject_picker_warns_when_generator_missing() {
    let mut harness = setup_view_harness(
        ViewKind::Exam,
        HarnessOptions {
            providers_enabled: false,
            ..HarnessOptions::default()
        },
    )
    .await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("EXAM_AI_API_KEY"), "missing notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn load_failure_is_shown_on_subject_picker() {
    let mut harness = setup_view_harness(
        ViewKind::Exam,
        HarnessOptions {
            questions: StaticQuestions {
                count: 0,
                fail: true,
            },
            ..HarnessOptions::default()
        },
    )
    .await;
    let _ = harness.controller.begin_preparation().await;
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Could not load questions. Check your API key or connection."),
        "missing load error in {html}"
    );
    assert!(html.contains("exam-subjects"), "left subject picker: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn instructions_screen_lists_rules() {
    let mut harness = setup_view_harness(
        ViewKind::Exam,
        HarnessOptions {
            target: ExamStatus::Instructions,
            ..HarnessOptions::default()
        },
    )
    .await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("General Instructions"), "missing heading in {html}");
    assert!(html.contains("Total Duration: 60 Minutes."), "missing rule in {html}");
    assert!(html.contains("I am ready to begin"), "missing start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn question_screen_shows_timer_question_and_palette() {
    let mut harness = setup_view_harness(
        ViewKind::Exam,
        HarnessOptions {
            target: ExamStatus::Ongoing,
            ..HarnessOptions::default()
        },
    )
    .await;
    harness
        .controller
        .dispatch(ExamIntent::SelectOption(OptionKey::B))
        .unwrap();
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("60:00"), "missing countdown in {html}");
    assert!(html.contains("timer--normal"), "missing urgency in {html}");
    assert!(html.contains("Question 1 of 3"), "missing position in {html}");
    assert!(html.contains("Statement 1 is correct?"), "missing text in {html}");
    assert!(html.contains("option--selected"), "missing selection in {html}");
    assert!(html.contains("Save &amp; Next"), "missing next in {html}");
    assert_eq!(html.matches("palette-cell ").count(), 3, "palette in {html}");
    assert!(html.contains("palette-cell--current"), "no current cell in {html}");
    assert!(html.contains("Answered (1)"), "missing legend in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn last_question_offers_final_submit() {
    let mut harness = setup_view_harness(
        ViewKind::Exam,
        HarnessOptions {
            target: ExamStatus::Ongoing,
            ..HarnessOptions::default()
        },
    )
    .await;
    harness.controller.dispatch(ExamIntent::GoTo(2)).unwrap();
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Final Submit"), "missing submit in {html}");
    assert!(html.contains("Question 3 of 3"), "wrong position in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_show_pending_analysis() {
    let mut harness = setup_view_harness(
        ViewKind::Exam,
        HarnessOptions {
            target: ExamStatus::Submitted,
            ..HarnessOptions::default()
        },
    )
    .await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Quiz Performance Analysis"), "missing title in {html}");
    assert!(html.contains("0.00"), "missing score in {html}");
    assert!(html.contains("0m 0s"), "missing time in {html}");
    assert!(html.contains("Unattempted"), "missing breakdown in {html}");
    assert!(html.contains("100.0%"), "missing share in {html}");
    assert!(
        html.contains("Analyzing your performance patterns..."),
        "missing placeholder in {html}"
    );
    assert!(html.contains("Return to Dashboard"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_render_analysis_markdown() {
    let mut harness = setup_view_harness(
        ViewKind::Exam,
        HarnessOptions {
            target: ExamStatus::Submitted,
            analysis_delay: Duration::ZERO,
            ..HarnessOptions::default()
        },
    )
    .await;

    let mut updates = harness.controller.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let ready = updates
                .borrow_and_update()
                .session()
                .result()
                .and_then(|result| result.analysis())
                .is_some();
            if ready {
                break;
            }
            updates.changed().await.expect("controller alive");
        }
    })
    .await
    .expect("analysis attached");

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("<h2>Strong areas</h2>"), "missing heading in {html}");
    assert!(html.contains("<strong>Polity</strong>"), "missing markdown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn about_view_lists_marking() {
    let mut harness = setup_view_harness(ViewKind::About, HarnessOptions::default()).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("+2.00 correct, -0.66 wrong"), "missing marking in {html}");
    assert!(html.contains("60 minutes"), "missing duration in {html}");
}

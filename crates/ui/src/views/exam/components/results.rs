use dioxus::prelude::*;

use exam_core::ExamIntent;

use crate::vm::ResultVm;

#[component]
pub fn ResultsDashboard(vm: ResultVm, on_intent: EventHandler<ExamIntent>) -> Element {
    rsx! {
        section { class: "results", id: "exam-results",
            h2 { "Quiz Performance Analysis" }
            p { class: "muted", "Subject: {vm.subject}" }
            div { class: "stat-cards",
                div { class: "stat-card",
                    span { class: "stat-label", "Total Score" }
                    span { class: "stat-value", "{vm.score}" }
                    span { class: "stat-hint", "out of {vm.max_score}" }
                }
                div { class: "stat-card",
                    span { class: "stat-label", "Accuracy" }
                    span { class: "stat-value", "{vm.accuracy}" }
                }
                div { class: "stat-card",
                    span { class: "stat-label", "Time Taken" }
                    span { class: "stat-value", "{vm.time_taken}" }
                }
            }
            div { class: "results-body",
                div { class: "breakdown",
                    h3 { "Question Breakdown" }
                    table {
                        tbody {
                            for row in vm.breakdown.iter() {
                                tr { class: "{row.class}",
                                    th { "{row.label}" }
                                    td { "{row.count}" }
                                    td { "{row.share}" }
                                }
                            }
                        }
                    }
                }
                div { class: "analysis",
                    h3 { "Mentor's Analysis" }
                    if let Some(html) = vm.analysis_html.as_ref() {
                        div { class: "analysis-body", dangerous_inner_html: "{html}" }
                    } else {
                        p { class: "analysis-pending", "Analyzing your performance patterns..." }
                    }
                }
            }
            button {
                class: "primary",
                id: "exam-restart",
                onclick: move |_| on_intent.call(ExamIntent::Restart),
                "Return to Dashboard"
            }
        }
    }
}

use dioxus::prelude::*;

use exam_core::ExamIntent;

use crate::vm::{QuestionVm, status_class};

#[component]
pub fn QuestionPanel(vm: QuestionVm, on_intent: EventHandler<ExamIntent>) -> Element {
    let position = vm.position_label();
    let status_class = status_class(vm.status);
    let status_label = vm.status.label();

    rsx! {
        section { class: "question", id: "exam-question",
            header { class: "question-header",
                span { class: "question-position", "{position}" }
                span { class: "question-subject", "{vm.subject}" }
                span { class: "question-status {status_class}", "{status_label}" }
            }
            p { class: "question-text", "{vm.text}" }
            div { class: "options",
                {vm.options.iter().map(|option| {
                    let key = option.key;
                    let class = if option.selected { "option option--selected" } else { "option" };
                    rsx! {
                        button {
                            key: "{option.letter}",
                            class: "{class}",
                            onclick: move |_| on_intent.call(ExamIntent::SelectOption(key)),
                            span { class: "option-letter", "{option.letter}" }
                            span { class: "option-text", "{option.text}" }
                        }
                    }
                })}
            }
            footer { class: "question-actions",
                div { class: "question-actions__left",
                    button {
                        class: "secondary review",
                        onclick: move |_| on_intent.call(ExamIntent::MarkForReview),
                        "Mark for Review"
                    }
                    button {
                        class: "secondary",
                        onclick: move |_| on_intent.call(ExamIntent::ClearResponse),
                        "Clear Response"
                    }
                }
                div { class: "question-actions__right",
                    button {
                        class: "secondary",
                        disabled: vm.is_first,
                        onclick: move |_| on_intent.call(ExamIntent::Previous),
                        "Previous"
                    }
                    if vm.is_last {
                        button {
                            class: "danger",
                            id: "exam-final-submit",
                            onclick: move |_| on_intent.call(ExamIntent::Submit),
                            "Final Submit"
                        }
                    } else {
                        button {
                            class: "primary",
                            onclick: move |_| on_intent.call(ExamIntent::Next),
                            "Save & Next"
                        }
                    }
                }
            }
        }
    }
}

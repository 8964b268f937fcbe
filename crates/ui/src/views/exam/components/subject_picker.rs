use dioxus::prelude::*;

use exam_core::ExamIntent;
use exam_core::model::Subject;

#[component]
pub fn SubjectPicker(
    selected: Subject,
    load_error: Option<String>,
    providers_enabled: bool,
    on_intent: EventHandler<ExamIntent>,
    on_prepare: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "subject-picker", id: "exam-subjects",
            h2 { "Choose a subject" }
            p { class: "muted", "Full-length mock test in the prelims pattern." }
            if !providers_enabled {
                p { class: "notice", "Question generation is not configured. Set EXAM_AI_API_KEY to enable it." }
            }
            if let Some(message) = load_error {
                p { class: "error", role: "alert", "{message}" }
            }
            div { class: "subject-grid",
                {Subject::ALL.into_iter().map(|subject| {
                    let class = if subject == selected {
                        "subject-card subject-card--selected"
                    } else {
                        "subject-card"
                    };
                    rsx! {
                        button {
                            key: "{subject.slug()}",
                            class: "{class}",
                            onclick: move |_| on_intent.call(ExamIntent::SelectSubject(subject)),
                            "{subject.label()}"
                        }
                    }
                })}
            }
            button {
                class: "primary",
                id: "exam-prepare",
                onclick: move |_| on_prepare.call(()),
                "Start {selected.label()} Test"
            }
        }
    }
}

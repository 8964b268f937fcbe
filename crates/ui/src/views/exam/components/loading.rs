use dioxus::prelude::*;

#[component]
pub fn LoadingScreen(subject: String, question_count: usize) -> Element {
    rsx! {
        div { class: "loading", id: "exam-loading",
            div { class: "spinner" }
            h2 { "Generating your test" }
            p { "Preparing {question_count} questions on {subject}. This can take a moment." }
        }
    }
}

use dioxus::prelude::*;

use exam_core::ExamIntent;

use crate::vm::InstructionsVm;

#[component]
pub fn InstructionsScreen(vm: InstructionsVm, on_intent: EventHandler<ExamIntent>) -> Element {
    rsx! {
        section { class: "instructions", id: "exam-instructions",
            h2 { "General Instructions" }
            p { class: "muted", "{vm.subject} · {vm.question_count} questions" }
            ol {
                for line in vm.lines.iter() {
                    li { "{line}" }
                }
            }
            button {
                class: "primary",
                id: "exam-start",
                onclick: move |_| on_intent.call(ExamIntent::Start),
                "I am ready to begin"
            }
        }
    }
}

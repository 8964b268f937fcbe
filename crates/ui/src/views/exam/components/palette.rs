use dioxus::prelude::*;

use exam_core::ExamIntent;

use crate::vm::{PaletteVm, status_class};

#[component]
pub fn QuestionPalette(vm: PaletteVm, on_intent: EventHandler<ExamIntent>) -> Element {
    rsx! {
        aside { class: "palette", id: "exam-palette",
            h3 { "Question Palette" }
            div { class: "palette-grid",
                {vm.cells.iter().map(|cell| {
                    let index = cell.index;
                    rsx! {
                        button {
                            key: "{cell.number}",
                            class: "{cell.class()}",
                            title: "{cell.status.label()}",
                            onclick: move |_| on_intent.call(ExamIntent::GoTo(index)),
                            "{cell.number}"
                        }
                    }
                })}
            }
            ul { class: "palette-legend",
                for entry in vm.legend.iter() {
                    li {
                        span { class: "swatch {status_class(entry.status)}" }
                        "{entry.label} ({entry.count})"
                    }
                }
            }
        }
    }
}

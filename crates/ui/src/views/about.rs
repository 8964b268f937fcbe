use dioxus::prelude::*;

use exam_core::ExamConfig;
use exam_core::model::Subject;

use crate::context::AppContext;

#[component]
pub fn AboutView() -> Element {
    let ctx = use_context::<AppContext>();
    let config = ExamConfig::default();
    let marking = config.marking();
    let minutes = config.duration_secs() / 60;
    let question_count = config.question_count();
    let marking_label = format!(
        "+{:.2} correct, -{:.2} wrong",
        marking.marks_per_correct(),
        marking.negative_marking()
    );
    let backend = if ctx.providers_enabled() {
        "configured"
    } else {
        "not configured (set EXAM_AI_API_KEY)"
    };

    rsx! {
        div { class: "page about",
            h2 { "About this test" }
            dl {
                dt { "Questions" }
                dd { "{question_count}" }
                dt { "Duration" }
                dd { "{minutes} minutes" }
                dt { "Marking" }
                dd { "{marking_label}" }
                dt { "Question generator" }
                dd { "{backend}" }
            }
            h3 { "Subjects" }
            ul {
                for subject in Subject::ALL {
                    li { "{subject.label()}" }
                }
            }
            h3 { "Keyboard" }
            ul {
                li { "A to D: select an option" }
                li { "Left and right arrows: previous and next question" }
            }
        }
    }
}

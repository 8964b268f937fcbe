use dioxus::prelude::*;

use exam_core::{ExamIntent, ExamStatus};
use services::ControllerError;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{
    CountdownVm, ExamScreen, map_current_question, map_instructions, map_palette, map_result,
    screen_for,
};

use super::components::{
    Countdown, InstructionsScreen, LoadingScreen, QuestionPalette, QuestionPanel,
    ResultsDashboard, SubjectPicker,
};
use super::keyboard::intent_for_key;

#[component]
pub fn ExamView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = ctx.exam();
    let providers_enabled = ctx.providers_enabled();

    let mut snapshot = use_signal({
        let controller = controller.clone();
        move || controller.snapshot()
    });
    let mut error = use_signal(|| None::<ViewError>);

    // Mirror controller updates (ticks, auto-submit, analysis) into the signal.
    use_future({
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            async move {
                let mut updates = controller.subscribe();
                while updates.changed().await.is_ok() {
                    let next = updates.borrow_and_update().clone();
                    snapshot.set(next);
                }
            }
        }
    });

    let on_intent = use_callback({
        let controller = controller.clone();
        move |intent: ExamIntent| {
            match controller.dispatch(intent) {
                Ok(()) => error.set(None),
                Err(err) => error.set(Some(ViewError::from(&err))),
            }
            snapshot.set(controller.snapshot());
        }
    });

    let on_prepare = use_callback({
        let controller = controller.clone();
        move |()| {
            error.set(None);
            let controller = controller.clone();
            spawn(async move {
                match controller.begin_preparation().await {
                    // Load failures are shown from the session itself.
                    Ok(()) | Err(ControllerError::Load(_) | ControllerError::NoQuestions) => {}
                    Err(err) => error.set(Some(ViewError::from(&err))),
                }
                snapshot.set(controller.snapshot());
            });
        }
    });

    let current = snapshot.read().clone();
    let session = current.session();
    let screen = screen_for(&current);
    let ongoing = session.status() == ExamStatus::Ongoing;

    let body = match screen {
        ExamScreen::Loading => rsx! {
            LoadingScreen {
                subject: session.subject().label().to_string(),
                question_count: session.config().question_count(),
            }
        },
        ExamScreen::SubjectPicker => rsx! {
            SubjectPicker {
                selected: session.subject(),
                load_error: session.load_error().map(str::to_string),
                providers_enabled,
                on_intent,
                on_prepare,
            }
        },
        ExamScreen::Instructions => rsx! {
            InstructionsScreen { vm: map_instructions(session), on_intent }
        },
        ExamScreen::Question => {
            let question = map_current_question(session);
            rsx! {
                div { class: "exam-layout",
                    div { class: "exam-main",
                        div { class: "exam-toolbar",
                            Countdown { vm: CountdownVm::from_seconds(session.time_left()) }
                        }
                        if let Some(vm) = question {
                            QuestionPanel { vm, on_intent }
                        }
                    }
                    QuestionPalette { vm: map_palette(session), on_intent }
                }
            }
        }
        ExamScreen::Results => match session.result() {
            Some(result) => rsx! {
                ResultsDashboard {
                    vm: map_result(result, session.config().marking(), session.subject().label()),
                    on_intent,
                }
            },
            None => rsx! {
                p { class: "error", "{ViewError::Unknown.message()}" }
            },
        },
    };

    rsx! {
        div {
            class: "page exam",
            id: "exam-root",
            tabindex: "0",
            onkeydown: move |evt: KeyboardEvent| {
                if !ongoing {
                    return;
                }
                if let Some(intent) = intent_for_key(&evt.key()) {
                    evt.prevent_default();
                    on_intent.call(intent);
                }
            },
            if let Some(err) = error() {
                div { class: "banner banner--error", role: "alert",
                    span { "{err.message()}" }
                    button { class: "link", onclick: move |_| error.set(None), "Dismiss" }
                }
            }
            {body}
        }
    }
}

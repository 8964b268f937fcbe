use dioxus::prelude::*;

use crate::vm::CountdownVm;

#[component]
pub fn Countdown(vm: CountdownVm) -> Element {
    rsx! {
        div { class: "{vm.urgency.class()}", id: "exam-countdown",
            span { class: "timer-caption", "Time Remaining:" }
            span { class: "timer-value", "{vm.label}" }
        }
    }
}

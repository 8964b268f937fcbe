use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{AboutView, ExamView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ExamView)] Exam {},
        #[route("/about", AboutView)] About {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    rsx! {
        header { class: "topbar",
            h1 { "Prelims Mock Test" }
            nav {
                Link { to: Route::Exam {}, "Test" }
                Link { to: Route::About {}, "About" }
            }
        }
    }
}

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::model::{ExamResult, QuestionDraft, QuestionOptions, Subject};
use exam_core::time::fixed_now;
use exam_core::{ExamConfig, ExamStatus};
use services::{
    AnalysisProvider, Clock, ExamController, ProviderError, QuestionProvider,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{AboutView, ExamView};

pub struct StaticQuestions {
    pub count: u32,
    pub fail: bool,
}

#[async_trait]
impl QuestionProvider for StaticQuestions {
    async fn generate(
        &self,
        _subject: Subject,
        _count: usize,
    ) -> Result<Vec<QuestionDraft>, ProviderError> {
        if self.fail {
            return Err(ProviderError::Unavailable("offline".into()));
        }
        Ok((1..=self.count)
            .map(|id| QuestionDraft {
                id,
                text: format!("Statement {id} is correct?"),
                options: QuestionOptions::new("Only 1", "Only 2", "Both", "Neither"),
                correct_answer: "C".into(),
                explanation: String::new(),
            })
            .collect())
    }
}

pub struct StaticAnalysis {
    pub delay: Duration,
}

#[async_trait]
impl AnalysisProvider for StaticAnalysis {
    async fn analyze(
        &self,
        _result: &ExamResult,
        _subject: Subject,
    ) -> Result<String, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok("## Strong areas\n\n**Polity** basics are solid.".into())
    }
}

struct TestApp {
    controller: ExamController,
    providers_enabled: bool,
}

impl UiApp for TestApp {
    fn exam_controller(&self) -> ExamController {
        self.controller.clone()
    }

    fn providers_enabled(&self) -> bool {
        self.providers_enabled
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Exam,
    About,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Exam => rsx! { ExamView {} },
        ViewKind::About => rsx! { AboutView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub controller: ExamController,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub struct HarnessOptions {
    pub questions: StaticQuestions,
    pub analysis_delay: Duration,
    pub providers_enabled: bool,
    pub target: ExamStatus,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            questions: StaticQuestions {
                count: 3,
                fail: false,
            },
            analysis_delay: Duration::from_secs(3600),
            providers_enabled: true,
            target: ExamStatus::Idle,
        }
    }
}

/// Build a controller, drive it to `options.target` and mount `view` on it.
pub async fn setup_view_harness(view: ViewKind, options: HarnessOptions) -> ViewHarness {
    let controller = ExamController::new(
        ExamConfig::default(),
        Clock::fixed(fixed_now()),
        Arc::new(options.questions),
        Arc::new(StaticAnalysis {
            delay: options.analysis_delay,
        }),
    );

    if options.target != ExamStatus::Idle {
        controller.begin_preparation().await.expect("questions load");
    }
    if matches!(options.target, ExamStatus::Ongoing | ExamStatus::Submitted) {
        controller
            .dispatch(exam_core::ExamIntent::Start)
            .expect("start");
    }
    if options.target == ExamStatus::Submitted {
        controller
            .dispatch(exam_core::ExamIntent::Submit)
            .expect("submit");
    }

    let app = Arc::new(TestApp {
        controller: controller.clone(),
        providers_enabled: options.providers_enabled,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, controller }
}

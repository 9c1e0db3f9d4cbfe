//! メインアプリケーションコンポーネント

use gloo::file::callbacks::FileReader;
use interior_style_common::{Capabilities, Effect, Event, UploadWorkflow, WorkflowSnapshot};
use leptos::html;
use leptos::prelude::*;

use crate::api;
use crate::components::{
    analyze_button::AnalyzeButton,
    header::Header,
    loading::LoadingIndicator,
    preview::Preview,
    result_panel::ResultPanel,
    upload_area::UploadArea,
};
use crate::platform::{self, WebFile};

/// ワークフローを所有し、Effect を実行するコントローラ
///
/// DOMイベントはすべて [`Controller::dispatch`] を経由する。
/// 描画側はスナップショットのシグナルだけを読む。
#[derive(Clone, Copy)]
pub struct Controller {
    workflow: StoredValue<UploadWorkflow<WebFile>, LocalStorage>,
    /// 実行中のプレビュー読み込み。置き換えると前の読み込みは中断される
    preview_reader: StoredValue<Option<FileReader>, LocalStorage>,
    snapshot: RwSignal<WorkflowSnapshot>,
    form: NodeRef<html::Form>,
    camera_input: NodeRef<html::Input>,
}

impl Controller {
    pub fn new(
        capabilities: Capabilities,
        form: NodeRef<html::Form>,
        camera_input: NodeRef<html::Input>,
    ) -> Self {
        let workflow = UploadWorkflow::new(capabilities);
        let snapshot = RwSignal::new(workflow.snapshot());
        Self {
            workflow: StoredValue::new_local(workflow),
            preview_reader: StoredValue::new_local(None),
            snapshot,
            form,
            camera_input,
        }
    }

    pub fn snapshot(&self) -> ReadSignal<WorkflowSnapshot> {
        self.snapshot.read_only()
    }

    /// イベントを状態機械に渡し、返ってきた Effect を順に実行する
    pub fn dispatch(self, event: Event<WebFile>) {
        let Some(effects) = self.workflow.try_update_value(|wf| wf.handle(event)) else {
            return;
        };

        let next = self.workflow.with_value(|wf| wf.snapshot());
        if self.snapshot.with_untracked(|current| current != &next) {
            self.snapshot.set(next);
        }

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(self, effect: Effect<WebFile>) {
        match effect {
            Effect::Alert(message) => platform::alert(&message),

            Effect::ResetInputs => {
                if let Some(form) = self.form.get_untracked() {
                    form.reset();
                }
            }

            Effect::DecodePreview { ticket, file } => {
                let reader = platform::read_data_url(&file, move |result| {
                    let event = match result {
                        Ok(src) => Event::PreviewDecoded { ticket, src },
                        Err(message) => Event::PreviewFailed { ticket, message },
                    };
                    self.dispatch(event);
                });
                self.preview_reader.set_value(Some(reader));
            }

            Effect::ClearCameraInput => {
                if let Some(input) = self.camera_input.get_untracked() {
                    input.set_value("");
                }
            }

            Effect::OpenCamera => {
                if let Some(input) = self.camera_input.get_untracked() {
                    input.click();
                }
            }

            Effect::Upload { ticket, request } => {
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = api::upload::submit(&request).await;
                    self.dispatch(Event::SubmissionFinished { ticket, outcome });
                });
            }
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let version = platform::read_version();
    let capabilities = Capabilities {
        camera: platform::supports_camera(),
    };

    let form = NodeRef::<html::Form>::new();
    let camera_input = NodeRef::<html::Input>::new();
    let controller = Controller::new(capabilities, form, camera_input);
    let snapshot = controller.snapshot();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        controller.dispatch(Event::SubmitRequested);
    };

    view! {
        <div class="container">
            <Header version=version />

            <form id="upload-form" node_ref=form on:submit=on_submit>
                <UploadArea
                    controller=controller
                    snapshot=snapshot
                    camera_supported=capabilities.camera
                    camera_input=camera_input
                />

                <Preview snapshot=snapshot />

                <AnalyzeButton snapshot=snapshot />
            </form>

            <Show when=move || snapshot.with(|s| s.loading)>
                <LoadingIndicator />
            </Show>

            <ResultPanel snapshot=snapshot />
        </div>
    }
}

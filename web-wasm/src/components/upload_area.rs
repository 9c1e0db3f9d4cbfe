//! アップロードエリアコンポーネント
//!
//! ファイル選択・ドラッグ&ドロップ・カメラの3つの入力元を持つ。
//! どの入力元も同じ FilesSelected イベントに変換する。

use interior_style_common::{DragPhase, Event, InputSource, WorkflowSnapshot, WorkflowState};
use leptos::html;
use leptos::prelude::*;
use web_sys::{DragEvent, HtmlInputElement};

use crate::app::Controller;
use crate::platform::files_from_list;

#[component]
pub fn UploadArea(
    controller: Controller,
    snapshot: ReadSignal<WorkflowSnapshot>,
    camera_supported: bool,
    camera_input: NodeRef<html::Input>,
) -> impl IntoView {
    let busy = move || snapshot.with(|s| s.state == WorkflowState::Submitting);

    // ブラウザ既定の動作（ファイルを開く・遷移）を止める
    let on_drag = move |ev: DragEvent, phase: DragPhase| {
        ev.prevent_default();
        ev.stop_propagation();
        controller.dispatch(Event::Drag(phase));
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        controller.dispatch(Event::Drag(DragPhase::Drop));

        let files = ev
            .data_transfer()
            .map(|dt| files_from_list(dt.files()))
            .unwrap_or_default();
        controller.dispatch(Event::FilesSelected {
            source: InputSource::Drop,
            files,
        });
    };

    let on_change = move |ev: leptos::ev::Event, source: InputSource| {
        let input: HtmlInputElement = event_target(&ev);
        controller.dispatch(Event::FilesSelected {
            source,
            files: files_from_list(input.files()),
        });
    };

    view! {
        <div
            id="drop-area"
            class=move || {
                if snapshot.with(|s| s.drop_active) {
                    "upload-area active"
                } else {
                    "upload-area"
                }
            }
            on:dragenter=move |ev| on_drag(ev, DragPhase::Enter)
            on:dragover=move |ev| on_drag(ev, DragPhase::Over)
            on:dragleave=move |ev| on_drag(ev, DragPhase::Leave)
            on:drop=on_drop
        >
            <div class="upload-icon">"🛋️"</div>
            <p>"Drag & drop a photo of your room here"</p>
            <p class="text-muted">"or"</p>

            <div class="upload-actions">
                <label for="file-input" class="btn btn-secondary">"Choose image"</label>
                <input
                    type="file"
                    id="file-input"
                    accept="image/*"
                    style="display: none"
                    disabled=busy
                    on:change=move |ev| on_change(ev, InputSource::Picker)
                />

                <button
                    type="button"
                    id="capture-btn"
                    class="btn btn-secondary"
                    style:display=if camera_supported { "inline-block" } else { "none" }
                    disabled=busy
                    on:click=move |_| controller.dispatch(Event::CaptureRequested)
                >
                    "Take photo"
                </button>
                <input
                    type="file"
                    id="camera-input"
                    accept="image/*"
                    capture="environment"
                    style="display: none"
                    node_ref=camera_input
                    on:change=move |ev| on_change(ev, InputSource::Camera)
                />
            </div>
        </div>
    }
}

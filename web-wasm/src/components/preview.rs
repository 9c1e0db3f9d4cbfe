//! プレビューコンポーネント

use interior_style_common::WorkflowSnapshot;
use leptos::prelude::*;

#[component]
pub fn Preview(snapshot: ReadSignal<WorkflowSnapshot>) -> impl IntoView {
    let visible = move || snapshot.with(|s| s.preview_src.is_some());

    view! {
        <div
            id="preview-container"
            class="preview-container"
            style:display=move || if visible() { "block" } else { "none" }
        >
            <img
                id="preview-image"
                alt="Selected image preview"
                src=move || {
                    snapshot.with(|s| s.preview_src.as_deref().unwrap_or_default().to_string())
                }
            />
        </div>
    }
}

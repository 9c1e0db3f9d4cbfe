//! 解析ボタンコンポーネント

use interior_style_common::WorkflowSnapshot;
use leptos::prelude::*;

/// フォームの submit ボタン。送信中と未選択時は無効
#[component]
pub fn AnalyzeButton(snapshot: ReadSignal<WorkflowSnapshot>) -> impl IntoView {
    let loading = move || snapshot.with(|s| s.loading);

    view! {
        <div class="analyze-buttons">
            <button
                type="submit"
                id="analyze-btn"
                class="btn btn-primary"
                disabled=move || !snapshot.with(|s| s.submit_enabled)
            >
                {move || if loading() { "Analyzing..." } else { "Analyze Style" }}
            </button>
        </div>
    }
}

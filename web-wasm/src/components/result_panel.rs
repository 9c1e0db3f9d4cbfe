//! 結果表示コンポーネント
//!
//! 文字列はすべてテキストノードとして挿入する（innerHTMLは使わない）。

use interior_style_common::{PaletteEntry, ResultView, WorkflowSnapshot};
use leptos::prelude::*;

#[component]
pub fn ResultPanel(snapshot: ReadSignal<WorkflowSnapshot>) -> impl IntoView {
    let visible = move || snapshot.with(|s| s.result.is_some());

    view! {
        <div
            id="result-container"
            class="result-container"
            style:display=move || if visible() { "block" } else { "none" }
        >
            <h2>"Style Analysis"</h2>
            <div id="style-description">
                {move || snapshot.with(|s| s.result.clone()).map(render_result_view)}
            </div>
        </div>
    }
}

/// 毎回まるごと描き直すので、前回のタイトル・説明・パレットは残らない
fn render_result_view(result: ResultView) -> AnyView {
    match result {
        ResultView::ErrorMessage(message) => view! {
            <p class="error-message">{message}</p>
        }
        .into_any(),

        ResultView::Style {
            title,
            description,
            palette,
        } => view! {
            <h3 class="style-title">{title}</h3>
            <p class="style-text">{description}</p>
            <ColorPalette palette=palette />
        }
        .into_any(),
    }
}

#[component]
fn ColorPalette(palette: Vec<PaletteEntry>) -> impl IntoView {
    view! {
        <div class="color-palette">
            {palette
                .into_iter()
                .map(|entry| {
                    view! {
                        <div class="color-item">
                            <span
                                class="color-swatch"
                                style:background-color=entry.swatch.unwrap_or_default()
                            ></span>
                            <span class="color-hex">{entry.hex}</span>
                            <span class="color-name">{entry.name}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

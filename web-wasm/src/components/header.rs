//! ヘッダーコンポーネント（バージョン表示を含む）

use interior_style_common::VersionInfo;
use leptos::prelude::*;

#[component]
pub fn Header(version: VersionInfo) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Interior Style Detector"</h1>
            <p class="version-info">
                "Version " <span id="version-number">{version.version}</span>
                " · Build " <span id="build-number">{version.build}</span>
            </p>
        </header>
    }
}

//! ローディング表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div id="loading-container" class="loading-container">
            <div class="spinner"></div>
            <p class="loading-text">"Analyzing your space..."</p>
        </div>
    }
}

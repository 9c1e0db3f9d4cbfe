//! ブラウザ環境との境界
//!
//! 機能検出・ブロッキング通知・FileReader・埋め込みバージョンの読み取り

use gloo::file::callbacks::FileReader;
use interior_style_common::{FileHandle, VersionInfo};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::FileList;

/// ブラウザの File をワークフローで扱うためのラッパー
#[derive(Clone, Debug)]
pub struct WebFile(pub web_sys::File);

impl FileHandle for WebFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }
}

/// FileList を順序どおり Vec に変換
pub fn files_from_list(list: Option<FileList>) -> Vec<WebFile> {
    let Some(list) = list else {
        return vec![];
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(WebFile)
        .collect()
}

/// `navigator.mediaDevices.getUserMedia` の有無でカメラ対応を判定
pub fn supports_camera() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let navigator = window.navigator();
    let devices = match js_sys::Reflect::get(&navigator, &JsValue::from_str("mediaDevices")) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => return false,
    };
    js_sys::Reflect::has(&devices, &JsValue::from_str("getUserMedia")).unwrap_or(false)
}

/// `window.APP_VERSION` を読む。未定義ならクレートのバージョンを使う
pub fn read_version() -> VersionInfo {
    let fallback = || VersionInfo::fallback(env!("CARGO_PKG_VERSION"));

    let Some(window) = web_sys::window() else {
        return fallback();
    };
    match js_sys::Reflect::get(&window, &JsValue::from_str("APP_VERSION")) {
        Ok(value) if !value.is_undefined() && !value.is_null() => {
            serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
                log::warn!("APP_VERSION is malformed: {}", e);
                fallback()
            })
        }
        _ => fallback(),
    }
}

/// ブロッキング通知
pub fn alert(message: &str) {
    gloo::dialogs::alert(message);
}

/// 画像をData URLとして読み込む
///
/// 返り値の FileReader を破棄すると読み込みは中断される。
pub fn read_data_url<F>(file: &WebFile, on_done: F) -> FileReader
where
    F: FnOnce(Result<String, String>) + 'static,
{
    let file = gloo::file::File::from(file.0.clone());
    gloo::file::callbacks::read_as_data_url(&file, move |result| {
        on_done(result.map_err(|e| e.to_string()))
    })
}

/// JS例外からメッセージを取り出す
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_web_file_reports_mime_type() {
        let parts = js_sys::Array::of1(&JsValue::from_str("hello"));
        let options = web_sys::FilePropertyBag::new();
        options.set_type("image/png");
        let file = web_sys::File::new_with_str_sequence_and_options(&parts, "room.png", &options)
            .expect("File作成失敗");

        let file = WebFile(file);
        assert_eq!(file.name(), "room.png");
        assert_eq!(file.mime_type(), "image/png");
    }

    #[wasm_bindgen_test]
    fn wasm_read_version_falls_back() {
        let version = read_version();
        assert_eq!(version.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(version.build, "dev");
    }

    #[wasm_bindgen_test]
    fn wasm_js_error_message() {
        let error = js_sys::Error::new("Failed to fetch");
        assert_eq!(js_error_message(&error.into()), "Failed to fetch");
        assert_eq!(js_error_message(&JsValue::from_str("plain")), "plain");
    }
}

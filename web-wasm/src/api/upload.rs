//! /upload への送信
//!
//! multipart (1パート) で POST し、ステータスとボディをそのままワークフローに戻す。
//! ステータスの判定とJSONのパースは共通ライブラリ側で行う。

use interior_style_common::{SubmissionOutcome, UploadRequest};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

use crate::platform::{js_error_message, WebFile};

/// 画像を送信して結果を返す（失敗も SubmissionOutcome として返す）
pub async fn submit(request: &UploadRequest<WebFile>) -> SubmissionOutcome {
    match send(request).await {
        Ok((status, body)) => SubmissionOutcome::Response { status, body },
        Err(e) => SubmissionOutcome::Transport(js_error_message(&e)),
    }
}

/// 画像1枚だけを持つ multipart ボディ
fn build_form(request: &UploadRequest<WebFile>) -> Result<FormData, JsValue> {
    let form_data = FormData::new()?;
    form_data.append_with_blob_and_filename(request.field, &request.file.0, &request.file_name)?;
    Ok(form_data)
}

fn build_request(request: &UploadRequest<WebFile>) -> Result<Request, JsValue> {
    let form_data = build_form(request)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_body(&form_data);

    Request::new_with_str_and_init(request.path, &opts)
}

async fn send(request: &UploadRequest<WebFile>) -> Result<(u16, String), JsValue> {
    let fetch_request = build_request(request)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&fetch_request)).await?;
    let resp: Response = resp_value.dyn_into()?;
    let status = resp.status();

    log::debug!("POST {} -> {}", request.path, status);

    let body = match read_text(&resp).await {
        Ok(body) => body,
        // エラーレスポンスのボディは通知の補足にしか使わない
        Err(_) if !resp.ok() => String::new(),
        Err(e) => return Err(e),
    };

    Ok((status, body))
}

async fn read_text(resp: &Response) -> Result<String, JsValue> {
    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use interior_style_common::{UPLOAD_FIELD, UPLOAD_PATH};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn upload_request(path: &'static str) -> UploadRequest<WebFile> {
        let parts = js_sys::Array::of1(&JsValue::from_str("png bytes"));
        let options = web_sys::FilePropertyBag::new();
        options.set_type("image/png");
        let file = web_sys::File::new_with_str_sequence_and_options(&parts, "room.png", &options)
            .expect("File作成失敗");

        UploadRequest {
            path,
            field: UPLOAD_FIELD,
            file: WebFile(file),
            file_name: "room.png".to_string(),
            mime_type: "image/png".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn wasm_form_has_single_file_part() {
        let form = build_form(&upload_request(UPLOAD_PATH)).expect("FormData作成失敗");

        let part: web_sys::File = form.get("file").dyn_into().expect("fileパートがない");
        assert_eq!(part.name(), "room.png");
        assert_eq!(part.type_(), "image/png");
        assert_eq!(form.get_all("file").length(), 1);
    }

    #[wasm_bindgen_test]
    fn wasm_request_posts_to_upload() {
        let request = build_request(&upload_request(UPLOAD_PATH)).expect("Request作成失敗");

        assert_eq!(request.method(), "POST");
        assert!(request.url().ends_with("/upload"));
    }

    #[wasm_bindgen_test]
    async fn wasm_invalid_target_is_transport_failure() {
        let outcome = submit(&upload_request("http://[invalid")).await;
        assert!(matches!(outcome, SubmissionOutcome::Transport(_)));
    }
}

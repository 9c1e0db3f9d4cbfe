//! アップロードワークフロー（状態機械）
//!
//! 各イベントは1つの遷移関数 [`UploadWorkflow::handle`] に対応する。
//! 遷移は状態を更新し、実行すべき副作用を [`Effect`] として返すだけで、
//! DOM操作や通信は行わない。ブラウザ/CLIのドライバが Effect を実行し、
//! 完了をイベントとして戻す。
//!
//! ```text
//! Idle ──選択(画像)──▶ PreviewReady ──送信──▶ Submitting ──成功──▶ ResultShown
//!   ▲                     ▲   │                    │                   │
//!   └──選択(非画像)────────┘   └─再選択             └──失敗──▶ ErrorShown ─┘(再選択/再送信)
//! ```

use std::sync::Arc;

use crate::parser::{http_failure_message, parse_analysis_response};
use crate::render::{render_result, ResultView};
use crate::types::{
    is_image_mime, AnalysisResult, FileHandle, InputSource, SelectedFile, Ticket, WorkflowState,
};

/// 送信先のパス
pub const UPLOAD_PATH: &str = "/upload";

/// multipartのフィールド名
pub const UPLOAD_FIELD: &str = "file";

pub const MSG_NOT_AN_IMAGE: &str = "Please select an image file";
pub const MSG_NO_FILE: &str = "Please select an image first";

/// 送信リクエスト（multipart 1パート）
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest<F> {
    pub path: &'static str,
    pub field: &'static str,
    pub file: F,
    pub file_name: String,
    pub mime_type: String,
}

/// 送信の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// レスポンスを受信した（ステータスは問わない）
    Response { status: u16, body: String },
    /// レスポンス受信前の失敗（接続不可など）
    Transport(String),
}

/// ドラッグイベントの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Enter,
    Over,
    Leave,
    Drop,
}

/// 実行環境の機能
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub camera: bool,
}

/// 入力イベント
#[derive(Debug, Clone, PartialEq)]
pub enum Event<F> {
    FilesSelected { source: InputSource, files: Vec<F> },
    PreviewDecoded { ticket: Ticket, src: String },
    PreviewFailed { ticket: Ticket, message: String },
    CaptureRequested,
    Drag(DragPhase),
    SubmitRequested,
    SubmissionFinished { ticket: Ticket, outcome: SubmissionOutcome },
}

/// ドライバが実行する副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<F> {
    /// ブロッキング通知（ブラウザでは alert）
    Alert(String),
    /// 入力要素（ピッカー・カメラ）の値をクリア
    ResetInputs,
    /// ローカルでプレビューを生成し、PreviewDecoded / PreviewFailed を戻す
    DecodePreview { ticket: Ticket, file: F },
    /// 同じ画像でもカメラが再度起動するよう、カメラ入力の値をクリア
    ClearCameraInput,
    OpenCamera,
    /// POST を1回だけ発行し、SubmissionFinished を戻す
    Upload { ticket: Ticket, request: UploadRequest<F> },
}

/// 描画用のスナップショット
///
/// ファイルハンドルを含まないため、スレッド境界をまたぐシグナルに載せられる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowSnapshot {
    pub state: WorkflowState,
    pub preview_src: Option<Arc<str>>,
    pub result: Option<ResultView>,
    pub loading: bool,
    pub submit_enabled: bool,
    pub drop_active: bool,
    pub camera_supported: bool,
}

/// ワークフローの状態（コントローラが1つだけ所有する）
#[derive(Debug, Clone)]
pub struct UploadWorkflow<F> {
    state: WorkflowState,
    selected: Option<SelectedFile<F>>,
    preview_src: Option<Arc<str>>,
    result: Option<ResultView>,
    last_result: Option<AnalysisResult>,
    result_visible: bool,
    loading: bool,
    submit_enabled: bool,
    drop_active: bool,
    capabilities: Capabilities,
    pending_submission: Option<Ticket>,
    next_ticket: u64,
    completed_submissions: u64,
}

impl<F: FileHandle> UploadWorkflow<F> {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            state: WorkflowState::Idle,
            selected: None,
            preview_src: None,
            result: None,
            last_result: None,
            result_visible: false,
            loading: false,
            submit_enabled: false,
            drop_active: false,
            capabilities,
            pending_submission: None,
            next_ticket: 0,
            completed_submissions: 0,
        }
    }

    /// イベントを1つ処理し、実行すべき副作用を返す
    pub fn handle(&mut self, event: Event<F>) -> Vec<Effect<F>> {
        match event {
            Event::FilesSelected { source, files } => self.on_files_selected(source, files),
            Event::PreviewDecoded { ticket, src } => self.on_preview_decoded(ticket, src),
            Event::PreviewFailed { ticket, message } => self.on_preview_failed(ticket, &message),
            Event::CaptureRequested => self.on_capture_requested(),
            Event::Drag(phase) => self.on_drag(phase),
            Event::SubmitRequested => self.on_submit_requested(),
            Event::SubmissionFinished { ticket, outcome } => {
                self.on_submission_finished(ticket, outcome)
            }
        }
    }

    fn on_files_selected(&mut self, source: InputSource, files: Vec<F>) -> Vec<Effect<F>> {
        if self.state == WorkflowState::Submitting {
            log::warn!("selection from {} ignored while submitting", source.as_str());
            return vec![];
        }

        // 先頭の1枚のみ扱う
        let Some(file) = files.into_iter().next() else {
            return vec![];
        };

        let mime_type = file.mime_type();
        if !is_image_mime(&mime_type) {
            log::debug!("rejected {} ({}) from {}", file.name(), mime_type, source.as_str());
            self.reset();
            return vec![Effect::Alert(MSG_NOT_AN_IMAGE.to_string()), Effect::ResetInputs];
        }

        let ticket = self.issue_ticket();
        self.selected = Some(SelectedFile {
            name: file.name(),
            mime_type,
            source,
            ticket,
            file: file.clone(),
        });
        // 前のプレビューは新しいデコード完了まで隠す
        self.preview_src = None;
        self.submit_enabled = true;
        self.set_state(WorkflowState::PreviewReady);

        vec![Effect::DecodePreview { ticket, file }]
    }

    fn on_preview_decoded(&mut self, ticket: Ticket, src: String) -> Vec<Effect<F>> {
        if self.is_current_selection(ticket) {
            self.preview_src = Some(Arc::from(src));
        } else {
            log::debug!("stale preview {:?} dropped", ticket);
        }
        vec![]
    }

    fn on_preview_failed(&mut self, ticket: Ticket, message: &str) -> Vec<Effect<F>> {
        if self.is_current_selection(ticket) {
            log::warn!("preview failed: {}", message);
            self.preview_src = None;
        }
        vec![]
    }

    fn on_capture_requested(&mut self) -> Vec<Effect<F>> {
        if !self.capabilities.camera {
            log::warn!("camera capture requested but not supported");
            return vec![];
        }
        if self.state == WorkflowState::Submitting {
            return vec![];
        }
        vec![Effect::ClearCameraInput, Effect::OpenCamera]
    }

    fn on_drag(&mut self, phase: DragPhase) -> Vec<Effect<F>> {
        self.drop_active = matches!(phase, DragPhase::Enter | DragPhase::Over);
        vec![]
    }

    fn on_submit_requested(&mut self) -> Vec<Effect<F>> {
        if self.state == WorkflowState::Submitting {
            log::debug!("submit ignored: already submitting");
            return vec![];
        }

        let Some(selected) = self.selected.as_ref() else {
            return vec![Effect::Alert(MSG_NO_FILE.to_string())];
        };

        let request = UploadRequest {
            path: UPLOAD_PATH,
            field: UPLOAD_FIELD,
            file: selected.file.clone(),
            file_name: selected.name.clone(),
            mime_type: selected.mime_type.clone(),
        };

        let ticket = self.issue_ticket();
        self.pending_submission = Some(ticket);
        self.loading = true;
        self.result_visible = false;
        self.submit_enabled = false;
        self.set_state(WorkflowState::Submitting);

        vec![Effect::Upload { ticket, request }]
    }

    fn on_submission_finished(
        &mut self,
        ticket: Ticket,
        outcome: SubmissionOutcome,
    ) -> Vec<Effect<F>> {
        if self.pending_submission != Some(ticket) {
            log::warn!("stale submission {:?} dropped", ticket);
            return vec![];
        }

        // どの結果でも必ず最初に後始末する
        self.pending_submission = None;
        self.loading = false;
        self.submit_enabled = self.selected.is_some();
        self.completed_submissions += 1;

        match outcome {
            SubmissionOutcome::Response { status, body } if (200..300).contains(&status) => {
                match parse_analysis_response(&body) {
                    Ok(result) => {
                        self.show_result(result);
                        vec![]
                    }
                    Err(e) => self.fail(e.to_string()),
                }
            }
            SubmissionOutcome::Response { status, body } => {
                self.fail(http_failure_message(status, &body))
            }
            SubmissionOutcome::Transport(message) => self.fail(message),
        }
    }

    fn show_result(&mut self, result: AnalysisResult) {
        let view = render_result(&result);
        let next = if view.is_error() {
            WorkflowState::ErrorShown
        } else {
            WorkflowState::ResultShown
        };
        self.result = Some(view);
        self.last_result = Some(result);
        self.result_visible = true;
        self.set_state(next);
    }

    fn fail(&mut self, message: String) -> Vec<Effect<F>> {
        log::warn!("submission failed: {}", message);
        self.result = None;
        self.last_result = None;
        self.result_visible = false;
        self.set_state(WorkflowState::ErrorShown);
        vec![Effect::Alert(format!("Error: {}", message))]
    }

    /// 選択・プレビュー・結果をすべてクリアして Idle に戻す
    fn reset(&mut self) {
        self.selected = None;
        self.preview_src = None;
        self.result = None;
        self.last_result = None;
        self.result_visible = false;
        self.submit_enabled = false;
        self.set_state(WorkflowState::Idle);
    }

    fn set_state(&mut self, next: WorkflowState) {
        if self.state != next {
            log::debug!("workflow {} -> {}", self.state.as_str(), next.as_str());
        }
        self.state = next;
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    fn is_current_selection(&self, ticket: Ticket) -> bool {
        self.selected.as_ref().is_some_and(|s| s.ticket == ticket)
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            state: self.state,
            preview_src: self.preview_src.clone(),
            result: self.result().cloned(),
            loading: self.loading,
            submit_enabled: self.submit_enabled,
            drop_active: self.drop_active,
            camera_supported: self.capabilities.camera,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn selected(&self) -> Option<&SelectedFile<F>> {
        self.selected.as_ref()
    }

    pub fn preview_src(&self) -> Option<&str> {
        self.preview_src.as_deref()
    }

    pub fn preview_visible(&self) -> bool {
        self.preview_src.is_some()
    }

    /// 表示中の結果（非表示なら None）
    pub fn result(&self) -> Option<&ResultView> {
        if self.result_visible {
            self.result.as_ref()
        } else {
            None
        }
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    pub fn result_visible(&self) -> bool {
        self.result_visible
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn drop_active(&self) -> bool {
        self.drop_active
    }

    pub fn camera_supported(&self) -> bool {
        self.capabilities.camera
    }

    /// 後始末まで完了した送信の回数
    pub fn completed_submissions(&self) -> u64 {
        self.completed_submissions
    }
}

//! CLI用のワークフロー実行
//!
//! ブラウザ版と同じ状態機械を使い、Effect をターミナル上で実行する。
//! - Alert: 警告として表示
//! - DecodePreview: image クレートでデコード
//! - Upload: reqwest で送信（スピナーをローディング表示として使う）

use std::collections::VecDeque;
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use interior_style_common::{
    AnalysisResult, Capabilities, Effect, Event, InputSource, ResultView, UploadWorkflow,
    WorkflowState,
};

use crate::client::UploadClient;
use crate::error::{InteriorStyleError, Result};
use crate::preview;
use crate::scanner::{self, LocalImage};

/// 進捗・警告メッセージの出力先
///
/// `--json` では標準出力をJSONだけに使うため、メッセージは標準エラーに回す。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageTarget {
    #[default]
    Stdout,
    Stderr,
}

impl MessageTarget {
    pub fn line(self, message: impl Display) {
        match self {
            MessageTarget::Stdout => println!("{}", message),
            MessageTarget::Stderr => eprintln!("{}", message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// 確認なしで送信する
    pub assume_yes: bool,
    /// スピナーを表示する
    pub progress: bool,
    pub messages: MessageTarget,
}

/// 実行結果
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub state: WorkflowState,
    pub result: Option<ResultView>,
    pub analysis: Option<AnalysisResult>,
    pub alerts: Vec<String>,
    pub preview_size: Option<(u32, u32)>,
    pub submitted: bool,
}

impl SessionReport {
    /// 終了状態をエラーに変換する
    pub fn into_result(self) -> Result<Self> {
        match self.state {
            WorkflowState::ErrorShown => {
                let message = match &self.result {
                    Some(ResultView::ErrorMessage(message)) => message.clone(),
                    _ => self.alerts.last().cloned().unwrap_or_default(),
                };
                Err(InteriorStyleError::AnalysisFailed(message))
            }
            WorkflowState::Idle => Err(InteriorStyleError::Rejected(
                self.alerts.last().cloned().unwrap_or_default(),
            )),
            _ => Ok(self),
        }
    }
}

struct Driver<'a> {
    workflow: UploadWorkflow<LocalImage>,
    client: &'a UploadClient,
    options: &'a SessionOptions,
    alerts: Vec<String>,
    preview_size: Option<(u32, u32)>,
    submitted: bool,
}

impl Driver<'_> {
    /// イベントを処理し、Effect から生じたイベントも続けて処理する
    async fn dispatch(&mut self, event: Event<LocalImage>) {
        let mut events = VecDeque::from([event]);

        while let Some(event) = events.pop_front() {
            for effect in self.workflow.handle(event) {
                if let Some(next) = self.run(effect).await {
                    events.push_back(next);
                }
            }
        }
    }

    async fn run(&mut self, effect: Effect<LocalImage>) -> Option<Event<LocalImage>> {
        match effect {
            Effect::Alert(message) => {
                self.options.messages.line(format!("⚠ {}", message));
                self.alerts.push(message);
                None
            }

            Effect::ResetInputs => {
                tracing::debug!("selection reset");
                None
            }

            Effect::DecodePreview { ticket, file } => match preview::decode_preview(&file) {
                Ok(preview) => {
                    self.options.messages.line(format!(
                        "✔ プレビュー: {} ({}x{}, {})",
                        file.file_name, preview.width, preview.height, file.mime_type
                    ));
                    self.preview_size = Some((preview.width, preview.height));
                    Some(Event::PreviewDecoded {
                        ticket,
                        src: preview.data_url,
                    })
                }
                Err(message) => Some(Event::PreviewFailed { ticket, message }),
            },

            // CLIではカメラを提供しない
            Effect::ClearCameraInput | Effect::OpenCamera => None,

            Effect::Upload { ticket, request } => {
                let spinner = self.spinner(&request.file_name);
                self.submitted = true;
                let outcome = self.client.submit(&request).await;
                if let Some(spinner) = spinner {
                    spinner.finish_and_clear();
                }
                Some(Event::SubmissionFinished { ticket, outcome })
            }
        }
    }

    fn spinner(&self, file_name: &str) -> Option<ProgressBar> {
        if !self.options.progress {
            return None;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("解析中... {}", file_name));
        spinner.enable_steady_tick(Duration::from_millis(120));
        Some(spinner)
    }

    fn report(self) -> SessionReport {
        SessionReport {
            state: self.workflow.state(),
            result: self.workflow.result().cloned(),
            analysis: self.workflow.last_result().cloned(),
            alerts: self.alerts,
            preview_size: self.preview_size,
            submitted: self.submitted,
        }
    }
}

/// ファイルを選択し、確認後に送信して結果を返す
///
/// 複数指定した場合も先頭の1枚だけが対象になる。
pub async fn run_analyze(
    paths: &[PathBuf],
    client: &UploadClient,
    options: &SessionOptions,
) -> Result<SessionReport> {
    // 2枚目以降は読み込まない（存在しなくても無視する）
    let images = match paths.first() {
        Some(first) => vec![scanner::load_image(first)?],
        None => Vec::new(),
    };
    if paths.len() > 1 {
        tracing::info!("{} files given; only the first is used", paths.len());
    }

    let mut driver = Driver {
        workflow: UploadWorkflow::new(Capabilities::default()),
        client,
        options,
        alerts: Vec::new(),
        preview_size: None,
        submitted: false,
    };

    driver
        .dispatch(Event::FilesSelected {
            source: InputSource::Picker,
            files: images,
        })
        .await;

    if driver.workflow.state() != WorkflowState::PreviewReady {
        return Ok(driver.report());
    }

    if !options.assume_yes && !confirm_submit()? {
        options.messages.line("送信をキャンセルしました");
        return Ok(driver.report());
    }

    driver.dispatch(Event::SubmitRequested).await;

    Ok(driver.report())
}

fn confirm_submit() -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt("この画像を解析しますか？")
        .default(true)
        .interact()
        .map_err(|e| InteriorStyleError::Prompt(e.to_string()))
}

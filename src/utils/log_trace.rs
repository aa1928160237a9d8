//! 時系列トレースログシステム
//! `log` クレートのバックエンドとして、コンソール出力と localStorage への記録を行う

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use wasm_bindgen::prelude::*;

use crate::utils::storage::{BrowserStorage, KeyValueStorage};

const MAX_LOG_ENTRIES: usize = 1000;
const STORAGE_KEY: &str = "dual_pane_log_trace";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String, // "info", "warn", "error", "debug"
    pub target: String,
    pub message: String,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
    storage: Option<BrowserStorage>,
}

impl LogTrace {
    pub fn new(storage: Option<BrowserStorage>) -> Self {
        let mut trace = LogTrace {
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            storage,
        };
        trace.load_from_storage();
        trace
    }

    /// リングバッファに追記（古いものから捨てる）
    pub fn push(&mut self, entry: LogEntry) {
        if self.logs.len() >= MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
        self.save_to_storage();
    }

    pub fn get_logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear(&mut self) {
        self.logs.clear();
        self.save_to_storage();
    }

    fn load_from_storage(&mut self) {
        let Some(storage) = &self.storage else { return };
        if let Ok(Some(json_str)) = storage.get_item(STORAGE_KEY) {
            if let Ok(logs) = serde_json::from_str::<Vec<LogEntry>>(&json_str) {
                self.logs = logs.into_iter().collect();
            }
        }
    }

    fn save_to_storage(&self) {
        let Some(storage) = &self.storage else { return };
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        let json_str = serde_json::to_string(&logs).unwrap_or_else(|_| "[]".to_string());
        // 容量超過時も記録は続行（ここでログを出すと再帰する）
        let _ = storage.set_item(STORAGE_KEY, &json_str);
    }

    pub fn download_logs(&self) {
        let json_str = self.get_logs_json();
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let filename = format!("log_trace_{}.json", timestamp);

        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                let blob_parts = js_sys::Array::new();
                blob_parts.push(&JsValue::from_str(&json_str));

                let options = web_sys::BlobPropertyBag::new();
                options.set_type("application/json");

                if let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options) {
                    if let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) {
                        if let Ok(a) = document.create_element("a") {
                            let _ = a.set_attribute("href", &url);
                            let _ = a.set_attribute("download", &filename);
                            if let Some(element) = a.dyn_ref::<web_sys::HtmlElement>() {
                                element.click();
                            }
                            let _ = web_sys::Url::revoke_object_url(&url);
                        }
                    }
                }
            }
        }
    }
}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: std::cell::RefCell<Option<LogTrace>> = const { std::cell::RefCell::new(None) };
}

/// `log` ファサードの出力先
struct TraceLogger;

impl log::Log for TraceLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        let line = format!("[{}] {}", record.target(), message);

        // コンソールにも出力
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line.into()),
            log::Level::Warn => web_sys::console::warn_1(&line.into()),
            log::Level::Info => web_sys::console::info_1(&line.into()),
            _ => web_sys::console::debug_1(&line.into()),
        }

        let entry = LogEntry {
            timestamp: chrono::Local::now().to_rfc3339(),
            level: record.level().as_str().to_lowercase(),
            target: record.target().to_string(),
            message,
        };
        // 記録中に再入した場合は諦める
        LOG_TRACE.with(|trace| {
            if let Ok(mut trace) = trace.try_borrow_mut() {
                if let Some(trace) = trace.as_mut() {
                    trace.push(entry);
                }
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: TraceLogger = TraceLogger;

/// ブラウザ起動時に一度だけ呼ぶ
pub fn init(level: log::LevelFilter) {
    LOG_TRACE.with(|trace| {
        *trace.borrow_mut() = Some(LogTrace::new(BrowserStorage::local()));
    });
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

pub fn download_logs() {
    LOG_TRACE.with(|trace| {
        if let Some(trace) = trace.borrow().as_ref() {
            trace.download_logs();
        }
    });
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| {
        if let Some(trace) = trace.borrow_mut().as_mut() {
            trace.clear();
        }
    });
}

pub fn get_logs_json() -> String {
    LOG_TRACE.with(|trace| {
        trace
            .borrow()
            .as_ref()
            .map(|t| t.get_logs_json())
            .unwrap_or_else(|| "[]".to_string())
    })
}

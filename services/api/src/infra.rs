use metrics_exporter_prometheus::PrometheusHandle;
use resume_ats::ats::extract::extract_sections;
use resume_ats::ats::{extract_text, AtsAnalyzer, AtsService, FileInfo, JobPosting};
use resume_ats::config::AppConfig;
use resume_ats::error::AppError;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_analyzer(config: &AppConfig) -> Result<AtsAnalyzer, AppError> {
    Ok(AtsAnalyzer::from_settings(&config.scoring)?)
}

pub(crate) fn build_service(config: &AppConfig) -> Result<Arc<AtsService>, AppError> {
    let analyzer = build_analyzer(config)?;
    Ok(Arc::new(AtsService::new(Arc::new(analyzer))))
}

/// Format from an explicit override, else the MIME type guessed from the extension.
pub(crate) fn file_info_for(path: &Path, size: u64, format_override: Option<&str>) -> FileInfo {
    let format = match format_override {
        Some(format) => format.to_string(),
        None => mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string())
            .or_else(|| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "txt".to_string()),
    };
    FileInfo::new(format, size)
}

fn is_html(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref(),
        Some("html" | "htm")
    )
}

/// Resume text plus the metadata used for format checks.
pub(crate) fn read_resume(path: &Path, format_override: Option<&str>) -> Result<(String, FileInfo), AppError> {
    let raw = std::fs::read_to_string(path)?;
    let size = std::fs::metadata(path)?.len();
    let text = if is_html(path) { extract_text(&raw) } else { raw };
    Ok((text, file_info_for(path, size, format_override)))
}

/// Job description from plain text, an HTML page or a JSON posting.
pub(crate) fn load_job_description(path: &Path) -> Result<String, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => {
            let posting: JobPosting = serde_json::from_str(&raw)?;
            Ok(extract_sections(&posting).to_text())
        }
        Some("html" | "htm") => Ok(extract_text(&raw)),
        _ => Ok(raw),
    }
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

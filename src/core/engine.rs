use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::core::error::{EngineError, Result};
use crate::core::renderer::{MockRenderer, ReportRenderer};
use crate::core::storage::ArtifactStore;
use crate::core::validation::Validate;
use crate::schemas::report::DynamicReportRequest;
use crate::settings::Config;

#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub report_id: Uuid,
    pub format: String,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub elapsed: Duration,
}

#[derive(Clone)]
pub struct ReportEngine {
    renderer: Arc<dyn ReportRenderer>,
    store: ArtifactStore,
}

impl ReportEngine {
    pub fn new(renderer: Arc<dyn ReportRenderer>, store: ArtifactStore) -> Self {
        tracing::info!("Report engine using {} renderer", renderer.name());
        Self { renderer, store }
    }

    /// Engine backed by [`MockRenderer`], writing under the configured
    /// directories.
    pub fn mock(config: &Config) -> Self {
        tracing::warn!("No report runtime attached, artifacts are described as text");
        Self::new(
            Arc::new(MockRenderer),
            ArtifactStore::new(&config.templates_dir, &config.output_dir),
        )
    }

    pub fn renderer_name(&self) -> &'static str {
        self.renderer.name()
    }

    /// Output location a report with this id and format would get.
    pub fn output_path(&self, report_id: &Uuid, format: &str) -> PathBuf {
        self.store.output_path(report_id, format)
    }

    pub async fn generate(&self, request: DynamicReportRequest) -> Result<GeneratedReport> {
        let engine = self.clone();

        tokio::task::spawn_blocking(move || engine.generate_sync(&request))
            .await
            .map_err(|e| EngineError::Unexpected(format!("Task join error: {}", e)))?
    }

    pub fn generate_sync(&self, request: &DynamicReportRequest) -> Result<GeneratedReport> {
        let started = Instant::now();
        request.validate()?;

        let report_id = Uuid::new_v4();
        let format = request.output_format.clone().unwrap_or_default();
        tracing::info!(
            "Starting report generation: {} ({})",
            request.report_name.as_deref().unwrap_or_default(),
            report_id
        );

        let artifacts = self.renderer.render(request)?;
        let paths = self.store.write(&report_id, &format, &artifacts)?;

        let elapsed = started.elapsed();
        tracing::info!(
            "Report {} generated in {}ms: {}",
            report_id,
            elapsed.as_millis(),
            paths.output.display()
        );

        Ok(GeneratedReport {
            report_id,
            format,
            template_path: paths.template,
            output_path: paths.output,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::core::renderer::Artifacts;

    struct FailingRenderer;

    impl ReportRenderer for FailingRenderer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn render(&self, _request: &DynamicReportRequest) -> Result<Artifacts> {
            Err(EngineError::Unexpected("renderer exploded".to_string()))
        }
    }

    fn request() -> DynamicReportRequest {
        DynamicReportRequest {
            library_path: Some("lib/common.rptlibrary".to_string()),
            report_name: Some("sales".to_string()),
            output_format: Some("html".to_string()),
            dataset_names: Some(vec!["DS1".to_string()]),
            ..Default::default()
        }
    }

    fn engine_in(dir: &std::path::Path) -> ReportEngine {
        ReportEngine::new(
            Arc::new(MockRenderer),
            ArtifactStore::new(dir.join("templates"), dir.join("output")),
        )
    }

    struct SlowRenderer;

    impl ReportRenderer for SlowRenderer {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn render(&self, request: &DynamicReportRequest) -> Result<Artifacts> {
            std::thread::sleep(Duration::from_millis(20));
            MockRenderer.render(request)
        }
    }

    #[test]
    fn elapsed_covers_rendering_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ReportEngine::new(
            Arc::new(SlowRenderer),
            ArtifactStore::new(dir.path().join("templates"), dir.path().join("output")),
        );

        let report = engine.generate_sync(&request()).unwrap();

        assert!(report.elapsed >= Duration::from_millis(20));
    }

    #[test]
    fn generates_two_non_empty_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let report = engine_in(dir.path()).generate_sync(&request()).unwrap();

        assert_eq!(report.format, "html");
        assert!(report.output_path.ends_with(format!("{}.html", report.report_id)));
        assert!(!fs::read_to_string(&report.template_path).unwrap().is_empty());
        assert!(!fs::read_to_string(&report.output_path).unwrap().is_empty());
    }

    #[test]
    fn identifiers_are_fresh_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path());

        let a = engine.generate_sync(&request()).unwrap();
        let b = engine.generate_sync(&request()).unwrap();

        assert_ne!(a.report_id, b.report_id);
        assert_ne!(a.output_path, b.output_path);
    }

    #[test]
    fn invalid_request_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let request = DynamicReportRequest {
            dataset_names: Some(vec![]),
            ..request()
        };

        let err = engine_in(dir.path()).generate_sync(&request).unwrap_err();

        match err {
            EngineError::Invalid(errors) => assert!(errors.contains("datasetNames")),
            other => panic!("expected validation error, got {}", other),
        }
        assert!(!dir.path().join("templates").exists());
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn renderer_failure_is_not_retried_or_stored() {
        let dir = tempfile::tempdir().unwrap();
        let engine = ReportEngine::new(
            Arc::new(FailingRenderer),
            ArtifactStore::new(dir.path().join("templates"), dir.path().join("output")),
        );

        let err = engine.generate_sync(&request()).unwrap_err();

        assert_eq!(err.to_string(), "renderer exploded");
        assert_eq!(engine.renderer_name(), "failing");
        assert!(!dir.path().join("output").exists());
    }

    #[tokio::test]
    async fn async_generation_runs_off_the_reactor() {
        let dir = tempfile::tempdir().unwrap();
        let report = engine_in(dir.path()).generate(request()).await.unwrap();
        assert!(report.template_path.exists());
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::core::error::{EngineError, Result};
use crate::core::renderer::Artifacts;

pub const TEMPLATE_EXTENSION: &str = "rptdesign";

/// Where the pair of artifacts for one report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub template: PathBuf,
    pub output: PathBuf,
}

/// Flat-file storage for generated artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    templates_dir: PathBuf,
    output_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(templates_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn template_path(&self, report_id: &Uuid) -> PathBuf {
        self.templates_dir
            .join(format!("{}.{}", report_id, TEMPLATE_EXTENSION))
    }

    pub fn output_path(&self, report_id: &Uuid, format: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", report_id, format))
    }

    /// Writes both artifacts. Either both files exist afterwards or neither
    /// does.
    pub fn write(&self, report_id: &Uuid, format: &str, artifacts: &Artifacts) -> Result<ArtifactPaths> {
        let template = self.template_path(report_id);
        let output = self.output_path(report_id, format);

        create_dir(&self.templates_dir, "template")?;
        create_dir(&self.output_dir, "output")?;

        write_file(&template, &artifacts.design, "template")?;
        tracing::info!("Report template created: {}", template.display());

        if let Err(e) = write_file(&output, &artifacts.output, "output") {
            if let Err(cleanup) = fs::remove_file(&template) {
                tracing::warn!(
                    "Failed to remove template {} after output write failure: {}",
                    template.display(),
                    cleanup
                );
            }
            return Err(e);
        }
        tracing::info!("Report output generated: {}", output.display());

        Ok(ArtifactPaths { template, output })
    }
}

fn create_dir(dir: &Path, kind: &'static str) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| EngineError::Io {
        kind,
        path: dir.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str, kind: &'static str) -> Result<()> {
    fs::write(path, contents).map_err(|source| EngineError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifacts() -> Artifacts {
        Artifacts {
            design: "<report/>\n".to_string(),
            output: "REPORT\n".to_string(),
        }
    }

    #[test]
    fn writes_both_artifacts_named_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("templates"), dir.path().join("output"));
        let id = Uuid::new_v4();

        let paths = store.write(&id, "xlsx", &artifacts()).unwrap();

        assert_eq!(paths.template, dir.path().join("templates").join(format!("{}.rptdesign", id)));
        assert_eq!(paths.output, dir.path().join("output").join(format!("{}.xlsx", id)));
        assert_eq!(fs::read_to_string(&paths.template).unwrap(), "<report/>\n");
        assert_eq!(fs::read_to_string(&paths.output).unwrap(), "REPORT\n");
    }

    #[test]
    fn repeated_directory_creation_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("t"), dir.path().join("o"));

        store.write(&Uuid::new_v4(), "pdf", &artifacts()).unwrap();
        store.write(&Uuid::new_v4(), "pdf", &artifacts()).unwrap();

        assert_eq!(fs::read_dir(dir.path().join("o")).unwrap().count(), 2);
    }

    #[test]
    fn failed_output_write_removes_template() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("t"), dir.path().join("o"));
        let id = Uuid::new_v4();

        // a directory squatting on the output path makes the write fail
        fs::create_dir_all(store.output_path(&id, "pdf")).unwrap();

        let err = store.write(&id, "pdf", &artifacts()).unwrap_err();

        assert!(matches!(err, EngineError::Io { kind: "output", .. }));
        assert!(!store.template_path(&id).exists());
    }

    #[test]
    fn unwritable_directory_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let store = ArtifactStore::new(blocker.join("templates"), blocker.join("output"));

        let err = store.write(&Uuid::new_v4(), "pdf", &artifacts()).unwrap_err();

        assert!(matches!(err, EngineError::Io { kind: "template", .. }));
        assert!(err.to_string().starts_with("Failed to write template artifact"));
    }
}

//! Program model loader.
//!
//! Each model file holds one exported [`Program`]. Files are decoded
//! independently and merged in scan order, so one broken file does not hide
//! the diagnostics of the others.

use reactive_props_generator::Program;

use crate::error::LoadError;
use crate::scanner::ModelFile;

/// Decoder for exported program models.
#[derive(Debug, Default)]
pub struct ModelLoader;

impl ModelLoader {
    pub fn new() -> Self {
        Self
    }

    /// Decode a single model file.
    pub fn load_file(&self, file: &ModelFile) -> Result<Program, LoadError> {
        serde_json::from_str(&file.content).map_err(|e| LoadError::json(file.path.clone(), &e))
    }

    /// Decode every file, merging the programs that loaded and collecting the
    /// errors of those that did not.
    pub fn load_files(&self, files: &[ModelFile]) -> (Program, Vec<LoadError>) {
        let mut program = Program::new();
        let mut errors = Vec::new();

        for file in files {
            match self.load_file(file) {
                Ok(loaded) => {
                    tracing::trace!(
                        path = %file.relative_path.display(),
                        units = loaded.units.len(),
                        references = loaded.references.len(),
                        "Loaded model"
                    );
                    program.merge(loaded);
                }
                Err(e) => {
                    tracing::warn!(path = %file.relative_path.display(), error = %e, "Skipping model file");
                    errors.push(e);
                }
            }
        }

        (program, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn model(name: &str, content: &str) -> ModelFile {
        ModelFile {
            path: PathBuf::from(name),
            relative_path: PathBuf::from(name),
            content: content.to_string(),
        }
    }

    const VIEW_MODEL: &str = r#"{
        "units": [{
            "path": "Vm.cs",
            "namespace": "App",
            "members": [{ "member": "type", "kind": "class", "name": "Vm" }]
        }],
        "references": [{ "kind": "interface", "name": "global::ReactiveUI.IReactiveObject" }]
    }"#;

    #[test]
    fn test_load_single_file() {
        let program = ModelLoader::new().load_file(&model("vm.json", VIEW_MODEL)).unwrap();

        assert_eq!(program.units.len(), 1);
        assert_eq!(program.references.len(), 1);
    }

    #[test]
    fn test_load_files_merges_and_dedups_references() {
        let files = [model("a.json", VIEW_MODEL), model("b.json", VIEW_MODEL)];
        let (program, errors) = ModelLoader::new().load_files(&files);

        assert!(errors.is_empty());
        assert_eq!(program.units.len(), 2);
        assert_eq!(program.references.len(), 1);
    }

    #[test]
    fn test_broken_file_does_not_stop_others() {
        let files = [model("broken.json", "{ \"units\": ["), model("vm.json", VIEW_MODEL)];
        let (program, errors) = ModelLoader::new().load_files(&files);

        assert_eq!(program.units.len(), 1);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], LoadError::Json { file, .. } if file.ends_with("broken.json")));
    }

    #[test]
    fn test_missing_required_field_is_reported() {
        let content = r#"{ "units": [{ "path": "A.cs", "members": [{ "member": "type", "name": "A" }] }] }"#;
        let error = ModelLoader::new().load_file(&model("a.json", content)).unwrap_err();

        assert!(error.to_string().contains("kind"));
    }
}

use crate::error::CodegenError;
use crate::upload::types::SelectedFile;
use std::fs;
use std::path::Path;

pub const MODEL_EXTENSION: &str = ".onnx";

pub struct FileValidator;

impl FileValidator {
    /// Exact, case-sensitive suffix match on the file name.
    pub fn is_supported_name(name: &str) -> bool {
        name.ends_with(MODEL_EXTENSION)
    }

    pub fn validate(path: &Path) -> Result<SelectedFile, CodegenError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or(CodegenError::UnsupportedExtension)?;

        if !Self::is_supported_name(&name) {
            return Err(CodegenError::UnsupportedExtension);
        }

        let metadata = fs::metadata(path).map_err(|e| CodegenError::io(path, e))?;
        if !metadata.is_file() {
            return Err(CodegenError::NotAFile(path.to_path_buf()));
        }

        Ok(SelectedFile {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
        })
    }
}

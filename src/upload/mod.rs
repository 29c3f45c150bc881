mod client;
mod types;
mod validator;

pub use client::{CodegenClient, CodegenTransport, ProgressCallback, CODEGEN_PATH, UPLOAD_FIELD};
pub use types::{
    FileSelection, GenerateResponse, SelectedFile, UploadProgress, DEFAULT_SUCCESS_MESSAGE,
};
pub use validator::{FileValidator, MODEL_EXTENSION};

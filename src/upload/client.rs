use crate::config::CodegenConfig;
use crate::error::CodegenError;
use crate::upload::types::{SelectedFile, UploadProgress};
use futures_util::future::BoxFuture;
use futures_util::{FutureExt, StreamExt};
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Url};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

pub const CODEGEN_PATH: &str = "/api/codegen";
pub const UPLOAD_FIELD: &str = "model";
const CHUNK_SIZE: usize = 64 * 1024;

pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// The two calls the uploader makes against the code-generation service.
pub trait CodegenTransport: Send + Sync {
    /// Resolves exactly once with the raw body of a 2xx response.
    /// `on_progress` may fire any number of times before that.
    fn upload(
        &self,
        file: SelectedFile,
        on_progress: ProgressCallback,
    ) -> BoxFuture<'static, Result<String, CodegenError>>;

    fn download_url(&self, id: &str) -> Url;
}

#[derive(Clone)]
pub struct CodegenClient {
    http: Client,
    endpoint: Url,
}

impl CodegenClient {
    pub fn new(config: &CodegenConfig) -> Result<Self, CodegenError> {
        let endpoint = Url::parse(&format!("{}{}", config.base_url, CODEGEN_PATH))
            .map_err(|e| CodegenError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut builder = Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint,
        })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send_model(
        http: Client,
        endpoint: Url,
        file: SelectedFile,
        on_progress: ProgressCallback,
    ) -> Result<String, CodegenError> {
        let source = tokio::fs::File::open(&file.path)
            .await
            .map_err(|e| CodegenError::io(&file.path, e))?;
        let total = source
            .metadata()
            .await
            .map_err(|e| CodegenError::io(&file.path, e))?
            .len();
        info!("Uploading {} ({} bytes) to {}", file.name, total, endpoint);

        // Read from disk as hyper pulls the body, so only one chunk is
        // resident at a time. Each chunk is reported once it is handed over.
        let mut loaded = 0u64;
        let body = ReaderStream::with_capacity(source, CHUNK_SIZE).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                loaded += bytes.len() as u64;
                on_progress(UploadProgress {
                    loaded,
                    total: Some(total),
                });
            }
            chunk
        });

        let part = Part::stream_with_length(Body::wrap_stream(body), total)
            .file_name(file.name.clone())
            .mime_str("application/octet-stream")?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = http.post(endpoint).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .filter(|r| !r.is_empty())
                .unwrap_or("Server Error");
            warn!("Upload of {} rejected with status {}", file.name, status);
            return Err(CodegenError::Server(reason.to_string()));
        }

        let body = response.text().await?;
        debug!("Upload response for {}: {}", file.name, body);
        Ok(body)
    }
}

impl CodegenTransport for CodegenClient {
    fn upload(
        &self,
        file: SelectedFile,
        on_progress: ProgressCallback,
    ) -> BoxFuture<'static, Result<String, CodegenError>> {
        Self::send_model(self.http.clone(), self.endpoint.clone(), file, on_progress).boxed()
    }

    fn download_url(&self, id: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().append_pair("id", id);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base_url: &str) -> CodegenClient {
        let config = CodegenConfig {
            base_url: base_url.to_string(),
            ..CodegenConfig::default()
        };
        CodegenClient::new(&config).unwrap()
    }

    #[test]
    fn endpoint_is_rooted_at_base_url() {
        let client = client_for("https://127.0.0.1");
        assert_eq!(client.endpoint().as_str(), "https://127.0.0.1/api/codegen");
    }

    #[test]
    fn download_url_carries_the_identifier() {
        let client = client_for("https://127.0.0.1");
        assert_eq!(
            client.download_url("abc123").as_str(),
            "https://127.0.0.1/api/codegen?id=abc123"
        );
    }

    #[test]
    fn download_url_encodes_the_identifier() {
        let client = client_for("http://localhost:9000");
        assert_eq!(
            client.download_url("a b&c").as_str(),
            "http://localhost:9000/api/codegen?id=a+b%26c"
        );
    }

    #[test]
    fn malformed_base_url_is_reported() {
        let config = CodegenConfig {
            base_url: "not a url".to_string(),
            ..CodegenConfig::default()
        };
        assert!(matches!(
            CodegenClient::new(&config),
            Err(CodegenError::InvalidUrl(_))
        ));
    }
}

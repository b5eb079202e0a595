use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Configuration for the transcription uploader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Transcription server settings
    pub server: ServerConfig,

    /// File selection settings
    pub upload: UploadConfig,

    /// Progress and messaging settings
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the transcription server
    pub base_url: String,

    /// Path of the batch transcription endpoint
    pub transcribe_path: String,

    /// Path prefix for artifact downloads
    pub download_path: String,

    /// Multipart field name shared by every uploaded file
    pub upload_field: String,

    /// Request timeout in seconds (0 = no timeout)
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Media types accepted as video
    pub allowed_media_types: Vec<String>,

    /// Filename extensions accepted when the media type is missing or unknown
    pub video_extensions: Vec<String>,

    /// Walk directories recursively when discovering files
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long the completed progress bar stays visible (milliseconds)
    pub completion_delay_ms: u64,

    /// Status text while the batch is in flight
    pub progress_message: String,

    /// Status text once results arrived
    pub complete_message: String,

    /// Message surfaced when the batch request fails
    pub failure_message: String,
}

impl UiConfig {
    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }
}

impl ServerConfig {
    /// Resolve an endpoint path below `base_url`, keeping any path prefix on the base
    fn endpoint(&self, path: &str) -> crate::Result<Url> {
        let mut base = Url::parse(&self.base_url)?;
        if !base.path().ends_with('/') {
            let prefix = format!("{}/", base.path());
            base.set_path(&prefix);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    /// Full URL of the transcription endpoint
    pub fn transcribe_url(&self) -> crate::Result<Url> {
        self.endpoint(&self.transcribe_path)
    }

    /// Relative link for a downloadable artifact, as rendered in results
    pub fn download_href(&self, artifact_id: &str) -> String {
        format!(
            "{}/{}",
            self.download_path.trim_end_matches('/'),
            urlencoding::encode(artifact_id)
        )
    }

    /// Absolute URL for a downloadable artifact
    pub fn download_url(&self, artifact_id: &str) -> crate::Result<Url> {
        self.endpoint(&self.download_href(artifact_id))
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_paths = [
            "transcribe-uploader.toml",
            "config/transcribe-uploader.toml",
        ];

        for path in &config_paths {
            if Path::new(path).exists() {
                match Self::from_file(Path::new(path)) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Load configuration from a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&config_str)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(server) = std::env::var("TRANSCRIBE_UPLOADER_SERVER") {
            config.server.base_url = server;
        }

        if let Ok(timeout) = std::env::var("TRANSCRIBE_UPLOADER_TIMEOUT") {
            config.server.timeout_seconds = timeout.parse().unwrap_or(0);
        }

        if let Ok(delay) = std::env::var("TRANSCRIBE_UPLOADER_DELAY_MS") {
            config.ui.completion_delay_ms = delay.parse().unwrap_or(2000);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .transcribe_url()
            .map_err(|e| anyhow!("Invalid server URL {}: {}", self.server.base_url, e))?;

        if self.server.upload_field.is_empty() {
            return Err(anyhow!("upload_field must not be empty"));
        }

        if self.upload.allowed_media_types.is_empty() && self.upload.video_extensions.is_empty() {
            return Err(anyhow!("At least one media type or video extension must be allowed"));
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Transcribe Uploader Configuration:\n\
            - Server: {}\n\
            - Endpoint: {}\n\
            - Upload Field: {}\n\
            - Video Extensions: {}\n\
            - Completion Delay: {}ms",
            self.server.base_url,
            self.server.transcribe_path,
            self.server.upload_field,
            self.upload.video_extensions.join(", "),
            self.ui.completion_delay_ms
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://127.0.0.1:5000".to_string(),
                transcribe_path: "/transcribe".to_string(),
                download_path: "/download".to_string(),
                upload_field: "files[]".to_string(),
                timeout_seconds: 0, // Whisper runs can take a very long time
            },
            upload: UploadConfig {
                allowed_media_types: vec![
                    "video/mp4".to_string(),
                    "video/avi".to_string(),
                    "video/quicktime".to_string(),
                    "video/x-matroska".to_string(),
                    "video/x-flv".to_string(),
                    "video/x-ms-wmv".to_string(),
                    "video/webm".to_string(),
                ],
                video_extensions: vec![
                    "mp4".to_string(),
                    "avi".to_string(),
                    "mov".to_string(),
                    "mkv".to_string(),
                    "flv".to_string(),
                    "wmv".to_string(),
                    "webm".to_string(),
                ],
                recursive: false,
            },
            ui: UiConfig {
                completion_delay_ms: 2000,
                progress_message: "Uploading and processing videos...".to_string(),
                complete_message: "Transcription complete!".to_string(),
                failure_message: "Transcription failed".to_string(),
            },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_server(mut self, base_url: impl Into<String>) -> Self {
        self.config.server.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config.server.timeout_seconds = seconds;
        self
    }

    pub fn with_completion_delay(mut self, delay: Duration) -> Self {
        self.config.ui.completion_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.upload.recursive = recursive;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

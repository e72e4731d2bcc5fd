use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

/// S3-compatible storage configuration
///
/// Read once at startup and never validated on load; the provider rejects
/// empty region or bucket name when it is first used.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage region (e.g., "us-east-1", "auto" for R2)
    pub region: String,
    /// Custom endpoint for S3-compatible services (R2, MinIO, ...)
    pub endpoint: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    /// Base URL serving the bucket publicly (custom domain or CDN)
    pub public_url: Option<String>,
    /// Use path-style addressing when a custom endpoint is set
    pub force_path_style: bool,
    /// Provider selector (e.g., "s3")
    pub provider: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Storage Gateway API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "File upload and URL signing for S3-compatible storage".to_string());

        Ok(Self {
            title,
            version,
            description,
        })
    }
}

impl StorageConfig {
    const DEFAULT_PROVIDER: &'static str = "s3";

    pub fn from_env() -> Result<Self, String> {
        Ok(Self::from_lookup(|name| env::var(name).ok()))
    }

    /// Assemble the config from a variable lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Empty optional values count as unset
        let optional = |name: &str| lookup(name).filter(|s| !s.is_empty());
        let required = |name: &str| lookup(name).unwrap_or_default();

        Self {
            region: required("STORAGE_REGION"),
            endpoint: optional("STORAGE_ENDPOINT"),
            access_key_id: required("STORAGE_ACCESS_KEY_ID"),
            secret_access_key: required("STORAGE_SECRET_ACCESS_KEY"),
            bucket_name: required("STORAGE_BUCKET_NAME"),
            public_url: optional("STORAGE_PUBLIC_URL"),
            force_path_style: lookup("STORAGE_FORCE_PATH_STYLE").as_deref() != Some("false"),
            provider: optional("STORAGE_PROVIDER")
                .unwrap_or_else(|| Self::DEFAULT_PROVIDER.to_string()),
        }
    }

    /// Path-style addressing applies only to custom endpoints
    pub fn uses_path_style(&self) -> bool {
        self.endpoint.is_some() && self.force_path_style
    }
}

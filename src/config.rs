use std::env;

#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Root folder on the media host; per-resource folders nest under it.
    pub folder: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub media: MediaConfig,
    pub push_gateway_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let media = MediaConfig {
            cloud_name: env::var("CLOUDINARY_CLOUD_NAME")?,
            api_key: env::var("CLOUDINARY_API_KEY")?,
            api_secret: env::var("CLOUDINARY_API_SECRET")?,
            folder: env::var("CLOUDINARY_FOLDER").unwrap_or_else(|_| "ecommerce".to_string()),
        };

        let push_gateway_url = env::var("PUSH_GATEWAY_URL")
            .unwrap_or_else(|_| "https://exp.host/--/api/v2/push/send".to_string());

        Ok(Self {
            port,
            database_url,
            host,
            media,
            push_gateway_url,
        })
    }
}

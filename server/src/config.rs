use anyhow::{Result, anyhow};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let default_page_size = env_u64("DEFAULT_PAGE_SIZE", 20)?;
        let max_page_size = env_u64("MAX_PAGE_SIZE", 100)?;
        if default_page_size == 0 || max_page_size == 0 {
            return Err(anyhow!("page sizes must be at least 1"));
        }

        Ok(Self {
            cors_allowed_origins,
            default_page_size,
            max_page_size,
        })
    }

    /// Resolve a requested page size against the configured bounds.
    pub fn page_size(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: Vec::new(),
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

fn env_u64(key: &str, fallback: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| anyhow!("invalid {}: {}", key, value)),
        Err(_) => Ok(fallback),
    }
}

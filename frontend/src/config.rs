//! 运行时配置
//!
//! 默认值在编译时确定；构建时可通过环境变量 `FERTIFLOW_API_URL` 覆盖。

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// REST API base URL, without a trailing slash.
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::with_base_url(option_env!("FERTIFLOW_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn with_base_url(url: &str) -> Self {
        let trimmed = url.trim().trim_end_matches('/');
        let api_base_url = if trimmed.is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { api_base_url }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = AppConfig::with_base_url("https://api.example.com/v1/");
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        assert_eq!(AppConfig::with_base_url("  ").api_base_url, DEFAULT_API_URL);
    }
}

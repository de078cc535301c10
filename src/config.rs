use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{AppResult, ConfigError};
use crate::models::upload::DEFAULT_MAX_IMAGE_BYTES;

/// 程序配置
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 解题服务地址（`/solve` 与 `/solve_text` 所在的服务）
    pub service_base_url: String,
    /// 单次请求超时时间（秒），0 表示不限时
    pub request_timeout_secs: u64,
    /// 是否只采纳最新一次提交的结果
    pub single_flight: bool,
    /// 图片大小上限（字节）
    pub max_image_bytes: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 解题结果输出的 HTML 页面
    pub output_html: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 120,
            single_flight: true,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            verbose_logging: false,
            output_html: "solution.html".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.mistral.ai/v1".to_string(),
            llm_model_name: "pixtral-12b-2409".to_string(),
        }
    }
}

impl Config {
    /// 只从环境变量加载（未设置的项使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 加载配置：默认值 → TOML 文件（可选）→ 环境变量
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件加载，缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 请求超时，0 秒表示不限时
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    fn with_env_overrides(self) -> Self {
        let env = |name: &str| std::env::var(name).ok();
        Self {
            service_base_url: env("SOLVER_BASE_URL").unwrap_or(self.service_base_url),
            request_timeout_secs: env("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            single_flight: env("SINGLE_FLIGHT").and_then(|v| v.parse().ok()).unwrap_or(self.single_flight),
            max_image_bytes: env("MAX_IMAGE_BYTES").and_then(|v| v.parse().ok()).unwrap_or(self.max_image_bytes),
            verbose_logging: env("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_html: env("OUTPUT_HTML").unwrap_or(self.output_html),
            llm_api_key: env("MISTRAL_API_KEY").or_else(|| env("LLM_API_KEY")).unwrap_or(self.llm_api_key),
            llm_api_base_url: env("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: env("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
        }
    }
}

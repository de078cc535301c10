use thiserror::Error;

/// 应用程序错误类型
///
/// 只包含会传到应用边界的错误；传输错误和排版错误在解题流程内部
/// 分别转换为固定提示和警告日志，不会向外传播。
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 纯文本导出错误
    #[error("导出错误: {0}")]
    Export(#[from] regex::Error),
}

/// 输入校验错误
///
/// 在构建请求之前就被拦截，不会发出任何请求。
#[derive(Debug, Error)]
pub enum ValidationError {
    /// 图片模式下没有已接受的文件
    #[error("未选择文件")]
    MissingFile,
    /// 文本模式下题目为空
    #[error("题目文本不能为空")]
    EmptyText,
    /// 文件类型不被支持
    #[error("不支持的文件类型: {file_name}，请上传 JPG、PNG 或 GIF 格式的图片")]
    UnsupportedType { file_name: String },
    /// 文件超过大小上限
    #[error("文件大小 {size} 字节超过上限 {limit} 字节")]
    TooLarge { size: u64, limit: u64 },
    /// 文件无法读取
    #[error("无法读取文件 {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 传输层错误
///
/// 没有结构化的细节可以展示给用户，统一使用固定的兜底提示。
#[derive(Debug, Error)]
pub enum TransportError {
    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 请求超时
    #[error("请求超时 ({endpoint})，已等待 {secs} 秒")]
    Timeout { endpoint: String, secs: u64 },
    /// 响应无法解析
    #[error("响应解析失败 ({endpoint}): {source}")]
    InvalidResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 排版渲染错误
///
/// 只记录日志，不展示给用户，已渲染的标记仍然可见。
#[derive(Debug, Error)]
pub enum RenderError {
    /// 写入 HTML 页面失败
    #[error("写入页面失败 ({path}): {source}")]
    PageWriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 没有可排版的内容
    #[error("没有可排版的内容")]
    NothingRendered,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("无法解析配置文件 {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 展示给用户的信息，校验错误不带分类前缀
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

impl TransportError {
    /// 创建请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        TransportError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建响应解析错误
    pub fn invalid_response(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        TransportError::InvalidResponse {
            endpoint: endpoint.into(),
            source,
        }
    }
}

impl ValidationError {
    /// 创建文件读取错误
    pub fn unreadable(path: impl Into<String>, source: std::io::Error) -> Self {
        ValidationError::Unreadable {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_wraps_inner_message() {
        let err = AppError::from(ValidationError::EmptyText);
        assert_eq!(err.to_string(), "校验错误: 题目文本不能为空");
        assert_eq!(err.user_message(), "题目文本不能为空");

        let err = TransportError::Timeout {
            endpoint: "/solve_text".to_string(),
            secs: 120,
        };
        assert!(err.to_string().contains("/solve_text"));
        assert!(err.to_string().contains("120"));
    }

    #[test]
    fn test_too_large_mentions_limit() {
        let err = ValidationError::TooLarge {
            size: 6_000_000,
            limit: 5_242_880,
        };
        assert!(err.to_string().contains("5242880"));
    }
}

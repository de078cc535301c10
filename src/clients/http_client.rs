/// 解题服务 HTTP 客户端
///
/// 封装 `/solve`（multipart）与 `/solve_text`（JSON）两个接口
use crate::clients::SolverService;
use crate::config::Config;
use crate::error::TransportError;
use crate::models::{ImageUpload, ServiceResponse, SubmissionMode};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Request};
use serde::Serialize;
use tracing::debug;

/// 文本题目请求体
#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    message: &'a str,
}

/// 解题服务 HTTP 客户端
pub struct HttpSolverClient {
    client: Client,
    base_url: String,
}

impl HttpSolverClient {
    /// 创建新的 HTTP 客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.service_base_url)
    }

    /// 使用指定服务地址创建
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// 构建图片题目请求
    ///
    /// # 参数
    /// - `upload`: 已校验的图片
    /// - `comment`: 补充说明（可选），为 None 时不附带 `message` 字段
    ///
    /// # 返回
    /// 返回 multipart 请求，图片放在 `file` 字段
    pub fn build_image_request(
        &self,
        upload: &ImageUpload,
        comment: Option<&str>,
    ) -> Result<Request, reqwest::Error> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)?;

        let mut form = Form::new().part("file", part);
        if let Some(comment) = comment {
            form = form.text("message", comment.to_string());
        }

        self.client
            .post(self.url(SubmissionMode::Image))
            .multipart(form)
            .build()
    }

    /// 构建文本题目请求，请求体为 `{"message": ...}`
    pub fn build_text_request(&self, problem: &str) -> Result<Request, reqwest::Error> {
        self.client
            .post(self.url(SubmissionMode::Text))
            .json(&TextRequest { message: problem })
            .build()
    }

    /// 发送请求并解析响应
    ///
    /// 服务端在 4xx/5xx 时同样返回 `{"error": ...}`，因此不按状态码判断，只解析响应体
    async fn execute(
        &self,
        endpoint: &str,
        request: Request,
    ) -> Result<ServiceResponse, TransportError> {
        debug!("POST {}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| TransportError::request_failed(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::request_failed(endpoint, e))?;

        debug!("响应状态 {} ({}), 长度 {} 字节", status, endpoint, body.len());

        parse_response(endpoint, &body)
    }

    fn url(&self, mode: SubmissionMode) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), mode.endpoint())
    }
}

impl SolverService for HttpSolverClient {
    async fn solve_image(
        &self,
        upload: &ImageUpload,
        comment: Option<&str>,
    ) -> Result<ServiceResponse, TransportError> {
        let endpoint = SubmissionMode::Image.endpoint();
        let request = self
            .build_image_request(upload, comment)
            .map_err(|e| TransportError::request_failed(endpoint, e))?;
        self.execute(endpoint, request).await
    }

    async fn solve_text(&self, problem: &str) -> Result<ServiceResponse, TransportError> {
        let endpoint = SubmissionMode::Text.endpoint();
        let request = self
            .build_text_request(problem)
            .map_err(|e| TransportError::request_failed(endpoint, e))?;
        self.execute(endpoint, request).await
    }
}

/// 解析响应体，格式不对视为传输错误
pub fn parse_response(endpoint: &str, body: &str) -> Result<ServiceResponse, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::invalid_response(endpoint, e))
}

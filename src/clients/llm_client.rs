//! LLM 解题后端
//!
//! 直接调用兼容 OpenAI API 的多模态模型（默认 Mistral `pixtral-12b-2409`），
//! 对外表现与 `/solve`、`/solve_text` 服务一致：校验失败或调用失败时返回 `{"error": ...}`。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 图片以 `data:<mime>;base64,...` 的形式随用户消息发送

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequestArgs, ImageDetail,
        ImageUrl,
    },
    Client,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, error, info, warn};

use crate::clients::SolverService;
use crate::config::Config;
use crate::error::TransportError;
use crate::models::upload::{allowed_extensions, mime_type_for};
use crate::models::{ImageUpload, ServiceResponse};
use crate::utils::logging::truncate_text;

/// 系统提示词
pub const SYSTEM_PROMPT: &str = r#"你是一名数学解题助手。
请仔细分析图片或文本中的数学题，逐步求解，并给出详细的解题过程。
务必写出所有中间步骤和最终答案。

所有数学表达式都使用 LaTeX，公式用双美元符号包裹：$$...$$
需要单独成行显示的公式使用 \[ ... \]
行内公式使用 \( ... \)

示例：
1. "化简分式 $$\frac{a^2 + 2ab + b^2}{a + b} = \frac{(a+b)^2}{a+b} = a + b$$"
2. "\[ P = \frac{1}{4} + \frac{1}{2} + 1 = \frac{7}{4} \]"

支持代数、几何、三角、微积分和统计题目。
如果图片中没有数学题，请直接说明。
回答要清晰、有条理。"#;

/// 没有补充说明时使用的默认提示
pub const DEFAULT_IMAGE_PROMPT: &str = "请解出这张图片中的数学题，并逐步说明解题过程。";

/// 后端处理失败时返回给前端的提示
pub const PROCESSING_FAILED: &str = "处理请求时发生错误";

/// LLM 解题后端
pub struct LlmSolver {
    client: Client<OpenAIConfig>,
    model_name: String,
    max_image_bytes: u64,
}

impl LlmSolver {
    /// 创建新的 LLM 解题后端
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            max_image_bytes: config.max_image_bytes,
        }
    }

    /// 调用 LLM，原样返回模型回复
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `image_url`: 图片地址（可选），可以是 data URL
    async fn send_to_llm(&self, user_message: &str, image_url: Option<String>) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息: {}", truncate_text(user_message, 80));

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()?;

        let user_msg = match image_url {
            Some(url) => {
                let content_parts = vec![
                    ChatCompletionRequestUserMessageContentPart::Text(
                        ChatCompletionRequestMessageContentPartText {
                            text: user_message.to_string(),
                        },
                    ),
                    ChatCompletionRequestUserMessageContentPart::ImageUrl(
                        ChatCompletionRequestMessageContentPartImage {
                            image_url: ImageUrl {
                                url,
                                detail: Some(ImageDetail::Auto),
                            },
                        },
                    ),
                ];
                ChatCompletionRequestUserMessageArgs::default()
                    .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
                    .build()?
            }
            None => ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()?,
        };

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        reply_content(
            response
                .choices
                .first()
                .and_then(|choice| choice.message.content.clone()),
        )
    }

    /// 服务端对上传图片的校验，失败时返回给用户的提示
    fn check_upload(&self, upload: &ImageUpload) -> Option<String> {
        if upload.file_name.is_empty() {
            return Some("未选择文件".to_string());
        }
        if mime_type_for(&upload.file_name).is_none() {
            return Some(format!("允许的文件格式: {}", allowed_extensions().join(", ")));
        }
        if upload.size() > self.max_image_bytes {
            return Some(format!(
                "文件大小超过上限 ({} MB)",
                self.max_image_bytes / (1024 * 1024)
            ));
        }
        None
    }

    async fn solve(&self, user_message: &str, image_url: Option<String>) -> ServiceResponse {
        info!("📤 正在向 LLM 发送题目...");
        match self.send_to_llm(user_message, image_url).await {
            Ok(solution) => {
                info!("✓ 收到 LLM 回复，长度 {} 字符", solution.chars().count());
                ServiceResponse {
                    message: Some("题目处理成功".to_string()),
                    ..ServiceResponse::solved(solution)
                }
            }
            Err(e) => {
                error!("❌ 解题失败: {}", e);
                ServiceResponse::failure(PROCESSING_FAILED)
            }
        }
    }
}

impl SolverService for LlmSolver {
    async fn solve_image(
        &self,
        upload: &ImageUpload,
        comment: Option<&str>,
    ) -> Result<ServiceResponse, TransportError> {
        if let Some(message) = self.check_upload(upload) {
            warn!("图片校验失败: {}", message);
            return Ok(ServiceResponse::failure(message));
        }

        let prompt = comment.unwrap_or(DEFAULT_IMAGE_PROMPT);
        Ok(self.solve(prompt, Some(data_url(upload))).await)
    }

    async fn solve_text(&self, problem: &str) -> Result<ServiceResponse, TransportError> {
        if problem.trim().is_empty() {
            return Ok(ServiceResponse::failure("题目文本不能为空"));
        }
        Ok(self.solve(problem, None).await)
    }
}

/// 取出模型回复，内容原样保留（包括首尾空白）
fn reply_content(content: Option<String>) -> Result<String> {
    content.ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))
}

/// 把图片编码为 data URL
pub fn data_url(upload: &ImageUpload) -> String {
    format!(
        "data:{};base64,{}",
        upload.mime_type,
        STANDARD.encode(&upload.bytes)
    )
}

pub mod http_client;
pub mod llm_client;

pub use http_client::HttpSolverClient;
pub use llm_client::LlmSolver;

use crate::error::TransportError;
use crate::models::{ImageUpload, ServiceResponse};

/// 解题服务
///
/// 返回 `Ok` 表示拿到了一份可解析的响应（无论成功还是带 `error`），
/// 网络失败、超时或响应无法解析时返回 `TransportError`。
#[allow(async_fn_in_trait)]
pub trait SolverService {
    /// 提交图片题目
    async fn solve_image(
        &self,
        upload: &ImageUpload,
        comment: Option<&str>,
    ) -> Result<ServiceResponse, TransportError>;

    /// 提交文本题目
    async fn solve_text(&self, problem: &str) -> Result<ServiceResponse, TransportError>;
}

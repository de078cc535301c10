//! 解题请求流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整处理流程
//!
//! 流程顺序：
//! 1. 检查前置条件（不满足则保持 Idle，不发送请求）
//! 2. 显示解答区域和加载提示
//! 3. 调用解题服务（唯一的挂起点，受超时限制）
//! 4. 分类响应 → 渲染结果或上报错误
//!
//! 开启 single-flight 时，只有最新一次提交的结果会被展示，过期的响应直接丢弃。

use std::cell::Cell;
use std::fmt;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::clients::SolverService;
use crate::config::Config;
use crate::error::TransportError;
use crate::formatter::format_solution;
use crate::models::{ServiceResponse, SolveRequest, Submission, SubmissionMode};
use crate::services::presentation::{ErrorReporter, PresentationSink};
use crate::workflow::classifier::{classify, Classification};
use crate::workflow::submission_ctx::{RequestState, SubmissionCtx};

/// 网络失败、超时或响应无法解析时展示给用户的提示
pub const TRANSPORT_FAILURE_MESSAGE: &str = "处理请求时发生错误，请稍后重试。";

/// 失败原因
#[derive(Debug)]
pub enum Failure {
    /// 服务端在 `error` 字段中给出的信息
    Service(String),
    /// 传输层错误
    Transport(TransportError),
}

impl Failure {
    /// 展示给用户的信息
    pub fn user_message(&self) -> &str {
        match self {
            Failure::Service(message) => message,
            Failure::Transport(_) => TRANSPORT_FAILURE_MESSAGE,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Service(message) => write!(f, "服务端返回错误: {}", message),
            Failure::Transport(e) => write!(f, "{}", e),
        }
    }
}

/// 一次请求的结果
#[derive(Debug)]
pub enum SolveOutcome {
    /// 原始解答文本（尚未格式化）
    Solved(String),
    Failed(Failure),
}

impl From<Classification> for SolveOutcome {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Success(solution) => SolveOutcome::Solved(solution),
            Classification::Failed(message) => SolveOutcome::Failed(Failure::Service(message)),
        }
    }
}

impl From<Result<ServiceResponse, TransportError>> for SolveOutcome {
    fn from(result: Result<ServiceResponse, TransportError>) -> Self {
        match result {
            Ok(response) => classify(&response).into(),
            Err(e) => SolveOutcome::Failed(Failure::Transport(e)),
        }
    }
}

/// 解题会话
///
/// - 持有解题服务、展示端和错误提示
/// - 每次提交生成一个 `SubmissionCtx`，不保留全局"当前请求"
/// - 单线程使用，序号放在 `Cell` 中，不需要锁
pub struct SolveSession<S, P, R> {
    service: S,
    sink: P,
    reporter: R,
    generation: Cell<u64>,
    single_flight: bool,
    request_timeout: Option<Duration>,
}

impl<S, P, R> SolveSession<S, P, R>
where
    S: SolverService,
    P: PresentationSink,
    R: ErrorReporter,
{
    /// 创建新的解题会话
    ///
    /// # 参数
    /// - `service`: 解题服务
    /// - `sink`: 解答展示端
    /// - `reporter`: 错误提示
    /// - `config`: 读取 single-flight 开关和请求超时
    pub fn new(service: S, sink: P, reporter: R, config: &Config) -> Self {
        Self {
            service,
            sink,
            reporter,
            generation: Cell::new(0),
            single_flight: config.single_flight,
            request_timeout: config.request_timeout(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 最近一次已发出的提交序号
    pub fn current_generation(&self) -> u64 {
        self.generation.get()
    }

    /// 处理一次提交
    ///
    /// # 返回
    /// 返回本次提交的上下文，`state` 为最终状态：
    /// 前置条件不满足时为 `Idle`（序号为 0），否则为 `Success` / `Failed` / `Superseded`
    pub async fn submit(&self, submission: &Submission) -> SubmissionCtx {
        let mode = submission.mode();

        let request = match submission.request() {
            Ok(request) => request,
            Err(e) => {
                debug!("前置条件不满足 ({}): {}，不发送请求", mode, e);
                // 未发送的提交不占用序号
                return SubmissionCtx::new(0, mode);
            }
        };

        let mut ctx = self.begin(mode);
        let outcome = self.dispatch(&ctx, request).await;
        self.render(&mut ctx, outcome);
        ctx
    }

    /// Idle → Pending
    fn begin(&self, mode: SubmissionMode) -> SubmissionCtx {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let mut ctx = SubmissionCtx::new(generation, mode);
        ctx.state = RequestState::Pending;
        info!("{} 📤 提交题目", ctx);

        self.sink.show_solution_area();
        self.sink.hide_content();
        self.sink.show_loading();
        ctx
    }

    /// 调用解题服务，超时按传输错误处理
    async fn dispatch(&self, ctx: &SubmissionCtx, request: SolveRequest<'_>) -> SolveOutcome {
        let call = async {
            match request {
                SolveRequest::Image { upload, comment } => {
                    self.service.solve_image(upload, comment).await
                }
                SolveRequest::Text { problem } => self.service.solve_text(problem).await,
            }
        };

        let result = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                Err(TransportError::Timeout {
                    endpoint: ctx.mode.endpoint().to_string(),
                    secs: limit.as_secs(),
                })
            }),
            None => call.await,
        };

        if let Err(e) = &result {
            error!("{} ❌ 请求失败: {}", ctx, e);
        }
        result.into()
    }

    /// Pending → Success / Failed / Superseded
    fn render(&self, ctx: &mut SubmissionCtx, outcome: SolveOutcome) {
        let latest = self.generation.get();
        if self.single_flight && ctx.generation != latest {
            ctx.state = RequestState::Superseded;
            info!("{} ⏭️ 已有更新的提交 #{}，丢弃本次结果", ctx, latest);
            return;
        }

        self.sink.hide_loading();

        match outcome {
            SolveOutcome::Solved(solution) => {
                self.sink.show_content();
                self.sink.render(&format_solution(&solution));
                if let Err(e) = self.sink.typeset() {
                    warn!("{} ⚠️ 公式排版失败: {}", ctx, e);
                }
                self.sink.scroll_into_view();

                ctx.state = RequestState::Success;
                info!("{} ✓ 解题完成", ctx);
            }
            SolveOutcome::Failed(failure) => {
                self.sink.hide_solution_area();
                self.reporter.report(failure.user_message());

                ctx.state = RequestState::Failed;
                warn!("{} ❌ 解题失败: {}", ctx, failure);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let service = Failure::Service("bad input".to_string());
        assert_eq!(service.user_message(), "bad input");

        let timeout = Failure::Transport(TransportError::Timeout {
            endpoint: "/solve_text".to_string(),
            secs: 120,
        });
        assert_eq!(timeout.user_message(), TRANSPORT_FAILURE_MESSAGE);
    }

    #[test]
    fn test_outcome_from_response() {
        let solved: SolveOutcome = Ok(ServiceResponse::solved("x = 2")).into();
        assert!(matches!(solved, SolveOutcome::Solved(s) if s == "x = 2"));

        let failed: SolveOutcome = Ok(ServiceResponse::failure("")).into();
        assert!(matches!(failed, SolveOutcome::Failed(Failure::Service(m)) if m.is_empty()));

        let parse_error = serde_json::from_str::<ServiceResponse>("not json").unwrap_err();
        let transport: SolveOutcome =
            Err(TransportError::invalid_response("/solve", parse_error)).into();
        assert!(matches!(
            transport,
            SolveOutcome::Failed(Failure::Transport(TransportError::InvalidResponse { .. }))
        ));
    }
}

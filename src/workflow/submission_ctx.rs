//! 提交上下文
//!
//! 封装"这是第几次提交、用的什么模式、现在处于什么状态"这一信息

use std::fmt::Display;

use crate::models::SubmissionMode;

/// 请求状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestState {
    /// 未发送（前置条件不满足时保持此状态）
    Idle,
    /// 已发送，等待响应
    Pending,
    /// 解题成功，结果已渲染
    Success,
    /// 解题失败，错误已上报
    Failed,
    /// 已有更新的提交，本次结果被丢弃
    Superseded,
}

impl RequestState {
    pub fn name(self) -> &'static str {
        match self {
            RequestState::Idle => "未发送",
            RequestState::Pending => "等待中",
            RequestState::Success => "成功",
            RequestState::Failed => "失败",
            RequestState::Superseded => "已被取代",
        }
    }

    /// 是否为终止状态
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestState::Success | RequestState::Failed | RequestState::Superseded
        )
    }
}

impl Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 提交上下文
///
/// 每次提交一份，取代全局的"当前文件/当前状态"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionCtx {
    /// 提交序号（单调递增，用于丢弃过期响应）
    pub generation: u64,

    /// 提交方式
    pub mode: SubmissionMode,

    /// 当前状态
    pub state: RequestState,
}

impl SubmissionCtx {
    /// 创建新的提交上下文，初始状态为 Idle
    pub fn new(generation: u64, mode: SubmissionMode) -> Self {
        Self {
            generation,
            mode,
            state: RequestState::Idle,
        }
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[提交 #{} 模式#{}]", self.generation, self.mode)
    }
}

//! 响应分类

use crate::models::ServiceResponse;

/// 分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// 解题成功，携带原始解答文本
    Success(String),
    /// 服务端报告的错误信息
    Failed(String),
}

/// 判断服务端响应是成功还是失败
///
/// 只要 `error` 字段存在（哪怕是空字符串）就算失败；
/// 否则取 `solution`，缺失时按空字符串处理
pub fn classify(response: &ServiceResponse) -> Classification {
    match &response.error {
        Some(message) => Classification::Failed(message.clone()),
        None => Classification::Success(response.solution.clone().unwrap_or_default()),
    }
}

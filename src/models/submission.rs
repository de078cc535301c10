use std::fmt;

use crate::error::ValidationError;
use crate::models::upload::ImageUpload;

/// 提交方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionMode {
    /// 上传图片
    Image,
    /// 输入文本
    Text,
}

impl SubmissionMode {
    /// 获取显示名称
    pub fn name(self) -> &'static str {
        match self {
            SubmissionMode::Image => "图片",
            SubmissionMode::Text => "文本",
        }
    }

    /// 对应的服务端路径
    pub fn endpoint(self) -> &'static str {
        match self {
            SubmissionMode::Image => "/solve",
            SubmissionMode::Text => "/solve_text",
        }
    }
}

impl fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 通过前置条件后、按模式构建好的请求内容
#[derive(Debug, Clone, Copy)]
pub enum SolveRequest<'a> {
    Image {
        upload: &'a ImageUpload,
        comment: Option<&'a str>,
    },
    /// 去除首尾空白后的题目文本
    Text { problem: &'a str },
}

/// 一次用户提交
#[derive(Debug, Clone)]
pub enum Submission {
    /// 图片题目，附带可选的补充说明
    Image {
        file: Option<ImageUpload>,
        comment: String,
    },
    /// 文本题目
    Text { problem: String },
}

impl Submission {
    pub fn image(file: Option<ImageUpload>, comment: impl Into<String>) -> Self {
        Submission::Image {
            file,
            comment: comment.into(),
        }
    }

    pub fn text(problem: impl Into<String>) -> Self {
        Submission::Text {
            problem: problem.into(),
        }
    }

    pub fn mode(&self) -> SubmissionMode {
        match self {
            Submission::Image { .. } => SubmissionMode::Image,
            Submission::Text { .. } => SubmissionMode::Text,
        }
    }

    /// 提交前置条件：图片模式需要已接受的文件，文本模式需要非空文本
    pub fn check(&self) -> Result<(), ValidationError> {
        self.request().map(|_| ())
    }

    /// 检查前置条件并构建对应模式的请求
    pub fn request(&self) -> Result<SolveRequest<'_>, ValidationError> {
        match self {
            Submission::Image { file: None, .. } => Err(ValidationError::MissingFile),
            Submission::Image {
                file: Some(upload), ..
            } => Ok(SolveRequest::Image {
                upload,
                comment: self.comment(),
            }),
            Submission::Text { problem } => match problem.trim() {
                "" => Err(ValidationError::EmptyText),
                trimmed => Ok(SolveRequest::Text { problem: trimmed }),
            },
        }
    }

    /// 去除首尾空白后的补充说明，为空时不发送
    pub fn comment(&self) -> Option<&str> {
        match self {
            Submission::Image { comment, .. } => {
                Some(comment.trim()).filter(|c| !c.is_empty())
            }
            Submission::Text { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> ImageUpload {
        ImageUpload::new("task.png", vec![1, 2, 3], 1024).unwrap()
    }

    #[test]
    fn test_image_requires_file() {
        let err = Submission::image(None, "").check().unwrap_err();
        assert!(matches!(err, ValidationError::MissingFile));
        assert!(Submission::image(Some(upload()), "").check().is_ok());
    }

    #[test]
    fn test_text_requires_non_blank() {
        assert!(matches!(
            Submission::text("  \n\t").check(),
            Err(ValidationError::EmptyText)
        ));
        assert!(Submission::text(" 2+2 ").check().is_ok());
    }

    #[test]
    fn test_blank_comment_is_dropped() {
        assert_eq!(Submission::image(Some(upload()), "   ").comment(), None);
        assert_eq!(
            Submission::image(Some(upload()), "  只求第二问 ").comment(),
            Some("只求第二问")
        );
    }

    #[test]
    fn test_text_request_is_trimmed() {
        let submission = Submission::text("  解方程 x + 1 = 2\n");
        match submission.request().unwrap() {
            SolveRequest::Text { problem } => assert_eq!(problem, "解方程 x + 1 = 2"),
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_image_request_carries_comment() {
        let submission = Submission::image(Some(upload()), " 第二问 ");
        match submission.request().unwrap() {
            SolveRequest::Image { upload, comment } => {
                assert_eq!(upload.file_name, "task.png");
                assert_eq!(comment, Some("第二问"));
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_mode_endpoints() {
        assert_eq!(Submission::text("x").mode().endpoint(), "/solve_text");
        assert_eq!(SubmissionMode::Image.endpoint(), "/solve");
        assert_eq!(SubmissionMode::Image.to_string(), "图片");
    }
}

use phf::phf_map;
use std::path::Path;

use crate::error::ValidationError;

/// 默认图片大小上限：5 MB
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// 允许的扩展名 → MIME 类型
static IMAGE_MIME_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "png" => "image/png",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "gif" => "image/gif",
};

/// 已通过校验的待上传图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// 按文件名推断 MIME 类型并校验
    pub fn new(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        max_bytes: u64,
    ) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        let mime_type = mime_type_for(&file_name).ok_or_else(|| {
            ValidationError::UnsupportedType {
                file_name: file_name.clone(),
            }
        })?;
        check_size(bytes.len() as u64, max_bytes)?;

        Ok(Self {
            file_name,
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// 根据扩展名（不区分大小写）返回 MIME 类型，不支持的类型返回 None
pub fn mime_type_for(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?;
    IMAGE_MIME_TYPES
        .get(extension.to_ascii_lowercase().as_str())
        .copied()
}

/// 允许的扩展名，按字母排序
pub fn allowed_extensions() -> Vec<&'static str> {
    let mut extensions: Vec<&'static str> = IMAGE_MIME_TYPES.keys().copied().collect();
    extensions.sort_unstable();
    extensions
}

pub fn check_size(size: u64, limit: u64) -> Result<(), ValidationError> {
    if size > limit {
        return Err(ValidationError::TooLarge { size, limit });
    }
    Ok(())
}

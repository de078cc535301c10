use crate::error::ValidationError;
use crate::models::upload::{check_size, mime_type_for, ImageUpload};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// 从磁盘加载图片并校验类型与大小
///
/// 先按扩展名检查类型，再按文件元数据检查大小，两项都通过后才读取内容。
pub async fn load_image(path: &Path, max_bytes: u64) -> Result<ImageUpload, ValidationError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    if mime_type_for(&file_name).is_none() {
        return Err(ValidationError::UnsupportedType { file_name });
    }

    let metadata = fs::metadata(path)
        .await
        .map_err(|e| ValidationError::unreadable(path.display().to_string(), e))?;
    check_size(metadata.len(), max_bytes)?;

    let bytes = fs::read(path)
        .await
        .map_err(|e| ValidationError::unreadable(path.display().to_string(), e))?;
    debug!("读取图片 {}: {} 字节", path.display(), bytes.len());

    let upload = ImageUpload::new(file_name, bytes, max_bytes)?;
    info!("✓ 已选择图片: {} ({})", upload.file_name, upload.mime_type);

    Ok(upload)
}

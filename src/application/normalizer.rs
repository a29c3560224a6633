//! Image Normalizer
//!
//! 内联图片（data URL）上传到图床后换成 URL，已托管的 URL 原样返回

use std::sync::Arc;

use crate::application::ports::{ImageHostPort, UploadError};

/// 内联图片前缀
pub const INLINE_IMAGE_PREFIX: &str = "data:image/";

pub fn is_inline_image(image_ref: &str) -> bool {
    image_ref.starts_with(INLINE_IMAGE_PREFIX)
}

pub struct ImageNormalizer {
    image_host: Arc<dyn ImageHostPort>,
}

impl ImageNormalizer {
    pub fn new(image_host: Arc<dyn ImageHostPort>) -> Self {
        Self { image_host }
    }

    pub async fn normalize(&self, image_ref: &str) -> Result<String, UploadError> {
        if !is_inline_image(image_ref) {
            return Ok(image_ref.to_string());
        }

        tracing::debug!(data_url_len = image_ref.len(), "Uploading inline image");
        let url = self.image_host.upload(image_ref).await?;
        tracing::info!(url = %url, "Inline image uploaded");

        Ok(url)
    }
}

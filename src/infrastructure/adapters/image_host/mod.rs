//! Image Host Adapter - 百度图床上传客户端

mod baidu_upload_client;
mod upload_token;

pub use baidu_upload_client::*;
pub use upload_token::{sign_upload, UPLOAD_SCENE};

//! ModelScope Adapter - 异步图像生成客户端

mod modelscope_client;

pub use modelscope_client::*;

//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod image_host;
pub mod modelscope;

pub use image_host::*;
pub use modelscope::*;

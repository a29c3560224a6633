//! Upload Token - 百度图床上传签名
//!
//! token = md5hex(md5hex(content) + "pic_edit" + timestamp) 的前 5 位。
//! 必须与服务端校验逻辑逐字节一致，不能调整拼接顺序、摘要算法或截断长度。

/// 场景标识，同时作为签名盐值，表单中的 `scene` 必须与之一致
pub const UPLOAD_SCENE: &str = "pic_edit";

/// 截断长度
const TOKEN_LEN: usize = 5;

fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

/// 计算上传 token
pub fn sign_upload(content: &str, timestamp_millis: &str) -> String {
    let inner = md5_hex(content);
    let mut token = md5_hex(&format!("{}{}{}", inner, UPLOAD_SCENE, timestamp_millis));
    token.truncate(TOKEN_LEN);
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            sign_upload("data:image/png;base64,iVBORw0KGgo=", "1735400465000"),
            "3766e"
        );
        assert_eq!(sign_upload("", "0"), "e0760");
    }

    #[test]
    fn test_deterministic_and_five_hex_chars() {
        let a = sign_upload("data:image/jpeg;base64,/9j/4AAQ", "1700000000123");
        let b = sign_upload("data:image/jpeg;base64,/9j/4AAQ", "1700000000123");

        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_timestamp_changes_token() {
        let a = sign_upload("data:image/png;base64,AAAA", "1700000000000");
        let b = sign_upload("data:image/png;base64,AAAA", "1700000000001");
        assert_ne!(a, b);
    }
}

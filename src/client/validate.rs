use super::ClientError;

/// Reject empty required fields before any request is sent.
pub fn required(value: &str, message: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::Validation(message.to_string()));
    }
    Ok(())
}

/// Instagram handles: 1-30 characters of letters, digits, '.' or '_'.
pub fn instagram_handle(value: &str) -> Result<(), ClientError> {
    let ok = !value.is_empty()
        && value.len() <= 30
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');

    if !ok {
        return Err(ClientError::Validation(
            "올바른 인스타그램 사용자명 형식이 아닙니다".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        assert!(required("", "msg").is_err());
        assert!(required("   ", "msg").is_err());
        assert!(required("kimchi", "msg").is_ok());
    }

    #[test]
    fn test_required_keeps_message() {
        let err = required("", "사용자명을 입력해주세요").unwrap_err();
        match err {
            ClientError::Validation(msg) => assert_eq!(msg, "사용자명을 입력해주세요"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_handle_format() {
        assert!(instagram_handle("kim.chi_99").is_ok());
        assert!(instagram_handle("KimChi").is_ok());
        assert!(instagram_handle("").is_err());
        assert!(instagram_handle("has space").is_err());
        assert!(instagram_handle("너무한글").is_err());
        assert!(instagram_handle(&"a".repeat(31)).is_err());
        assert!(instagram_handle(&"a".repeat(30)).is_ok());
    }
}

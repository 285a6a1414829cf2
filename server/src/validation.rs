use crate::error::ApiError;

/// Maximum text length for TTS requests
const MAX_TEXT_LENGTH: usize = 5000;
/// Maximum voice name length
const MAX_VOICE_NAME_LENGTH: usize = 64;

/// Validate TTS request
pub fn validate_tts_request(text: &str, voice_name: &str) -> Result<(), ApiError> {
    if text.is_empty() {
        return Err(ApiError::InvalidInput(
            "The 'text' field cannot be empty.".to_string(),
        ));
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "Text too long (max {} characters)",
            MAX_TEXT_LENGTH
        )));
    }

    if !is_valid_voice_name(voice_name) {
        return Err(ApiError::InvalidInput(format!(
            "Invalid voice name: '{}'. Expected a prebuilt voice such as Zephyr, Puck or Kore",
            voice_name
        )));
    }

    Ok(())
}

/// Prebuilt voice names are short ASCII identifiers (e.g. Zephyr, Puck).
fn is_valid_voice_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_VOICE_NAME_LENGTH
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tts_request_valid() {
        assert!(validate_tts_request("Hello", "Zephyr").is_ok());
        assert!(validate_tts_request("Guten Tag", "Kore").is_ok());
    }

    #[test]
    fn test_validate_tts_request_empty_text() {
        let result = validate_tts_request("", "Zephyr");
        match result {
            Err(ApiError::InvalidInput(msg)) => assert!(msg.contains("cannot be empty")),
            _ => panic!("expected invalid input"),
        }

        // only the empty string is rejected; whitespace is passed upstream
        assert!(validate_tts_request("   \n", "Zephyr").is_ok());
    }

    #[test]
    fn test_validate_tts_request_too_long() {
        let long_text = "a".repeat(6000);
        let result = validate_tts_request(&long_text, "Zephyr");
        match result {
            Err(ApiError::InvalidInput(msg)) => assert!(msg.contains("too long")),
            _ => panic!("expected invalid input"),
        }

        // counted in characters, not bytes
        assert!(validate_tts_request(&"é".repeat(MAX_TEXT_LENGTH), "Zephyr").is_ok());
    }

    #[test]
    fn test_validate_voice_name() {
        assert!(validate_tts_request("Hello", "").is_err());
        assert!(validate_tts_request("Hello", "Zephyr; rm").is_err());
        assert!(validate_tts_request("Hello", &"a".repeat(65)).is_err());
        assert!(validate_tts_request("Hello", "en-US_voice1").is_ok());
    }
}

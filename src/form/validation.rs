pub const NICKNAME_MIN_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NicknameError {
    #[error("Nickname must be at least {min} characters.")]
    TooShort { min: usize },
}

/// An empty (or whitespace-only) nickname is not an error by itself; it only
/// keeps the form from being submitted.
pub fn validate_nickname(raw: &str) -> Result<(), NicknameError> {
    let chars = raw.trim().chars().count();
    if chars == 0 || chars >= NICKNAME_MIN_CHARS {
        Ok(())
    } else {
        Err(NicknameError::TooShort {
            min: NICKNAME_MIN_CHARS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_are_valid() {
        assert_eq!(validate_nickname(""), Ok(()));
        assert_eq!(validate_nickname("   "), Ok(()));
    }

    #[test]
    fn single_character_is_too_short() {
        let err = validate_nickname(" x ").unwrap_err();
        assert_eq!(err, NicknameError::TooShort { min: 2 });
        assert_eq!(err.to_string(), "Nickname must be at least 2 characters.");
    }

    #[test]
    fn two_or_more_characters_pass() {
        for nickname in ["ab", " El Elegido ", "ñu", "R2-D2"] {
            assert_eq!(validate_nickname(nickname), Ok(()), "{nickname:?}");
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(validate_nickname("é").is_err());
    }
}

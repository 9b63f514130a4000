pub fn is_valid_email(email: &str) -> bool {
    fast_chemail::is_valid_email(email)
}

/// Returns the trimmed text, or `None` if nothing is left.
pub fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_email() {
        assert!(is_valid_email("maria@example.com"));
        assert!(!is_valid_email("maria@example"));
        assert!(!is_valid_email("example.com"));
    }

    #[test]
    fn trim_to_non_blank() {
        assert_eq!(Some("olá"), non_blank("  olá "));
        assert_eq!(None, non_blank("   "));
        assert_eq!(None, non_blank(""));
    }
}

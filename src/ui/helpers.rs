//! Small UI helpers shared by panels and dialogs.

/// Keep the tail of `text`, prefixed with `...`, when it is longer than `max_chars` characters.
///
/// Counts characters, not bytes, so multi-byte paths never split inside a character.
pub fn truncate_start(text: &str, max_chars: usize) -> String {
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let tail: String = text.chars().skip(len - keep).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_start_short_text_unchanged() {
        assert_eq!(truncate_start("/projects/demo", 50), "/projects/demo");
    }

    #[test]
    fn test_truncate_start_keeps_tail() {
        let text = "a".repeat(40) + "/Assets";
        let truncated = truncate_start(&text, 20);
        assert_eq!(truncated.chars().count(), 20);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with("/Assets"));
    }

    #[test]
    fn test_truncate_start_multibyte_path() {
        let path = "/ホーム/プロジェクト/アバター/モデル/テスト/シーン/アバター";
        assert!(path.len() > 50);

        let truncated = truncate_start(path, 20);

        assert_eq!(truncated.chars().count(), 20);
        assert!(truncated.ends_with("アバター"));
    }
}

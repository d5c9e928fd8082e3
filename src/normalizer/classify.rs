use crate::models::{RecognitionCategory, RecognitionMode, RecognizedText};

/// Content longer than this many characters is shown as extracted text.
pub const TEXT_LENGTH_THRESHOLD: usize = 50;

/// Advisory display category for a recognition result. Text mode, or content
/// longer than [`TEXT_LENGTH_THRESHOLD`] characters, reads as OCR output.
pub fn classify_recognition(text: &str, mode: RecognitionMode) -> RecognitionCategory {
    if mode == RecognitionMode::Text || text.chars().count() > TEXT_LENGTH_THRESHOLD {
        RecognitionCategory::Text
    } else {
        RecognitionCategory::General
    }
}

pub fn apply_classification(result: RecognizedText) -> RecognizedText {
    let category = classify_recognition(&result.text, result.mode);
    RecognizedText { category, ..result }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_object_result_stays_general() {
        assert_eq!(
            classify_recognition("hello", RecognitionMode::Object),
            RecognitionCategory::General
        );
        let exactly = "a".repeat(50);
        assert_eq!(
            classify_recognition(&exactly, RecognitionMode::Object),
            RecognitionCategory::General
        );
    }

    #[test]
    fn test_long_or_text_mode_becomes_text() {
        let long = "a".repeat(51);
        assert_eq!(
            classify_recognition(&long, RecognitionMode::Object),
            RecognitionCategory::Text
        );
        assert_eq!(
            classify_recognition("hi", RecognitionMode::Text),
            RecognitionCategory::Text
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 20 CJK characters, 60 bytes
        let cjk = "图".repeat(20);
        assert_eq!(
            classify_recognition(&cjk, RecognitionMode::Object),
            RecognitionCategory::General
        );
    }

    #[test]
    fn test_apply_keeps_text() {
        let result = RecognizedText {
            text: "x".repeat(60),
            mode: RecognitionMode::Object,
            category: RecognitionCategory::General,
        };
        let classified = apply_classification(result.clone());
        assert_eq!(classified.text, result.text);
        assert_eq!(classified.category, RecognitionCategory::Text);
        assert_eq!(classified.tags()[0], "OCR");
    }
}

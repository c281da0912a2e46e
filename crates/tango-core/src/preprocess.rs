use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default lookup-key normalisation
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC), full-width ASCII and half-width kana fold here
        let text: String = text.nfkc().collect();

        text.replace(['\n', '\r'], "").trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfkc_folds_width_variants() {
        let p = DefaultPreprocessor;
        assert_eq!(p.process("  ｶﾀｶﾅ\n"), "カタカナ");
        assert_eq!(p.process("ＡＢＣ"), "ABC");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(DefaultPreprocessor.process(" \r\n "), "");
    }
}

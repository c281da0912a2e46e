/// CJK ideographs: unified block, extension A, compatibility and the
/// supplementary-plane extensions. The iteration mark `々` is not a kanji.
pub fn is_kanji(c: char) -> bool {
    matches!(
        c,
        '\u{3400}'..='\u{4dbf}'
            | '\u{4e00}'..='\u{9fff}'
            | '\u{f900}'..='\u{faff}'
            | '\u{20000}'..='\u{2fa1f}'
            | '\u{30000}'..='\u{3134f}'
    )
}

/// Distinct kanji of `text` in order of first appearance
pub fn constituent_kanji(text: &str) -> Vec<char> {
    let mut kanji = Vec::new();
    for c in text.chars().filter(|&c| is_kanji(c)) {
        if !kanji.contains(&c) {
            kanji.push(c);
        }
    }
    kanji
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constituents_ordered_and_distinct() {
        assert_eq!(constituent_kanji("曜日"), vec!['曜', '日']);
        assert_eq!(constituent_kanji("人々の人"), vec!['人']);
        assert_eq!(constituent_kanji("食べる"), vec!['食']);
        assert!(constituent_kanji("ありがとう").is_empty());
    }

    #[test]
    fn test_kanji_ranges() {
        assert!(is_kanji('日'));
        // extension A
        assert!(is_kanji('㐂'));
        // extension B
        assert!(is_kanji('𠮟'));
        assert!(!is_kanji('カ'));
        assert!(!is_kanji('々'));
        assert!(!is_kanji('ー'));
        assert_eq!(constituent_kanji("㐂び"), vec!['㐂']);
        assert_eq!(constituent_kanji("𠮟る"), vec!['𠮟']);
    }
}

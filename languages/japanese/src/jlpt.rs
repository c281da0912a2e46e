use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JlptLevel {
    N5, // Beginner
    N4, // Elementary
    N3, // Intermediate
    N2, // Upper intermediate
    N1, // Advanced
}

impl JlptLevel {
    /// Parse level from string, `N3`, `n3` and `jlpt-n3` all accepted
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        match s.strip_prefix("JLPT-").unwrap_or(s.as_str()) {
            "N5" => Some(JlptLevel::N5),
            "N4" => Some(JlptLevel::N4),
            "N3" => Some(JlptLevel::N3),
            "N2" => Some(JlptLevel::N2),
            "N1" => Some(JlptLevel::N1),
            _ => None,
        }
    }

    /// Map a Kanjidic2 pre-2010 level (4 easiest .. 1 hardest).
    ///
    /// Old level 2 covers both N3 and N2; school grades 1-6 go to N3.
    pub fn from_kanjidic(old_level: u8, grade: Option<u8>) -> Option<Self> {
        match old_level {
            4 => Some(JlptLevel::N5),
            3 => Some(JlptLevel::N4),
            2 => match grade {
                Some(g) if (1..=6).contains(&g) => Some(JlptLevel::N3),
                _ => Some(JlptLevel::N2),
            },
            1 => Some(JlptLevel::N1),
            _ => None,
        }
    }

    /// Get level string
    pub fn as_str(&self) -> &'static str {
        match self {
            JlptLevel::N5 => "N5",
            JlptLevel::N4 => "N4",
            JlptLevel::N3 => "N3",
            JlptLevel::N2 => "N2",
            JlptLevel::N1 => "N1",
        }
    }

}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deck bucket an entry is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeckLevel {
    Jlpt(JlptLevel),
    /// Words written without kanji and carrying no level tag
    KanaOnly,
    NonJlpt,
}

impl DeckLevel {
    pub fn jlpt(&self) -> Option<JlptLevel> {
        match self {
            DeckLevel::Jlpt(level) => Some(*level),
            _ => None,
        }
    }

    /// Card tag
    pub fn tag(&self) -> &'static str {
        match self {
            DeckLevel::Jlpt(level) => level.as_str(),
            DeckLevel::KanaOnly => "kana",
            DeckLevel::NonJlpt => "non_jlpt",
        }
    }

    /// File name component
    pub fn file_label(&self) -> &'static str {
        match self {
            DeckLevel::Jlpt(level) => level.as_str(),
            DeckLevel::KanaOnly => "kana_only",
            DeckLevel::NonJlpt => "non_jlpt",
        }
    }
}

impl fmt::Display for DeckLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kanji carry their level directly or are non-JLPT
pub fn classify_kanji(level: Option<JlptLevel>) -> DeckLevel {
    level.map_or(DeckLevel::NonJlpt, DeckLevel::Jlpt)
}

/// Level of a word.
///
/// An explicit tag wins. Otherwise, when every constituent kanji has a level the
/// hardest one is used; a single unresolved kanji sends the word to non-JLPT.
/// Untagged words written in kana are kana-only. A kanji-form word with no
/// recognised constituent is non-JLPT.
pub fn classify_word<F>(
    explicit: Option<JlptLevel>,
    kana_only: bool,
    constituents: &[char],
    kanji_level: F,
) -> DeckLevel
where
    F: Fn(char) -> Option<JlptLevel>,
{
    if let Some(level) = explicit {
        return DeckLevel::Jlpt(level);
    }
    if kana_only {
        return DeckLevel::KanaOnly;
    }
    if constituents.is_empty() {
        return DeckLevel::NonJlpt;
    }

    let levels: Option<Vec<JlptLevel>> = constituents.iter().map(|&c| kanji_level(c)).collect();
    match levels.and_then(|levels| levels.into_iter().max()) {
        Some(hardest) => DeckLevel::Jlpt(hardest),
        None => DeckLevel::NonJlpt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(c: char) -> Option<JlptLevel> {
        match c {
            '日' => Some(JlptLevel::N5),
            '曜' => Some(JlptLevel::N4),
            '憂' => Some(JlptLevel::N1),
            _ => None,
        }
    }

    #[test]
    fn test_from_kanjidic_mapping() {
        assert_eq!(JlptLevel::from_kanjidic(4, Some(1)), Some(JlptLevel::N5));
        assert_eq!(JlptLevel::from_kanjidic(3, None), Some(JlptLevel::N4));
        assert_eq!(JlptLevel::from_kanjidic(2, Some(6)), Some(JlptLevel::N3));
        assert_eq!(JlptLevel::from_kanjidic(2, Some(8)), Some(JlptLevel::N2));
        assert_eq!(JlptLevel::from_kanjidic(2, None), Some(JlptLevel::N2));
        assert_eq!(JlptLevel::from_kanjidic(1, Some(8)), Some(JlptLevel::N1));
        assert_eq!(JlptLevel::from_kanjidic(5, None), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(JlptLevel::from_str("n3"), Some(JlptLevel::N3));
        assert_eq!(JlptLevel::from_str("jlpt-n1"), Some(JlptLevel::N1));
        assert_eq!(JlptLevel::from_str("N6"), None);
    }

    #[test]
    fn test_hardest_kanji_wins() {
        assert_eq!(classify_word(None, false, &['曜', '日'], levels), DeckLevel::Jlpt(JlptLevel::N4));
        assert_eq!(classify_word(None, false, &['日', '憂'], levels), DeckLevel::Jlpt(JlptLevel::N1));
    }

    #[test]
    fn test_explicit_tag_wins() {
        assert_eq!(
            classify_word(Some(JlptLevel::N5), false, &['憂'], levels),
            DeckLevel::Jlpt(JlptLevel::N5)
        );
        assert_eq!(classify_word(Some(JlptLevel::N3), true, &[], levels), DeckLevel::Jlpt(JlptLevel::N3));
    }

    #[test]
    fn test_unresolved_kanji_is_non_jlpt() {
        assert_eq!(classify_word(None, false, &['日', '鬱'], levels), DeckLevel::NonJlpt);
    }

    #[test]
    fn test_kanji_form_without_constituents_is_non_jlpt() {
        // e.g. the bare iteration mark 々
        assert_eq!(classify_word(None, false, &[], levels), DeckLevel::NonJlpt);
    }

    #[test]
    fn test_kana_only_bucket() {
        let level = classify_word(None, true, &[], levels);
        assert_eq!(level, DeckLevel::KanaOnly);
        assert_eq!(level.file_label(), "kana_only");
        assert_eq!(level.tag(), "kana");
    }

    #[test]
    fn test_bucket_order() {
        let mut buckets = vec![
            DeckLevel::NonJlpt,
            DeckLevel::KanaOnly,
            DeckLevel::Jlpt(JlptLevel::N1),
            DeckLevel::Jlpt(JlptLevel::N5),
        ];
        buckets.sort();
        assert_eq!(buckets[0], DeckLevel::Jlpt(JlptLevel::N5));
        assert_eq!(buckets[3], DeckLevel::NonJlpt);
    }
}

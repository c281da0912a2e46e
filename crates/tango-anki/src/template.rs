use html_escape::encode_text;

const SECTION_SEPARATOR: &str = "<br><br>";

/// Back side of a card: labelled HTML sections separated by blank lines
#[derive(Debug, Clone, Default)]
pub struct BackField {
    sections: Vec<String>,
}

impl BackField {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<b>Label:</b> value` on one line, skipped when `value` is empty.
    /// `value` is escaped.
    pub fn line(mut self, label: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.sections
                .push(format!("<b>{label}:</b> {}", encode_text(value)));
        }
        self
    }

    /// `<b>Label:</b>` followed by pre-rendered HTML on the next line.
    /// `html` is trusted, build it with [`join_lines`] and friends.
    pub fn block(mut self, label: &str, html: &str) -> Self {
        if !html.is_empty() {
            self.sections.push(format!("<b>{label}:</b><br>{html}"));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn render(&self) -> String {
        self.sections.join(SECTION_SEPARATOR)
    }
}

/// Escape dictionary text for card HTML
pub fn escape(text: &str) -> String {
    encode_text(text).into_owned()
}

/// Join HTML fragments with line breaks
pub fn join_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<S> = lines.into_iter().collect();
    let refs: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    refs.join("<br>")
}

/// Numbered example list: `1. 日本語<br>→ English`
pub fn format_examples<'a, I>(examples: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    join_lines(
        examples
            .into_iter()
            .enumerate()
            .map(|(i, (source, target))| {
                format!("{}. {}<br>→ {}", i + 1, escape(source), escape(target))
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_skips_empty_sections() {
        let back = BackField::new()
            .line("Meanings", "one")
            .line("On'yomi", "")
            .line("Kun'yomi", "ひと")
            .render();
        assert_eq!(back, "<b>Meanings:</b> one<br><br><b>Kun'yomi:</b> ひと");
    }

    #[test]
    fn test_line_escapes_value() {
        let back = BackField::new().line("Meanings", "<b>&").render();
        assert_eq!(back, "<b>Meanings:</b> &lt;b&gt;&amp;");
    }

    #[test]
    fn test_examples_numbered() {
        let html = format_examples([("猫だ。", "It's a cat."), ("犬だ。", "It's a dog.")]);
        assert_eq!(html, "1. 猫だ。<br>→ It's a cat.<br>2. 犬だ。<br>→ It's a dog.");
    }

    #[test]
    fn test_block() {
        let back = BackField::new().block("Examples", "1. a").render();
        assert_eq!(back, "<b>Examples:</b><br>1. a");
        assert!(BackField::new().block("Examples", "").is_empty());
    }
}

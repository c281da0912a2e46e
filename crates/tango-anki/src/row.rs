/// One card: the final unit written to a deck file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRow {
    pub front: String,
    pub back: String,
    pub tags: String,
}

impl DeckRow {
    pub fn new(front: impl Into<String>, back: impl Into<String>, tags: &Tags) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            tags: tags.render(),
        }
    }

    /// Check the column contract: non-empty front/back, single-line tags
    pub fn validate(&self) -> Result<(), String> {
        if self.front.trim().is_empty() {
            return Err("empty front field".to_string());
        }
        if self.back.trim().is_empty() {
            return Err(format!("empty back field for '{}'", self.front));
        }
        if self.tags.trim().is_empty() {
            return Err(format!("empty tags for '{}'", self.front));
        }
        if self.tags.contains(['\n', '\r', '\t']) {
            return Err(format!("tags for '{}' contain a line break", self.front));
        }
        Ok(())
    }
}

/// Space-separated Anki tag list, primary (level) tag first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tags {
    tags: Vec<String>,
}

impl Tags {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            tags: vec![sanitize(&primary.into())],
        }
    }

    pub fn push(&mut self, tag: impl AsRef<str>) {
        let tag = sanitize(tag.as_ref());
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn render(&self) -> String {
        self.tags.join(" ")
    }
}

// whitespace separates Anki tags
fn sanitize(tag: &str) -> String {
    tag.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Concatenated page text for one site; one line per non-empty page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Corpus {
    text: String,
    page_count: usize,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty pages contribute nothing.
    pub fn push_page(&mut self, page_text: &str) {
        if page_text.is_empty() {
            return;
        }
        self.text.push_str(page_text);
        self.text.push('\n');
        self.page_count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

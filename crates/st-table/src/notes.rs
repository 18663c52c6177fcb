//! Footnote registry: deduplicating note text -> letter marks.

/// Interns footnote text and hands out stable letter marks in first-use
/// order: a..z, then aa, ab, and so on.
#[derive(Debug, Default)]
pub struct FootnoteRegistry {
    marks: Vec<(String, String)>,
}

impl FootnoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark for `text`, minting a new one on first sight.
    pub fn intern(&mut self, text: &str) -> String {
        if let Some((mark, _)) = self.marks.iter().find(|(_, t)| t == text) {
            return mark.clone();
        }
        let mark = letter_mark(self.marks.len());
        self.marks.push((mark.clone(), text.to_string()));
        mark
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// (mark, text) pairs in first-use order.
    pub fn legend(&self) -> impl Iterator<Item = (&str, &str)> {
        self.marks.iter().map(|(m, t)| (m.as_str(), t.as_str()))
    }
}

/// Spreadsheet-style letter sequence: 0 -> "a", 25 -> "z", 26 -> "aa".
fn letter_mark(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

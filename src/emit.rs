//! Hex and label rendering for the annotated listing.
//!
//! All formatting lives here so the walker only describes structure.
//! Emission order exactly matches consumption order from the cursor.

/// Append-only text accumulator for one listing.
#[derive(Debug, Default)]
pub struct Emitter {
    out: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// One byte as two lowercase hex digits plus a trailing space.
    pub fn byte(&mut self, byte: u8) {
        self.out.push_str(&format!("{:02x} ", byte));
    }

    /// A label on its own line. Breaks the current line first when the
    /// output does not already end at a line boundary.
    pub fn label(&mut self, text: &str) {
        self.break_line();
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Ends the current block with a blank separator line.
    pub fn end_block(&mut self) {
        self.break_line();
        self.out.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_report(self) -> String {
        self.out
    }

    fn break_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_render_as_lowercase_hex_pairs() {
        let mut emitter = Emitter::new();
        emitter.byte(0x00);
        emitter.byte(0x61);
        emitter.byte(0xde);
        assert_eq!(emitter.as_str(), "00 61 de ");
    }

    #[test]
    fn label_gets_its_own_line() {
        let mut emitter = Emitter::new();
        emitter.label("Header");
        emitter.byte(0x00);
        assert_eq!(emitter.as_str(), "Header\n00 ");
    }

    #[test]
    fn label_breaks_an_open_byte_line() {
        let mut emitter = Emitter::new();
        emitter.byte(0x01);
        emitter.label("Count");
        emitter.byte(0x02);
        assert_eq!(emitter.as_str(), "01 \nCount\n02 ");
    }

    #[test]
    fn end_block_appends_a_blank_separator_line() {
        let mut emitter = Emitter::new();
        emitter.label("Header");
        emitter.byte(0x00);
        emitter.end_block();
        assert_eq!(emitter.into_report(), "Header\n00 \n\n");
    }
}

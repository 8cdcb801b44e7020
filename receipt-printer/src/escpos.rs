//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

/// Text alignment on the paper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers. Text is emitted as
/// UTF-8; receipts produced by this crate are Latin-script only.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(2048);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self {
            buf,
            width: width.max(1),
        }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn blank(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Print and feed n lines (ESC d n)
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    // === Alignment ===

    /// Set text alignment (ESC a n)
    pub fn align(&mut self, align: Align) -> &mut Self {
        let n = match align {
            Align::Left => 0x00,
            Align::Center => 0x01,
            Align::Right => 0x02,
        };
        self.buf.extend_from_slice(&[0x1B, 0x61, n]);
        self
    }

    // === Text Style ===

    /// Toggle emphasized (bold) text (ESC E n)
    pub fn bold(&mut self, on: bool) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, on as u8]);
        self
    }

    /// Double width and height (GS ! 0x11)
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Triple width and height (GS ! 0x22)
    pub fn triple_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x22]);
        self
    }

    /// Reset to normal size (GS ! 0x00)
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Separators ===

    /// Print a full-width line of '-' characters
    pub fn rule(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line
    ///
    /// The right text is right-justified to the paper width, with spaces
    /// filling the gap. Lines that do not fit fall back to a single space
    /// separator.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = left.chars().count();
        let rw = right.chars().count();

        if lw + rw >= self.width {
            self.text(left);
            self.text(" ");
            self.line(right);
        } else {
            let spaces = self.width - lw - rw;
            self.text(left);
            self.text(&" ".repeat(spaces));
            self.line(right);
        }
        self
    }

    // === Paper Control ===

    /// Cut paper (GS V 0, full cut)
    pub fn cut(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
        self
    }

    /// Full cut with feed - feeds n lines then cuts (GS V 66 n)
    ///
    /// Lets the printer manage cutter-to-head distance, wasting less
    /// top margin on the next receipt than separate feed() + cut() calls.
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    // === QR Code ===

    /// Print a QR code
    ///
    /// Size: 1-16 (module size in dots)
    pub fn qr_code(&mut self, data: &str, size: u8) -> &mut Self {
        let size = size.clamp(1, 16);

        // Function 165: Select model (Model 2)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x31, 0x00]);

        // Function 167: Set module size
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, size]);

        // Function 169: Set error correction (L)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x31]);

        // Function 180: Store data
        let data_bytes = data.as_bytes();
        let len = data_bytes.len() + 3;
        let p_l = (len & 0xFF) as u8;
        let p_h = ((len >> 8) & 0xFF) as u8;
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
        self.buf.extend_from_slice(data_bytes);

        // Function 181: Print
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);

        self
    }

    // === Build ===

    /// Build the final byte buffer
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let mut b = EscPosBuilder::new(32);
        b.align(Align::Center)
            .double_size()
            .line("Header")
            .reset_size()
            .align(Align::Left)
            .line("Body");

        let data = b.build();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("Header"));
        assert!(s.contains("Body"));
        // Starts with printer init
        assert_eq!(&data[..2], &[0x1B, 0x40]);
    }

    #[test]
    fn test_line_lr_right_justifies() {
        let mut b = EscPosBuilder::new(20);
        b.line_lr("Due date", "2024-07-05");

        let s = String::from_utf8_lossy(&b.build()).to_string();
        // "Due date" (8) + spaces (2) + "2024-07-05" (10) = 20 chars
        assert!(s.contains("Due date  2024-07-05\n"));
    }

    #[test]
    fn test_line_lr_overflow_falls_back() {
        let mut b = EscPosBuilder::new(10);
        b.line_lr("a long label", "a long value");

        let s = String::from_utf8_lossy(&b.build()).to_string();
        assert!(s.contains("a long label a long value\n"));
    }

    #[test]
    fn test_rule() {
        let mut b = EscPosBuilder::new(10);
        b.rule();

        let s = String::from_utf8_lossy(&b.build()).to_string();
        assert!(s.contains("----------\n"));
    }

    #[test]
    fn test_qr_code_contains_payload() {
        let mut b = EscPosBuilder::new(48);
        b.qr_code("http://localhost:8000/tasks/t1", 6);

        let data = b.build();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("http://localhost:8000/tasks/t1"));
    }

    #[test]
    fn test_size_commands() {
        let mut b = EscPosBuilder::new(48);
        b.triple_size().double_size().reset_size();

        let data = b.build();
        // ESC @ then the three GS ! settings
        assert_eq!(
            &data[2..],
            &[0x1D, 0x21, 0x22, 0x1D, 0x21, 0x11, 0x1D, 0x21, 0x00]
        );
    }

    #[test]
    fn test_cut_command() {
        let mut b = EscPosBuilder::new(48);
        b.cut();

        let data = b.build();
        assert_eq!(&data[data.len() - 3..], &[0x1D, 0x56, 0x00]);
    }

    #[test]
    fn test_zero_width_clamped() {
        let b = EscPosBuilder::new(0);
        assert_eq!(b.width(), 1);
    }
}

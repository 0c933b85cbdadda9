//! Text payload.

use super::TextOptions;
use crate::visual::TextMetrics;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// A block of text, one entry per line.
///
/// Text carries no cached drawable; its extent is re-measured on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub text: Vec<String>,
    pub options: TextOptions,
}

impl Text {
    pub fn new(content: &str, options: TextOptions) -> Self {
        Self {
            text: Self::split_lines(content),
            options,
        }
    }

    /// Split raw overlay input into lines. `\r\n` and `\n` both break lines.
    pub fn split_lines(content: &str) -> Vec<String> {
        content.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect()
    }

    /// Joined content as typed.
    pub fn content(&self) -> String {
        self.text.join("\n")
    }

    /// Widest line by line-height times line count.
    pub fn measure(&self, metrics: &dyn TextMetrics) -> Size {
        let font = self.options.font;
        let font_size = self.options.font_size;
        self.text.iter().fold(Size::ZERO, |acc, line| {
            let line_size = metrics.measure_line(line, font, font_size);
            Size::new(acc.width.max(line_size.width), acc.height + line_size.height)
        })
    }
}

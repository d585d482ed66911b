//! Raw-position ↔ content-index conversion around header and footer rows.
//!
//! The list shows `header_count` header rows, then the content rows, then
//! `footer_count` footer rows. Raw positions count all of them from zero;
//! content indices count only the content rows.

/// What occupies a raw list position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowKind {
    Header(usize),
    Content(usize),
    Footer(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionRemapper {
    header_count: usize,
    content_count: usize,
    footer_count: usize,
}

impl PositionRemapper {
    pub fn new(header_count: usize, content_count: usize, footer_count: usize) -> Self {
        Self {
            header_count,
            content_count,
            footer_count,
        }
    }

    pub fn header_count(&self) -> usize {
        self.header_count
    }

    pub fn footer_count(&self) -> usize {
        self.footer_count
    }

    pub fn content_count(&self) -> usize {
        self.content_count
    }

    pub fn set_header_count(&mut self, count: usize) {
        self.header_count = count;
    }

    pub fn set_footer_count(&mut self, count: usize) {
        self.footer_count = count;
    }

    pub fn set_content_count(&mut self, count: usize) {
        self.content_count = count;
    }

    /// Total number of raw rows.
    pub fn row_count(&self) -> usize {
        self.header_count + self.content_count + self.footer_count
    }

    pub fn is_header(&self, raw: usize) -> bool {
        raw < self.header_count
    }

    pub fn is_footer(&self, raw: usize) -> bool {
        let first_footer = self.header_count + self.content_count;
        raw >= first_footer && raw < self.row_count()
    }

    pub fn is_header_or_footer(&self, raw: usize) -> bool {
        self.is_header(raw) || self.is_footer(raw)
    }

    /// Classifies `raw`; `None` past the last row.
    pub fn kind(&self, raw: usize) -> Option<RowKind> {
        if raw >= self.row_count() {
            return None;
        }
        Some(if self.is_header(raw) {
            RowKind::Header(raw)
        } else if self.is_footer(raw) {
            RowKind::Footer(raw - self.header_count - self.content_count)
        } else {
            RowKind::Content(raw - self.header_count)
        })
    }

    pub fn to_content_index(&self, raw: usize) -> Option<usize> {
        match self.kind(raw) {
            Some(RowKind::Content(index)) => Some(index),
            _ => None,
        }
    }

    /// `None` if `content` is not a valid content index.
    pub fn to_raw_position(&self, content: usize) -> Option<usize> {
        (content < self.content_count).then_some(content + self.header_count)
    }
}

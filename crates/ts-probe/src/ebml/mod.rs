//! Minimal EBML reading over an in-memory prefix.
//!
//! Readers never fail and never index out of bounds: bytes past the end of
//! the buffer read as zero. Range checks belong to [`ElementCursor`], which
//! walks sibling elements inside a `[pos, end)` window clamped to the buffer.

pub mod encode;
pub mod ids;

/// Longest element ID the format allows, in bytes.
pub const MAX_ID_LEN: usize = 4;

/// Longest VINT the format allows, in bytes.
pub const MAX_VINT_LEN: usize = 8;

#[inline]
fn byte_at(buf: &[u8], pos: usize) -> u8 {
    buf.get(pos).copied().unwrap_or(0)
}

/// Encoded length implied by the first byte of a VINT.
///
/// A zero byte carries no length marker; it is treated as the longest
/// encoding so the caller still makes progress.
#[inline]
fn vint_len(first: u8) -> usize {
    if first == 0 {
        MAX_VINT_LEN
    } else {
        first.leading_zeros() as usize + 1
    }
}

/// Decode a VINT (an element size) at `pos`.
///
/// Returns the value with the length marker cleared, and the encoded length.
pub fn read_vint(buf: &[u8], pos: usize) -> (u64, usize) {
    let first = byte_at(buf, pos);
    let len = vint_len(first);
    let mask = if len >= MAX_VINT_LEN { 0 } else { 0xFF_u8 >> len };

    let mut value = u64::from(first & mask);
    for i in 1..len {
        value = (value << 8) | u64::from(byte_at(buf, pos.saturating_add(i)));
    }
    (value, len)
}

/// Decode an element ID at `pos`.
///
/// Unlike sizes, IDs keep their marker bits, and are at most four bytes long.
pub fn read_id(buf: &[u8], pos: usize) -> (u32, usize) {
    let len = vint_len(byte_at(buf, pos)).min(MAX_ID_LEN);

    let mut id = 0_u32;
    for i in 0..len {
        id = (id << 8) | u32::from(byte_at(buf, pos.saturating_add(i)));
    }
    (id, len)
}

/// The ID/size pair at the start of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHeader {
    /// Element ID, marker bits included.
    pub id: u32,
    /// Bytes used by the ID.
    pub id_len: usize,
    /// Declared payload size.
    pub size: u64,
    /// Bytes used by the size VINT.
    pub size_len: usize,
    /// Offset of the first ID byte.
    pub start: usize,
}

impl ElementHeader {
    /// Decode the header at `pos`.
    pub fn read(buf: &[u8], pos: usize) -> Self {
        let (id, id_len) = read_id(buf, pos);
        let (size, size_len) = read_vint(buf, pos.saturating_add(id_len));
        Self {
            id,
            id_len,
            size,
            size_len,
            start: pos,
        }
    }

    pub fn header_len(&self) -> usize {
        self.id_len + self.size_len
    }

    /// Offset of the first payload byte.
    pub fn data_start(&self) -> usize {
        self.start.saturating_add(self.header_len())
    }

    /// Offset one past the last payload byte, as declared. May lie beyond
    /// the buffer; unknown-size elements saturate.
    pub fn end(&self) -> usize {
        let size = usize::try_from(self.size).unwrap_or(usize::MAX);
        self.data_start().saturating_add(size)
    }
}

/// Forward-only walker over sibling elements in `[pos, end)`.
///
/// Nesting is expressed by [`ElementCursor::children`], which returns a new
/// cursor bounded by both the parent's declared end and this cursor's end.
#[derive(Debug, Clone)]
pub struct ElementCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> ElementCursor<'a> {
    /// Cursor over the whole buffer.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::bounded(buf, 0, buf.len())
    }

    /// Cursor over `[start, end)`, with `end` clamped to the buffer.
    pub fn bounded(buf: &'a [u8], start: usize, end: usize) -> Self {
        let end = end.min(buf.len());
        Self {
            buf,
            pos: start.min(end),
            end,
        }
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// True once the cursor has consumed its whole range.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.end
    }

    /// Header of the next element, if its ID and size fit inside the range.
    pub fn peek(&self) -> Option<ElementHeader> {
        if self.is_exhausted() {
            return None;
        }
        let header = ElementHeader::read(self.buf, self.pos);
        (header.data_start() <= self.end).then_some(header)
    }

    /// Cursor over the payload of `header`, clamped to this cursor's range.
    pub fn children(&self, header: &ElementHeader) -> ElementCursor<'a> {
        ElementCursor::bounded(self.buf, header.data_start(), header.end().min(self.end))
    }

    /// Payload bytes of `header` that lie inside the buffer.
    pub fn payload(&self, header: &ElementHeader) -> &'a [u8] {
        let start = header.data_start().min(self.buf.len());
        let end = header.end().min(self.buf.len()).max(start);
        &self.buf[start..end]
    }
}

impl Iterator for ElementCursor<'_> {
    type Item = ElementHeader;

    /// Yield the next sibling and move past its declared span.
    ///
    /// Stops without advancing when the next header does not fit in range,
    /// so a caller can tell a clean end from truncation via
    /// [`ElementCursor::is_exhausted`].
    fn next(&mut self) -> Option<ElementHeader> {
        let header = self.peek()?;
        let next = header.end();

        // Every header is at least two bytes, so this always moves forward.
        debug_assert!(next > self.pos, "element walk must make progress");
        self.pos = if next > self.pos { next } else { self.end };

        Some(header)
    }
}

//! A growable byte buffer with geometric reallocation (§6.5).
//!
//! `WriteBuffer` backs both the serializer's output and the in-place string
//! unescape staging path (§4.2's page-boundary guard copies into a small
//! stack buffer, not this type, but both follow the same "never read past
//! what's guaranteed" discipline).

/// Growable output buffer. Moveable, not `Clone`-by-accident: cloning a
/// multi-megabyte buffer implicitly is exactly the kind of surprise this
/// type is meant to avoid, so `Clone` is derived explicitly and callers must
/// opt in.
#[derive(Debug, Default, Clone)]
pub struct WriteBuffer {
    data: Vec<u8>,
}

impl WriteBuffer {
    pub fn new() -> Self {
        WriteBuffer { data: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        WriteBuffer { data: Vec::with_capacity(cap) }
    }

    /// Guarantees at least `n` writable bytes past the current length.
    /// Growth is geometric (1.5x) once the buffer is non-trivially sized, so
    /// that repeated small reserves don't degrade to O(n^2) copying.
    pub fn reserve(&mut self, n: usize) {
        let needed = self.data.len() + n;
        if needed <= self.data.capacity() {
            return;
        }
        let grown = self.data.capacity() + self.data.capacity() / 2;
        self.data.reserve(needed.max(grown).saturating_sub(self.data.len()));
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn push_byte(&mut self, byte: u8) {
        self.data.push(byte);
    }

    /// Push a single byte without a capacity check. Caller must have
    /// preflighted capacity via `reserve`.
    ///
    /// # Safety
    /// The caller must ensure `self.data.capacity() > self.data.len()`.
    pub unsafe fn push_unsafe(&mut self, byte: u8) {
        let len = self.data.len();
        debug_assert!(len < self.data.capacity());
        std::ptr::write(self.data.as_mut_ptr().add(len), byte);
        self.data.set_len(len + 1);
    }

    pub fn pop(&mut self, n: usize) {
        let new_len = self.data.len().saturating_sub(n);
        self.data.truncate(new_len);
    }

    /// Overwrite the last byte in place; used by the serializer to turn a
    /// trailing `,` into the closing container delimiter (§4.7).
    pub fn set_last(&mut self, byte: u8) {
        if let Some(last) = self.data.last_mut() {
            *last = byte;
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Interprets the JSON output as UTF-8. Valid whenever the buffer was
    /// produced entirely by this crate's serializer, which only ever emits
    /// ASCII structural bytes and UTF-8-encoded string content.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

impl std::fmt::Write for WriteBuffer {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.push(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_read_back() {
        let mut wb = WriteBuffer::new();
        wb.push(b"hello");
        wb.push_byte(b'!');
        assert_eq!(wb.as_slice(), b"hello!");
    }

    #[test]
    fn set_last_overwrites_trailing_comma() {
        let mut wb = WriteBuffer::new();
        wb.push(b"[1,2,");
        wb.set_last(b']');
        assert_eq!(wb.as_slice(), b"[1,2]");
    }

    #[test]
    fn pop_truncates() {
        let mut wb = WriteBuffer::new();
        wb.push(b"abcdef");
        wb.pop(2);
        assert_eq!(wb.as_slice(), b"abcd");
    }

    #[test]
    fn reserve_then_push_unsafe_is_sound() {
        let mut wb = WriteBuffer::new();
        wb.reserve(4);
        unsafe {
            wb.push_unsafe(b'a');
            wb.push_unsafe(b'b');
        }
        assert_eq!(wb.as_slice(), b"ab");
    }
}

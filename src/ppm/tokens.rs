//! Streaming token scanner for textual pixel maps.
//!
//! Tokens are runs of non-whitespace bytes. `#` starts a comment that runs to
//! the end of the line; comments separate tokens like whitespace does.

use std::io::{self, BufRead};

/// Outcome of scanning one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scan<T> {
    Value(T),
    /// Input ended before the token started.
    Eof,
    /// A token was present but could not be interpreted.
    Malformed,
}

pub(crate) struct Tokens<R> {
    reader: R,
}

impl<R: BufRead> Tokens<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader }
    }

    fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn bump(&mut self) {
        self.reader.consume(1);
    }

    fn skip_separators(&mut self) -> io::Result<()> {
        while let Some(b) = self.peek()? {
            if b == b'#' {
                while let Some(c) = self.peek()? {
                    self.bump();
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if is_space(b) {
                self.bump();
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Read a two-byte tag token such as `P3`.
    ///
    /// Tokens of any other length are malformed.
    pub(crate) fn next_tag(&mut self) -> io::Result<Scan<[u8; 2]>> {
        self.skip_separators()?;
        let mut tag = [0u8; 2];
        let mut len = 0usize;
        while let Some(b) = self.peek()? {
            if is_separator(b) {
                break;
            }
            self.bump();
            if len < tag.len() {
                tag[len] = b;
            }
            len += 1;
            if len > tag.len() {
                return Ok(Scan::Malformed);
            }
        }
        Ok(match len {
            0 => Scan::Eof,
            2 => Scan::Value(tag),
            _ => Scan::Malformed,
        })
    }

    /// Read an unsigned decimal token.
    ///
    /// Non-digit bytes and values past `u32::MAX` are malformed.
    pub(crate) fn next_u32(&mut self) -> io::Result<Scan<u32>> {
        self.skip_separators()?;
        let mut value: u32 = 0;
        let mut digits = 0usize;
        while let Some(b) = self.peek()? {
            if is_separator(b) {
                break;
            }
            if !b.is_ascii_digit() {
                return Ok(Scan::Malformed);
            }
            self.bump();
            value = match value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(b - b'0')))
            {
                Some(v) => v,
                None => return Ok(Scan::Malformed),
            };
            digits += 1;
        }
        Ok(if digits == 0 {
            Scan::Eof
        } else {
            Scan::Value(value)
        })
    }
}

/// C `isspace`: ASCII whitespace plus vertical tab.
#[inline]
fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

#[inline]
fn is_separator(b: u8) -> bool {
    is_space(b) || b == b'#'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Tokens<&[u8]> {
        Tokens::new(s.as_bytes())
    }

    #[test]
    fn numbers_across_any_whitespace() {
        let mut t = tokens("  12\n\t7\r\n 0 ");
        assert_eq!(t.next_u32().unwrap(), Scan::Value(12));
        assert_eq!(t.next_u32().unwrap(), Scan::Value(7));
        assert_eq!(t.next_u32().unwrap(), Scan::Value(0));
        assert_eq!(t.next_u32().unwrap(), Scan::Eof);
    }

    #[test]
    fn comments_are_whitespace() {
        let mut t = tokens("P3 # made by hand\n# another\n4#trailing\n5");
        assert_eq!(t.next_tag().unwrap(), Scan::Value(*b"P3"));
        assert_eq!(t.next_u32().unwrap(), Scan::Value(4));
        assert_eq!(t.next_u32().unwrap(), Scan::Value(5));
        assert_eq!(t.next_u32().unwrap(), Scan::Eof);
    }

    #[test]
    fn vertical_tab_separates() {
        let mut t = tokens("P3\x0b1\x0b\x0b2\x0b");
        assert_eq!(t.next_tag().unwrap(), Scan::Value(*b"P3"));
        assert_eq!(t.next_u32().unwrap(), Scan::Value(1));
        assert_eq!(t.next_u32().unwrap(), Scan::Value(2));
        assert_eq!(t.next_u32().unwrap(), Scan::Eof);
    }

    #[test]
    fn non_numeric_is_malformed() {
        assert_eq!(tokens("12a").next_u32().unwrap(), Scan::Malformed);
        assert_eq!(tokens("-1").next_u32().unwrap(), Scan::Malformed);
        assert_eq!(tokens("x").next_u32().unwrap(), Scan::Malformed);
    }

    #[test]
    fn overflow_is_malformed() {
        assert_eq!(
            tokens("4294967295").next_u32().unwrap(),
            Scan::Value(u32::MAX)
        );
        assert_eq!(tokens("4294967296").next_u32().unwrap(), Scan::Malformed);
    }

    #[test]
    fn tag_length_must_be_two() {
        assert_eq!(tokens("P").next_tag().unwrap(), Scan::Malformed);
        assert_eq!(tokens("P33 1").next_tag().unwrap(), Scan::Malformed);
        assert_eq!(tokens("P6\n").next_tag().unwrap(), Scan::Value(*b"P6"));
        assert_eq!(tokens(" \n# only a comment").next_tag().unwrap(), Scan::Eof);
    }
}

//! TagScanner: pulls lower-cased hashtag tokens out of a byte stream.
//!
//! A tag starts after a `#` and runs until ASCII whitespace, another
//! `#`, a NUL byte, or end of stream. Empty candidates (`#` immediately
//! followed by a delimiter) are skipped, never yielded. A `#` that
//! terminates one tag also opens the next candidate, so `#a#b` yields
//! `a` then `b`.

use std::io::{self, Bytes, Read};

fn is_tag_end(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'#' || b == 0
}

/// Streaming tokenizer over any reader. Wrap files in a `BufReader`;
/// the scanner reads one byte at a time.
pub struct TagScanner<R> {
    bytes: Bytes<R>,
    /// Set when the previous tag was terminated by `#`, which already
    /// opens the next candidate.
    at_tag_start: bool,
}

impl<R: Read> TagScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            at_tag_start: false,
        }
    }
}

impl<R: Read> Iterator for TagScanner<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Seek the opening '#', unless the previous tag's
            // terminator was one.
            if !self.at_tag_start {
                loop {
                    match self.bytes.next()? {
                        Err(e) => return Some(Err(e)),
                        Ok(b'#') => break,
                        Ok(_) => {}
                    }
                }
            }
            self.at_tag_start = false;

            let mut tag = Vec::new();
            loop {
                match self.bytes.next() {
                    None => break,
                    Some(Err(e)) => return Some(Err(e)),
                    Some(Ok(b)) if is_tag_end(b) => {
                        self.at_tag_start = b == b'#';
                        break;
                    }
                    Some(Ok(b)) => tag.push(b.to_ascii_lowercase()),
                }
            }

            if !tag.is_empty() {
                return Some(Ok(String::from_utf8_lossy(&tag).into_owned()));
            }
            // Empty candidate: keep scanning.
        }
    }
}

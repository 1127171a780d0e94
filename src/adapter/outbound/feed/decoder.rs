//! Incremental splitter for a top-level JSON array.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeArray,
    /// Just after `[`: an element or `]`.
    FirstElement,
    /// Just after `,`: an element is required.
    NextElement,
    InElement,
    /// An element just closed: `,` or `]`.
    AfterElement,
    Done,
}

/// Splits a JSON array arriving in arbitrary chunks into the raw bytes of
/// its elements.
///
/// Only structure is checked here (brackets, strings, separators); each
/// element is handed out unparsed. Bytes of completed elements are
/// released after every [`feed`](Self::feed), so memory stays bounded by
/// the largest single element.
#[derive(Debug)]
pub struct JsonArrayDecoder {
    buf: Vec<u8>,
    pos: usize,
    state: State,
    element_start: usize,
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl Default for JsonArrayDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonArrayDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
            state: State::BeforeArray,
            element_start: 0,
            depth: 0,
            in_string: false,
            escaped: false,
        }
    }

    /// Append `chunk` and return every element completed by it.
    ///
    /// A structural error stops the scan, but elements that closed before
    /// the bad byte are still returned ahead of it, so the outcome does not
    /// depend on where the body was split into chunks.
    pub fn feed(&mut self, chunk: &[u8]) -> (Vec<Vec<u8>>, Option<Error>) {
        self.buf.extend_from_slice(chunk);
        let mut elements = Vec::new();
        let error = self.scan(&mut elements).err();
        self.compact();
        (elements, error)
    }

    /// Check that the array was closed.
    pub fn finish(&self) -> Result<()> {
        if self.state == State::Done {
            Ok(())
        } else {
            Err(malformed("body ended before the array was closed".into()))
        }
    }

    fn scan(&mut self, elements: &mut Vec<Vec<u8>>) -> Result<()> {
        while self.pos < self.buf.len() {
            let byte = self.buf[self.pos];
            match self.state {
                State::BeforeArray => match byte {
                    b'[' => self.state = State::FirstElement,
                    b if b.is_ascii_whitespace() => {}
                    b => return Err(malformed(format!("expected '[', found {:?}", b as char))),
                },
                State::FirstElement | State::NextElement => match byte {
                    b if b.is_ascii_whitespace() => {}
                    b']' if self.state == State::FirstElement => self.state = State::Done,
                    b']' | b',' => {
                        return Err(malformed(format!("unexpected {:?}", byte as char)))
                    }
                    _ => {
                        self.state = State::InElement;
                        self.element_start = self.pos;
                        self.depth = 0;
                        self.in_string = false;
                        self.escaped = false;
                        self.scan_element_byte(byte, elements)?;
                    }
                },
                State::InElement => self.scan_element_byte(byte, elements)?,
                State::AfterElement => match byte {
                    b',' => self.state = State::NextElement,
                    b']' => self.state = State::Done,
                    b if b.is_ascii_whitespace() => {}
                    b => return Err(malformed(format!("expected ',' or ']', found {:?}", b as char))),
                },
                State::Done => {
                    if !byte.is_ascii_whitespace() {
                        return Err(malformed("trailing data after array".into()));
                    }
                }
            }
            self.pos += 1;
        }

        Ok(())
    }

    fn scan_element_byte(&mut self, byte: u8, elements: &mut Vec<Vec<u8>>) -> Result<()> {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if byte == b'\\' {
                self.escaped = true;
            } else if byte == b'"' {
                self.in_string = false;
                if self.depth == 0 {
                    self.emit(self.pos + 1, elements);
                    self.state = State::AfterElement;
                }
            }
            return Ok(());
        }

        match byte {
            b'"' => self.in_string = true,
            b'{' | b'[' => self.depth += 1,
            b'}' | b']' if self.depth > 0 => {
                self.depth -= 1;
                if self.depth == 0 {
                    self.emit(self.pos + 1, elements);
                    self.state = State::AfterElement;
                }
            }
            // A bare scalar (number, literal) ends at the next separator.
            b']' => {
                self.emit(self.pos, elements);
                self.state = State::Done;
            }
            b'}' => return Err(malformed("unbalanced '}'".into())),
            b',' if self.depth == 0 => {
                self.emit(self.pos, elements);
                self.state = State::NextElement;
            }
            b if b.is_ascii_whitespace() && self.depth == 0 => {
                self.emit(self.pos, elements);
                self.state = State::AfterElement;
            }
            _ => {}
        }
        Ok(())
    }

    fn emit(&self, end: usize, elements: &mut Vec<Vec<u8>>) {
        elements.push(self.buf[self.element_start..end].to_vec());
    }

    fn compact(&mut self) {
        let keep_from = if self.state == State::InElement {
            self.element_start
        } else {
            self.pos
        };
        self.buf.drain(..keep_from);
        self.pos -= keep_from;
        self.element_start = self.element_start.saturating_sub(keep_from);
    }
}

fn malformed(reason: String) -> Error {
    Error::FeedUnavailable(format!("malformed feed body: {reason}"))
}

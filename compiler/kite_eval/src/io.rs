//! Script input and output streams.
//!
//! Outputs use enum dispatch: the real streams, a shared capture buffer for
//! tests and embedding, or nothing.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// Byte buffer shared between an [`Output`] and whoever reads it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, bytes: &[u8]) {
        self.0.lock().extend_from_slice(bytes);
    }

    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().clone()
    }

    /// Captured bytes as text, invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    /// Drain the captured bytes.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.0.lock())
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

/// Destination of a script output stream.
#[derive(Clone, Default)]
pub enum Output {
    #[default]
    Stdout,
    Stderr,
    Buffer(SharedBuffer),
    /// Discard everything.
    Silent,
}

impl Output {
    /// Fresh capture buffer plus the output writing into it.
    pub fn buffer() -> (Output, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Output::Buffer(buffer.clone()), buffer)
    }

    pub fn write(&self, bytes: &[u8]) {
        // Write failures on the real streams are not script errors.
        match self {
            Output::Stdout => {
                let _ = std::io::stdout().lock().write_all(bytes);
            }
            Output::Stderr => {
                let _ = std::io::stderr().lock().write_all(bytes);
            }
            Output::Buffer(buffer) => buffer.write(bytes),
            Output::Silent => {}
        }
    }

    pub fn flush(&self) {
        match self {
            Output::Stdout => {
                let _ = std::io::stdout().lock().flush();
            }
            Output::Stderr => {
                let _ = std::io::stderr().lock().flush();
            }
            Output::Buffer(_) | Output::Silent => {}
        }
    }
}

/// Source of `readline` input.
#[derive(Default)]
pub enum Input {
    Stdin,
    /// Pre-supplied lines, consumed front to back.
    Lines(VecDeque<Vec<u8>>),
    #[default]
    Empty,
}

impl Input {
    pub fn lines<I, L>(lines: I) -> Input
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        Input::Lines(lines.into_iter().map(Into::into).collect())
    }

    /// Next line without its terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> Option<Vec<u8>> {
        match self {
            Input::Stdin => {
                let mut line = Vec::new();
                match std::io::stdin().lock().read_until(b'\n', &mut line) {
                    Ok(0) | Err(_) => None,
                    Ok(_) => {
                        if line.last() == Some(&b'\n') {
                            line.pop();
                            if line.last() == Some(&b'\r') {
                                line.pop();
                            }
                        }
                        Some(line)
                    }
                }
            }
            Input::Lines(lines) => lines.pop_front(),
            Input::Empty => None,
        }
    }
}

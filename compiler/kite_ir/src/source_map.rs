//! Line lookup for error positions and `__LINE__`.

use crate::{Name, Span};

/// The file a piece of AST came from plus the byte offset of every line start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceMap {
    file: Name,
    line_starts: Vec<u32>,
}

impl SourceMap {
    pub fn new(file: Name, source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        SourceMap { file, line_starts }
    }

    #[inline]
    pub fn file(&self) -> Name {
        self.file
    }

    /// 1-based line containing byte `offset`.
    pub fn line_of(&self, offset: u32) -> u32 {
        let idx = self.line_starts.partition_point(|&start| start <= offset);
        u32::try_from(idx.max(1)).unwrap_or(u32::MAX)
    }

    /// 1-based line where `span` begins.
    #[inline]
    pub fn line(&self, span: Span) -> u32 {
        self.line_of(span.start)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests;

//! Line and byte extents of notes inside a multi-note YAML file.

use serde::Serialize;

/// Line and byte totals of a file, measured in a single forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileStats {
    /// Number of lines. An unterminated last line counts as a line.
    pub lines: usize,
    /// Total byte length.
    pub bytes: usize,
}

impl FileStats {
    /// Counts newline bytes and total length in one pass over `content`.
    ///
    /// ```
    /// use notegit::domain::FileStats;
    ///
    /// assert_eq!(FileStats::measure(b"a\nb\n").lines, 2);
    /// assert_eq!(FileStats::measure(b"a\nb").lines, 2);
    /// assert_eq!(FileStats::measure(b"").lines, 0);
    /// ```
    pub fn measure(content: &[u8]) -> Self {
        let mut newlines = 0;
        let mut last = None;
        for &byte in content {
            if byte == b'\n' {
                newlines += 1;
            }
            last = Some(byte);
        }

        let lines = match last {
            Some(b'\n') | None => newlines,
            Some(_) => newlines + 1,
        };

        Self {
            lines,
            bytes: content.len(),
        }
    }
}

/// Where a note's mapping node begins in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartPosition {
    /// 1-based line number.
    pub line: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
}

/// The `[start, end]` line range and byte span a note occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extent {
    /// First line (1-based, inclusive).
    pub start_line: usize,
    /// Last line (1-based, inclusive).
    pub end_line: usize,
    /// Byte offset of the first byte.
    pub offset: usize,
    /// Number of bytes.
    pub length: usize,
}

impl Extent {
    /// Returns the byte range of this extent, for slicing the source file.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.length
    }

    /// Number of lines covered.
    pub fn line_count(&self) -> usize {
        (self.end_line + 1).saturating_sub(self.start_line)
    }
}

/// Partitions a file into one extent per note.
///
/// Each note ends where the next one starts; the last note runs to the end
/// of the file. The first extent is widened to line 1 and offset 0, so
/// content before the first note (the `notes:` key, comments) belongs to it
/// and the extents cover the whole file without gaps or overlaps.
///
/// `starts` must be in document order. An empty slice yields no extents.
pub fn infer_extents(starts: &[StartPosition], stats: FileStats) -> Vec<Extent> {
    let mut extents = Vec::with_capacity(starts.len());

    for (i, start) in starts.iter().enumerate() {
        let (start_line, offset) = if i == 0 {
            (1, 0)
        } else {
            (start.line, start.offset)
        };

        let (end_line, end_offset) = match starts.get(i + 1) {
            Some(next) => (next.line.saturating_sub(1), next.offset),
            None => (stats.lines, stats.bytes),
        };

        extents.push(Extent {
            start_line,
            end_line,
            offset,
            length: end_offset.saturating_sub(offset),
        });
    }

    extents
}

//! I/O boundary traits for testability
//!
//! Line sources hand raw text lines to the tree builder. The source is opened
//! by `open_lines` and closed when the returned iterator is dropped.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Boxed iterator of lines produced by a [`LineSource`].
pub type Lines<'a> = Box<dyn Iterator<Item = io::Result<String>> + 'a>;

/// Supplier of raw input lines, in order.
pub trait LineSource: fmt::Display {
    /// Acquire the underlying resource and iterate its lines.
    fn open_lines(&self) -> io::Result<Lines<'_>>;
}

/// Lines of a text file on disk.
#[derive(Debug, Clone)]
pub struct FileLineSource {
    path: PathBuf,
}

impl FileLineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for FileLineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl LineSource for FileLineSource {
    fn open_lines(&self) -> io::Result<Lines<'_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file).lines()))
    }
}

/// Lines read from standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinLineSource;

impl fmt::Display for StdinLineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<stdin>")
    }
}

impl LineSource for StdinLineSource {
    fn open_lines(&self) -> io::Result<Lines<'_>> {
        Ok(Box::new(io::stdin().lock().lines()))
    }
}

/// Lines held in memory, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryLineSource {
    lines: Vec<String>,
}

impl MemoryLineSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a text blob into lines the same way a file would be read.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }
}

impl fmt::Display for MemoryLineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<memory: {} lines>", self.lines.len())
    }
}

impl LineSource for MemoryLineSource {
    fn open_lines(&self) -> io::Result<Lines<'_>> {
        Ok(Box::new(
            self.lines.iter().map(|line| Ok::<_, io::Error>(line.clone())),
        ))
    }
}

/// Pick the source for a CLI path argument: `-` means standard input.
pub fn source_for_path(path: &Path) -> Box<dyn LineSource> {
    if path == Path::new("-") {
        Box::new(StdinLineSource)
    } else {
        Box::new(FileLineSource::new(path))
    }
}

//! Edge and name sources over the full (unsampled) id space.
//!
//! The sampler scans the edge source twice and the name source once, so sources must be
//! re-scannable. In-memory slices implement both traits; [`EdgeListFile`] and
//! [`NameListFile`] read the plain-text dataset layout:
//!
//! - edges: one `src dst` pair per line, whitespace separated
//! - names: one `id name` pair per line, split once (names may contain spaces)
//!
//! Blank lines and lines starting with `#` are skipped in both.

use crate::subgraph::RawNodeId;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub trait EdgeSource {
    /// Visit every `(src, dst)` edge once, in source order.
    fn for_each_edge<F: FnMut(RawNodeId, RawNodeId)>(&self, f: F) -> Result<()>;

    /// Expected edge count, used only for progress display.
    fn len_hint(&self) -> Option<usize> {
        None
    }
}

pub trait NameSource {
    /// Visit every `(id, name)` entry once, in source order.
    fn for_each_name<F: FnMut(RawNodeId, &str)>(&self, f: F) -> Result<()>;

    fn len_hint(&self) -> Option<usize> {
        None
    }
}

impl EdgeSource for [(RawNodeId, RawNodeId)] {
    fn for_each_edge<F: FnMut(RawNodeId, RawNodeId)>(&self, mut f: F) -> Result<()> {
        for &(s, d) in self {
            f(s, d);
        }
        Ok(())
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl EdgeSource for Vec<(RawNodeId, RawNodeId)> {
    fn for_each_edge<F: FnMut(RawNodeId, RawNodeId)>(&self, f: F) -> Result<()> {
        self.as_slice().for_each_edge(f)
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<S: AsRef<str>> NameSource for [(RawNodeId, S)] {
    fn for_each_name<F: FnMut(RawNodeId, &str)>(&self, mut f: F) -> Result<()> {
        for (id, name) in self {
            f(*id, name.as_ref());
        }
        Ok(())
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<S: AsRef<str>> NameSource for Vec<(RawNodeId, S)> {
    fn for_each_name<F: FnMut(RawNodeId, &str)>(&self, f: F) -> Result<()> {
        self.as_slice().for_each_name(f)
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// Edge list on disk, re-read on every scan.
#[derive(Debug, Clone)]
pub struct EdgeListFile {
    path: PathBuf,
    expected: Option<usize>,
}

impl EdgeListFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), expected: None }
    }

    /// Known edge count, for progress totals.
    pub fn with_expected_len(mut self, edges: usize) -> Self {
        self.expected = Some(edges);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EdgeSource for EdgeListFile {
    fn for_each_edge<F: FnMut(RawNodeId, RawNodeId)>(&self, mut f: F) -> Result<()> {
        for_each_data_line(&self.path, |line_no, line| {
            let mut parts = line.split_whitespace();
            let src = parse_id(parts.next(), line_no)?;
            let dst = parse_id(parts.next(), line_no)?;
            if parts.next().is_some() {
                return Err(Error::Parse {
                    line: line_no,
                    message: "expected exactly two ids".to_string(),
                });
            }
            f(src, dst);
            Ok(())
        })
    }

    fn len_hint(&self) -> Option<usize> {
        self.expected
    }
}

/// Id to name mapping on disk.
#[derive(Debug, Clone)]
pub struct NameListFile {
    path: PathBuf,
    expected: Option<usize>,
}

impl NameListFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), expected: None }
    }

    pub fn with_expected_len(mut self, entries: usize) -> Self {
        self.expected = Some(entries);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NameSource for NameListFile {
    fn for_each_name<F: FnMut(RawNodeId, &str)>(&self, mut f: F) -> Result<()> {
        for_each_data_line(&self.path, |line_no, line| {
            let (id, name) = match line.split_once(char::is_whitespace) {
                Some((id, name)) => (id, name),
                None => (line, ""),
            };
            let id = parse_id(Some(id), line_no)?;
            f(id, name.trim());
            Ok(())
        })
    }

    fn len_hint(&self) -> Option<usize> {
        self.expected
    }
}

fn for_each_data_line<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(usize, &str) -> Result<()>,
{
    let reader = BufReader::new(File::open(path)?);
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        f(i + 1, trimmed)?;
    }
    Ok(())
}

fn parse_id(token: Option<&str>, line: usize) -> Result<RawNodeId> {
    let token = token.ok_or_else(|| Error::Parse { line, message: "missing id".to_string() })?;
    token.parse::<RawNodeId>().map_err(|e| Error::Parse {
        line,
        message: format!("invalid id {token:?}: {e}"),
    })
}

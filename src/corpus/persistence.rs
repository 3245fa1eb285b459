use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::corpus::store::{Corpus, Entry};
use crate::document::Document;
use crate::types::identifiers::{Source, UnknownSource};
use crate::types::reports::{Outcome, SaveReport};

pub const ID_COLUMN: &str = "id";
pub const TEXT_COLUMN: &str = "text";
pub const SOURCE_COLUMN: &str = "source";

/// Column name used by corpus files written before the rename.
const LEGACY_TEXT_COLUMN: &str = "texte";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("Unknown escape sequence \\{0}")]
    Unknown(char),
    #[error("Trailing backslash")]
    Dangling,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("File has no header row")]
    MissingHeader,
    #[error("Required column missing from header: {column}")]
    MissingColumn { column: &'static str },
    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: {source}")]
    UnknownSource { line: usize, source: UnknownSource },
    #[error("Line {line}: {source}")]
    InvalidEscape { line: usize, source: EscapeError },
    #[error("Line {line}: not valid UTF-8")]
    InvalidUtf8 { line: usize },
    #[error("Line {line}: unbalanced or misplaced quotes")]
    InvalidQuoting { line: usize },
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}

/// Escape `\`, tab, newline, and carriage return so a field fits on one line
/// of a tab-separated file.
pub fn escape_field(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

pub fn unescape_field(field: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => return Err(EscapeError::Unknown(other)),
            None => return Err(EscapeError::Dangling),
        }
    }
    Ok(out)
}

/// Write the header and one escaped row per entry.
pub fn write_table<W: Write>(writer: &mut W, entries: &[Entry]) -> std::io::Result<()> {
    writeln!(writer, "{ID_COLUMN}\t{TEXT_COLUMN}\t{SOURCE_COLUMN}")?;
    for entry in entries {
        writeln!(
            writer,
            "{}\t{}\t{}",
            entry.id,
            escape_field(&entry.text),
            entry.source
        )?;
    }
    Ok(())
}

/// Files whose header names the text column `texte` were written by the
/// older exporter: fields are CSV-quoted and backslashes are literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Escaped,
    Quoted,
}

/// Split a row of the older exporter. A field wrapped in `"` may contain
/// tabs, and `""` inside it stands for one `"`.
fn split_quoted(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        let mut field = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    Some('"') => break,
                    Some(c) => field.push(c),
                    // unterminated; the record spans several lines
                    None => return None,
                }
            }
            match chars.next() {
                Some('\t') => fields.push(field),
                None => {
                    fields.push(field);
                    return Some(fields);
                }
                Some(_) => return None,
            }
        } else {
            loop {
                match chars.next() {
                    Some('\t') => break,
                    Some(c) => field.push(c),
                    None => {
                        fields.push(field);
                        return Some(fields);
                    }
                }
            }
            fields.push(field);
        }
    }
}

/// Next `\n`-terminated line with its line ending removed, decoded as UTF-8.
fn next_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    line_no: usize,
) -> Result<Option<String>, PersistError> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    let line = String::from_utf8(std::mem::take(buf))
        .map_err(|_| FormatError::InvalidUtf8 { line: line_no })?;
    Ok(Some(line))
}

/// Read `text` and `source` from every row. Other columns are ignored.
pub fn read_table<R: BufRead>(mut reader: R) -> Result<Vec<Document>, PersistError> {
    let mut buf = Vec::new();

    let header = match next_line(&mut reader, &mut buf, 1)? {
        Some(line) => line,
        None => return Err(FormatError::MissingHeader.into()),
    };
    let header = header.trim_start_matches('\u{feff}');
    if header.is_empty() {
        return Err(FormatError::MissingHeader.into());
    }

    let columns: Vec<&str> = header.split('\t').collect();
    let text_idx = columns
        .iter()
        .position(|c| *c == TEXT_COLUMN || *c == LEGACY_TEXT_COLUMN)
        .ok_or(FormatError::MissingColumn {
            column: TEXT_COLUMN,
        })?;
    let source_idx = columns
        .iter()
        .position(|c| *c == SOURCE_COLUMN)
        .ok_or(FormatError::MissingColumn {
            column: SOURCE_COLUMN,
        })?;
    let dialect = if columns[text_idx] == LEGACY_TEXT_COLUMN {
        Dialect::Quoted
    } else {
        Dialect::Escaped
    };

    let mut documents = Vec::new();
    // Header is line 1.
    let mut line_no = 1;
    loop {
        line_no += 1;
        let line = match next_line(&mut reader, &mut buf, line_no)? {
            Some(line) => line,
            None => break,
        };
        if line.is_empty() {
            continue;
        }

        let fields: Vec<String> = match dialect {
            Dialect::Escaped => line.split('\t').map(str::to_string).collect(),
            Dialect::Quoted => {
                split_quoted(&line).ok_or(FormatError::InvalidQuoting { line: line_no })?
            }
        };
        if fields.len() != columns.len() {
            return Err(FormatError::FieldCount {
                line: line_no,
                expected: columns.len(),
                found: fields.len(),
            }
            .into());
        }

        let text = match dialect {
            Dialect::Escaped => unescape_field(&fields[text_idx]).map_err(|source| {
                FormatError::InvalidEscape {
                    line: line_no,
                    source,
                }
            })?,
            Dialect::Quoted => fields[text_idx].clone(),
        };
        let source: Source = fields[source_idx].parse().map_err(|source| {
            FormatError::UnknownSource {
                line: line_no,
                source,
            }
        })?;

        documents.push(Document::new(text, source));
    }

    Ok(documents)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "corpus".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

fn write_file(path: &Path, entries: &[Entry]) -> std::io::Result<()> {
    let f = File::create(path)?;
    let mut writer = BufWriter::new(f);
    write_table(&mut writer, entries)?;
    let f = writer.into_inner().map_err(|e| e.into_error())?;
    f.sync_all()?;
    Ok(())
}

impl Corpus {
    /// Serialize `id`, `text`, `source` as tab-separated UTF-8.
    ///
    /// Rows go to a sibling temporary file that is renamed over `path` only
    /// once fully written.
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<Outcome<SaveReport>, PersistError> {
        let path = path.as_ref();
        if self.is_empty() {
            warn!("No documents to save");
            return Ok(Outcome::Empty);
        }

        let temp = temp_path_for(path);
        if let Err(e) = write_file(&temp, self.entries()) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp, path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        info!(documents = self.len(), "Corpus saved");
        Ok(Outcome::Completed(SaveReport {
            path: path.to_path_buf(),
            documents: self.len(),
        }))
    }

    /// Rebuild a corpus from a saved file. Ids are assigned afresh.
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Corpus, PersistError> {
        let f = File::open(path.as_ref())?;
        let documents = read_table(BufReader::new(f))?;
        let corpus = Corpus::new(documents);
        info!(documents = corpus.len(), "Corpus loaded");
        Ok(corpus)
    }

    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_table(writer, self.entries())
    }

    pub fn read_tsv<R: BufRead>(reader: R) -> Result<Corpus, PersistError> {
        Ok(Corpus::new(read_table(reader)?))
    }
}

//! JSON output for a [`Document`].
//!
//! Output is a pretty-printed array with a four-space indent and no
//! trailing newline. With `ascii_only` set, every character outside
//! printable ASCII is written as a `\uXXXX` escape.
//!
//! Files are written through a temporary sibling and renamed into place,
//! so the destination is either the old content or the complete new one.

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::config::{ConvertConfig, INDENT};
use crate::error::{WriteError, WriteResult};
use crate::models::Document;

// =============================================================================
// Formatter
// =============================================================================

/// Pretty formatter with optional ASCII-only string output.
struct JsonFormatter<'a> {
    pretty: PrettyFormatter<'a>,
    ascii_only: bool,
}

impl<'a> JsonFormatter<'a> {
    fn new(ascii_only: bool) -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(INDENT),
            ascii_only,
        }
    }
}

/// Write `fragment`, escaping anything outside `0x20..=0x7E`.
fn write_ascii_escaped<W: ?Sized + Write>(writer: &mut W, fragment: &str) -> io::Result<()> {
    let mut start = 0;
    for (i, ch) in fragment.char_indices() {
        if (' '..='~').contains(&ch) {
            continue;
        }
        writer.write_all(fragment[start..i].as_bytes())?;
        let mut units = [0u16; 2];
        for unit in ch.encode_utf16(&mut units) {
            write!(writer, "\\u{:04x}", unit)?;
        }
        start = i + ch.len_utf8();
    }
    writer.write_all(fragment[start..].as_bytes())
}

impl<'a> Formatter for JsonFormatter<'a> {
    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        if self.ascii_only {
            write_ascii_escaped(writer, fragment)
        } else {
            writer.write_all(fragment.as_bytes())
        }
    }

    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// Serialize a document into `writer`.
pub fn write_json<W: Write>(document: &Document, writer: W, config: &ConvertConfig) -> WriteResult<()> {
    let mut ser = serde_json::Serializer::with_formatter(writer, JsonFormatter::new(config.ascii_only));
    document.serialize(&mut ser)?;
    Ok(())
}

/// Serialize a document to a string.
pub fn to_json_string(document: &Document, config: &ConvertConfig) -> WriteResult<String> {
    let mut buf = Vec::new();
    write_json(document, &mut buf, config)?;
    // The serializer only ever emits UTF-8
    String::from_utf8(buf).map_err(|e| WriteError::Json(serde::ser::Error::custom(e)))
}

/// Create or replace `path` with the JSON form of `document`.
///
/// The whole document is serialized before the destination directory is
/// touched. The temporary file is removed if anything fails. A symlinked
/// destination is written through: its final target is replaced and the
/// link itself is kept.
pub fn write_document<P: AsRef<Path>>(document: &Document, path: P, config: &ConvertConfig) -> WriteResult<()> {
    let path = path.as_ref();
    let json = to_json_string(document, config)?;

    let target = resolve_symlinks(path).map_err(|e| WriteError::io(path, e))?;
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = create_temp(dir, &target).map_err(|e| WriteError::io(path, e))?;
    tmp.write_all(json.as_bytes()).map_err(|e| WriteError::io(path, e))?;
    tmp.flush().map_err(|e| WriteError::io(path, e))?;

    tmp.persist(&target).map_err(|e| WriteError::io(path, e.error))?;
    Ok(())
}

/// Links followed before giving up, as the kernel does (ELOOP).
const MAX_SYMLINK_HOPS: usize = 40;

/// Follow `path` through any chain of symlinks, including a dangling
/// final link, to the file that should actually be replaced.
fn resolve_symlinks(path: &Path) -> io::Result<PathBuf> {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        match std::fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = std::fs::read_link(&current)?;
                current = match current.parent() {
                    Some(parent) if link.is_relative() => parent.join(link),
                    _ => link,
                };
            }
            _ => return Ok(current),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::Other,
        format!("too many levels of symbolic links: {}", path.display()),
    ))
}

/// Temporary sibling of `target` carrying the mode the final file should
/// have: the replaced file's mode, or `0o666` filtered through the umask
/// for a new file, like a plain create.
#[cfg(unix)]
fn create_temp(dir: &Path, target: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(target) {
        Ok(meta) => {
            let tmp = NamedTempFile::new_in(dir)?;
            tmp.as_file().set_permissions(meta.permissions())?;
            Ok(tmp)
        }
        Err(_) => tempfile::Builder::new()
            .permissions(std::fs::Permissions::from_mode(0o666))
            .tempfile_in(dir),
    }
}

#[cfg(not(unix))]
fn create_temp(dir: &Path, _target: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

//! # Append-Only JSONL Log
//!
//! One canonical record per line, newline-terminated, never rewritten.
//!
//! Every destination has exactly one lock in the process, shared by all
//! [`AuditLog`] handles opened on it. Destinations are keyed by their
//! resolved path, so `logs/audit.jsonl`, `logs/sub/../audit.jsonl` and a
//! path through a symlinked directory all share one lock. The lock guards
//! both the file append and the chain head, so a chained append (read head,
//! seal, write) is a single mutually-exclusive step and concurrent writers
//! extend one linear chain. Writers in other processes are not coordinated.
//!
//! The head is a cache of the file's last record. Before every use it is
//! checked against the file's size and modification time and rescanned when
//! either changed, so rotation, truncation and out-of-band appends are
//! picked up. A failed write truncates the file back to its previous length
//! so no partial line is left behind.
//!
//! The registry holds weak references. A destination's entry lives as long
//! as some handle on it does and is pruned when the next handle is opened.

use std::ffi::OsString;
use std::fs::{self, File, Metadata, OpenOptions};
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, OnceLock, Weak};
use std::time::SystemTime;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Deserialize;

use crate::error::AuditError;
use crate::event::{AuditEvent, AuditEventDraft};
use crate::trace::canonicalize;

/// Size and modification time of a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl FileStamp {
    fn of(meta: &Metadata) -> Self {
        Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        }
    }

    /// `None` when nothing exists at `path`.
    fn read(path: &Path) -> Result<Option<Self>, AuditError> {
        match fs::metadata(path) {
            Ok(meta) => Ok(Some(Self::of(&meta))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuditError::io(path, e)),
        }
    }
}

/// Last record of a destination and the file state it was read from.
#[derive(Debug)]
struct ChainHead {
    stamp: Option<FileStamp>,
    last_hash: Option<String>,
    entries: u64,
}

impl ChainHead {
    fn advance(&mut self, event: &AuditEvent, stamp: FileStamp) {
        self.last_hash = Some(event.hash().to_string());
        self.entries += 1;
        self.stamp = Some(stamp);
    }
}

#[derive(Debug, Default)]
struct HeadSlot {
    head: Option<ChainHead>,
}

impl HeadSlot {
    /// The head of the file as it is now, rescanned if the file changed
    /// since it was last read or written under this lock.
    fn sync(&mut self, path: &Path) -> Result<&mut ChainHead, AuditError> {
        let stamp = FileStamp::read(path)?;
        let head = match self.head.take() {
            Some(head) if head.stamp == stamp => head,
            stale => {
                if stale.is_some() {
                    tracing::debug!(
                        path = %path.display(),
                        "audit log changed on disk, rescanning head"
                    );
                }
                let (last_hash, entries) = scan_head(path)?;
                ChainHead {
                    stamp,
                    last_hash,
                    entries,
                }
            }
        };
        Ok(self.head.insert(head))
    }
}

type Registry = DashMap<PathBuf, Weak<Mutex<HeadSlot>>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(DashMap::new)
}

/// Registry key for `path`: the longest existing prefix resolved through
/// the filesystem, with the remaining components applied lexically.
fn destination_key(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut existing = absolute.clone();
    let mut rest: Vec<OsString> = Vec::new();
    loop {
        if let Ok(resolved) = fs::canonicalize(&existing) {
            return rest.iter().rev().fold(resolved, |mut key, part| {
                if part == ".." {
                    key.pop();
                } else {
                    key.push(part);
                }
                key
            });
        }
        match existing.components().next_back() {
            Some(Component::Normal(name)) => rest.push(name.to_os_string()),
            Some(Component::ParentDir) => rest.push(OsString::from("..")),
            Some(Component::CurDir) => {}
            _ => return absolute,
        }
        if !existing.pop() {
            return absolute;
        }
    }
}

/// Handle on one audit log destination.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
    slot: Arc<Mutex<HeadSlot>>,
}

impl AuditLog {
    /// Open a handle on `path`. The file is not touched until the first
    /// append or head lookup.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let registry = registry();
        registry.retain(|_, slot| slot.strong_count() > 0);

        let mut entry = registry.entry(destination_key(&path)).or_default();
        let slot = match entry.upgrade() {
            Some(slot) => slot,
            None => {
                let slot = Arc::new(Mutex::new(HeadSlot::default()));
                *entry = Arc::downgrade(&slot);
                slot
            }
        };
        drop(entry);
        Self { path, slot }
    }

    /// The destination path as given to [`AuditLog::open`].
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hash of the last record in the log, `None` if the log is empty or
    /// absent.
    pub fn head_hash(&self) -> Result<Option<String>, AuditError> {
        let mut slot = self.slot.lock();
        Ok(slot.sync(&self.path)?.last_hash.clone())
    }

    /// Number of records in the log.
    pub fn len(&self) -> Result<u64, AuditError> {
        let mut slot = self.slot.lock();
        Ok(slot.sync(&self.path)?.entries)
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> Result<bool, AuditError> {
        Ok(self.len()? == 0)
    }

    /// Append an already sealed event as one line.
    ///
    /// The event is written as given. An event whose `prev_hash` does not
    /// match the current head is still written, with a warning, and will
    /// show up as a broken link under verification.
    pub fn append(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let mut slot = self.slot.lock();
        let head = slot.sync(&self.path)?;
        if event.prev_hash() != head.last_hash.as_deref() {
            tracing::warn!(
                path = %self.path.display(),
                expected = ?head.last_hash,
                found = ?event.prev_hash(),
                "appending audit event that does not extend the current head"
            );
        }
        let stamp = write_line(&self.path, event)?;
        head.advance(event, stamp);
        tracing::info!(
            path = %self.path.display(),
            decision_id = event.decision_id(),
            hash = event.hash(),
            "audit event appended"
        );
        Ok(())
    }

    /// Seal `draft` against the current head and append it, atomically
    /// with respect to every other writer in this process.
    pub fn append_chained(&self, draft: AuditEventDraft) -> Result<AuditEvent, AuditError> {
        let mut slot = self.slot.lock();
        let head = slot.sync(&self.path)?;
        let event = draft.seal(head.last_hash.clone())?;
        let stamp = write_line(&self.path, &event)?;
        head.advance(&event, stamp);
        tracing::info!(
            path = %self.path.display(),
            decision_id = event.decision_id(),
            hash = event.hash(),
            entries = head.entries,
            "audit event chained"
        );
        Ok(event)
    }
}

/// Append `event` to the log at `path`.
pub fn append(path: impl AsRef<Path>, event: &AuditEvent) -> Result<(), AuditError> {
    AuditLog::open(path).append(event)
}

/// Hash of the last record at `path`, read from disk. `None` if the file
/// is absent or holds no records.
pub fn read_last_hash(path: impl AsRef<Path>) -> Result<Option<String>, AuditError> {
    Ok(scan_head(path.as_ref())?.0)
}

/// A file the log can be written to and cut back on failure.
trait LogSink: Write {
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
}

impl LogSink for File {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Write `line` in full or roll the sink back to `start`.
fn write_record<S: LogSink>(sink: &mut S, start: u64, line: &[u8]) -> io::Result<()> {
    let written = sink.write_all(line).and_then(|()| sink.flush());
    if let Err(e) = written {
        if let Err(rollback) = sink.truncate_to(start) {
            tracing::warn!(error = %rollback, "could not remove partial audit line");
        }
        return Err(e);
    }
    Ok(())
}

fn write_line(path: &Path, event: &AuditEvent) -> Result<FileStamp, AuditError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AuditError::io(parent, e))?;
    }
    let mut line = canonicalize(event, true)?.as_bytes().to_vec();
    line.push(b'\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AuditError::io(path, e))?;
    let start = file.metadata().map_err(|e| AuditError::io(path, e))?.len();
    write_record(&mut file, start, &line).map_err(|e| AuditError::io(path, e))?;
    let meta = file.metadata().map_err(|e| AuditError::io(path, e))?;
    Ok(FileStamp::of(&meta))
}

#[derive(Deserialize)]
struct HashOnly {
    hash: String,
}

/// Last record hash and record count of the file at `path`.
fn scan_head(path: &Path) -> Result<(Option<String>, u64), AuditError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok((None, 0)),
        Err(e) => return Err(AuditError::io(path, e)),
    };

    let mut last = None;
    let mut entries = 0u64;
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| AuditError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: HashOnly =
            serde_json::from_str(&line).map_err(|source| AuditError::MalformedLine {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
        last = Some(record.hash);
        entries += 1;
    }
    Ok((last, entries))
}

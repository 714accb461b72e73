use crate::model::Track;
use anyhow::{Context, Result};
use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use log::{info, warn};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use walkdir::WalkDir;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "ogg", "m4a", "aac", "opus"];

/// In-memory track catalog, keyed by stable id. The queue holds copies
/// of these tracks; this is the canonical side it resolves against.
#[derive(Debug, Default)]
pub struct Library {
    tracks: Vec<Track>,
    lookup: HashMap<String, usize>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let lookup = build_lookup(&tracks);
        Self { tracks, lookup }
    }

    pub fn all_tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn find_track_by_id(&self, id: &str) -> Option<&Track> {
        self.lookup.get(id).map(|&index| &self.tracks[index])
    }

    /// Maps a queued item back to its library slot by id. `None` means
    /// the track is gone from the library (deleted after it was
    /// queued); callers treat that as silently skippable, never fatal.
    pub fn resolve(&self, item: &Track) -> Option<usize> {
        self.lookup.get(&item.id).copied()
    }

    /// Adds a track, replacing any existing entry with the same id.
    pub fn add(&mut self, track: Track) {
        match self.lookup.get(&track.id) {
            Some(&index) => self.tracks[index] = track,
            None => {
                self.lookup.insert(track.id.clone(), self.tracks.len());
                self.tracks.push(track);
            }
        }
    }

    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        for track in tracks {
            self.add(track);
        }
    }

    pub fn remove_by_id(&mut self, id: &str) -> Option<Track> {
        let index = self.lookup.get(id).copied()?;
        let removed = self.tracks.remove(index);
        self.lookup = build_lookup(&self.tracks);
        Some(removed)
    }
}

fn build_lookup(tracks: &[Track]) -> HashMap<String, usize> {
    let mut map = HashMap::with_capacity(tracks.len());
    for (index, track) in tracks.iter().enumerate() {
        map.insert(track.id.clone(), index);
    }
    map
}

pub fn scan_folder(root: &Path) -> Vec<Track> {
    let mut tracks = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_audio(path) {
            continue;
        }
        match read_track(path) {
            Ok(track) => tracks.push(track),
            Err(err) => warn!("skipping unreadable {}: {err:#}", path.display()),
        }
    }

    tracks.sort_by(|a, b| a.path.cmp(&b.path));
    info!("scanned {} tracks under {}", tracks.len(), root.display());
    tracks
}

pub fn scan_many(folders: &[PathBuf]) -> Vec<Track> {
    let mut tracks = Vec::new();
    for folder in folders {
        tracks.append(&mut scan_folder(folder));
    }
    tracks.sort_by(|a, b| a.path.cmp(&b.path));
    tracks.dedup_by(|a, b| a.path == b.path);
    tracks
}

/// Stable, path-derived identity. Survives rescans as long as the file
/// does not move.
pub fn track_id(path: &Path) -> String {
    format!("track_{}", path.to_string_lossy().replace(['/', '\\'], "_"))
}

fn is_audio(path: &Path) -> bool {
    let ext = path.extension().and_then(OsStr::to_str).unwrap_or_default();
    AUDIO_EXTENSIONS
        .iter()
        .any(|supported| ext.eq_ignore_ascii_case(supported))
}

fn read_track(path: &Path) -> Result<Track> {
    let tags = read_tags(path)?;

    Ok(Track {
        id: track_id(path),
        path: PathBuf::from(path),
        title: tags.title,
        artist: tags.artist,
        album: tags.album,
        duration_seconds: tags.duration_seconds,
        play_count: 0,
        rating: 0,
        date_added: OffsetDateTime::now_utc().unix_timestamp(),
    })
}

struct TagSnapshot {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    duration_seconds: f64,
}

fn read_tags(path: &Path) -> Result<TagSnapshot> {
    let tagged_file = Probe::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .read()
        .with_context(|| format!("failed to parse tags for {}", path.display()))?;

    let duration_seconds = tagged_file.properties().duration().as_secs_f64();
    let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

    Ok(TagSnapshot {
        title: tag.and_then(|t| t.title()).and_then(|v| clean_value(&v)),
        artist: tag.and_then(|t| t.artist()).and_then(|v| clean_value(&v)),
        album: tag.and_then(|t| t.album()).and_then(|v| clean_value(&v)),
        duration_seconds,
    })
}

fn clean_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

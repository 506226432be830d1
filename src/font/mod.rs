//! Font resolution with deterministic multi-tier fallback.
//!
//! Theme fonts are logical names ("PlayfairDisplay-Regular"); this module
//! turns them into something that can actually rasterize. Resolution is
//! total: exact file match, then a substitute family for known decorative
//! names, then a system default, and finally the embedded bitmap face from
//! [`builtin`]. Resolved handles are cached per `(name, size)` behind a
//! mutex so one resolver can serve concurrent renders.

pub mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use rusttype::Font;
use tracing::{debug, warn};

/// Default capacity of the resolved-handle cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

// Decorative families that degrade gracefully to a serif substitute; every
// other unknown family falls back to sans.
const SERIF_FRAGMENTS: &[&str] = &["Playfair", "Cormorant", "Cardo"];

const SERIF_CANDIDATES: &[&str] = &["DejaVuSerif", "Times New Roman", "times"];
const SANS_CANDIDATES: &[&str] = &["DejaVuSans", "Arial", "arial"];

/// A loadable font at a concrete pixel size. Cheap to clone; outline faces
/// are shared behind an `Arc`.
#[derive(Clone)]
pub enum FontHandle {
    /// A parsed TTF/OTF face.
    Outline {
        font: Arc<Font<'static>>,
        size: f32,
    },
    /// The embedded bitmap face; always available.
    Builtin { size: f32 },
}

impl FontHandle {
    /// The pixel size this handle renders at.
    pub fn size(&self) -> f32 {
        match self {
            FontHandle::Outline { size, .. } | FontHandle::Builtin { size } => *size,
        }
    }

    /// Derives a handle at a different size without re-resolving.
    pub fn with_size(&self, size: f32) -> FontHandle {
        match self {
            FontHandle::Outline { font, .. } => FontHandle::Outline {
                font: Arc::clone(font),
                size,
            },
            FontHandle::Builtin { .. } => FontHandle::Builtin { size },
        }
    }

    /// True if this handle fell all the way through to the bitmap face.
    pub fn is_builtin(&self) -> bool {
        matches!(self, FontHandle::Builtin { .. })
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontHandle::Outline { size, .. } => write!(f, "FontHandle::Outline({size}px)"),
            FontHandle::Builtin { size } => write!(f, "FontHandle::Builtin({size}px)"),
        }
    }
}

struct HandleCache {
    entries: HashMap<(String, u32), (FontHandle, u64)>,
    tick: u64,
}

/// Resolves logical font names to usable handles.
///
/// The search-path list and cache capacity are configuration surfaces; the
/// resolution algorithm itself is fixed. A resolver is safe to share across
/// threads.
pub struct FontResolver {
    dirs: Vec<PathBuf>,
    capacity: usize,
    cache: Mutex<HandleCache>,
}

impl FontResolver {
    /// Creates a resolver over the given ordered search directories.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self::with_capacity(dirs, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a resolver with an explicit handle-cache capacity.
    pub fn with_capacity(dirs: Vec<PathBuf>, capacity: usize) -> Self {
        Self {
            dirs,
            capacity,
            cache: Mutex::new(HandleCache {
                entries: HashMap::new(),
                tick: 0,
            }),
        }
    }

    /// The bundled font directory followed by common OS font locations.
    pub fn default_dirs() -> Vec<PathBuf> {
        [
            "assets/fonts",
            "/usr/share/fonts/truetype",
            "/usr/share/fonts/opentype",
            "/usr/share/fonts/truetype/dejavu",
            "/System/Library/Fonts",
            "C:/Windows/Fonts",
        ]
        .iter()
        .map(PathBuf::from)
        .collect()
    }

    /// Number of cached handles (diagnostics and eviction tests).
    pub fn cache_len(&self) -> usize {
        self.cache.lock().entries.len()
    }

    /// Resolves a logical font name at a pixel size. Always returns a usable
    /// handle; the worst case is the embedded bitmap face.
    pub fn resolve(&self, logical_name: &str, pixel_size: u32) -> FontHandle {
        let key = (logical_name.to_string(), pixel_size);
        {
            let mut cache = self.cache.lock();
            cache.tick += 1;
            let tick = cache.tick;
            if let Some((handle, last_used)) = cache.entries.get_mut(&key) {
                *last_used = tick;
                return handle.clone();
            }
        }

        let handle = self.resolve_uncached(logical_name, pixel_size as f32);

        if self.capacity > 0 {
            let mut cache = self.cache.lock();
            if cache.entries.len() >= self.capacity {
                // Evict the least recently used entry.
                let oldest = cache
                    .entries
                    .iter()
                    .min_by_key(|(_, (_, last_used))| *last_used)
                    .map(|(key, _)| key.clone());
                if let Some(oldest) = oldest {
                    cache.entries.remove(&oldest);
                }
            }
            let tick = cache.tick;
            cache.entries.insert(key, (handle.clone(), tick));
        }
        handle
    }

    fn resolve_uncached(&self, logical_name: &str, size: f32) -> FontHandle {
        if let Some(font) = self.probe(logical_name) {
            return FontHandle::Outline { font, size };
        }

        let candidates = if SERIF_FRAGMENTS.iter().any(|f| logical_name.contains(f)) {
            SERIF_CANDIDATES
        } else {
            SANS_CANDIDATES
        };
        warn!(
            font = logical_name,
            "font file not found, trying substitute family"
        );
        for candidate in candidates {
            if let Some(font) = self.probe(candidate) {
                return FontHandle::Outline { font, size };
            }
        }

        // Hard-coded system default before giving up on outline faces.
        for candidate in SANS_CANDIDATES {
            if let Some(font) = self.probe(candidate) {
                return FontHandle::Outline { font, size };
            }
        }

        warn!(
            font = logical_name,
            "no usable font file anywhere, using embedded bitmap face"
        );
        FontHandle::Builtin { size }
    }

    // Tries `{name}.ttf` then `{name}.otf` in each search directory.
    fn probe(&self, name: &str) -> Option<Arc<Font<'static>>> {
        for dir in &self.dirs {
            for ext in ["ttf", "otf"] {
                let path = dir.join(format!("{name}.{ext}"));
                if !path.is_file() {
                    continue;
                }
                match std::fs::read(&path) {
                    Ok(bytes) => match Font::try_from_vec(bytes) {
                        Some(font) => {
                            debug!(path = %path.display(), "loaded font");
                            return Some(Arc::new(font));
                        }
                        None => {
                            warn!(path = %path.display(), "font file failed to parse, skipping");
                        }
                    },
                    Err(err) => {
                        warn!(path = %path.display(), %err, "font file unreadable, skipping");
                    }
                }
            }
        }
        None
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new(Self::default_dirs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn empty_resolver() -> FontResolver {
        FontResolver::new(Vec::new())
    }

    #[test]
    fn resolution_is_total() {
        let resolver = empty_resolver();
        let handle = resolver.resolve("NoSuchFont123", 40);
        assert!(handle.is_builtin());
        assert_eq!(handle.size(), 40.0);
    }

    #[test]
    fn with_size_preserves_variant() {
        let resolver = empty_resolver();
        let handle = resolver.resolve("Whatever", 40);
        let smaller = handle.with_size(20.0);
        assert!(smaller.is_builtin());
        assert_eq!(smaller.size(), 20.0);
    }

    #[test]
    fn handles_are_cached_per_name_and_size() {
        let resolver = empty_resolver();
        resolver.resolve("A", 10);
        resolver.resolve("A", 10);
        resolver.resolve("A", 12);
        assert_eq!(resolver.cache_len(), 2);
    }

    #[test]
    fn cache_evicts_least_recently_used() {
        let resolver = FontResolver::with_capacity(Vec::new(), 2);
        resolver.resolve("A", 10);
        resolver.resolve("B", 10);
        // Touch A so B becomes the eviction victim.
        resolver.resolve("A", 10);
        resolver.resolve("C", 10);
        assert_eq!(resolver.cache_len(), 2);
        // A and C are resident: resolving them again must not grow the cache.
        resolver.resolve("A", 10);
        resolver.resolve("C", 10);
        assert_eq!(resolver.cache_len(), 2);
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let resolver = FontResolver::with_capacity(Vec::new(), 0);
        resolver.resolve("A", 10);
        assert_eq!(resolver.cache_len(), 0);
    }

    #[test]
    fn corrupt_font_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Broken.ttf"), b"not a font").unwrap();
        let resolver = FontResolver::new(vec![dir.path().to_path_buf()]);
        let handle = resolver.resolve("Broken", 24);
        assert!(handle.is_builtin());
    }

    #[test]
    fn unreadable_directories_are_harmless() {
        let resolver = FontResolver::new(vec![PathBuf::from("/definitely/not/a/dir")]);
        let handle = resolver.resolve("Anything", 16);
        assert!(handle.is_builtin());
    }
}

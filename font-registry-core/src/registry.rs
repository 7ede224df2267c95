//! The font registry: a permanent, deduplicating name → font cache.
//!
//! The table is guarded by a `parking_lot::Mutex` that is never held across
//! a loader call. With [`MissPolicy::Coalesce`] a `Loading` marker is parked
//! in the slot while the first caller runs the loader; other callers for the
//! same name wait on a condvar and pick up the result. With
//! [`MissPolicy::Race`] concurrent misses all call the loader and the first
//! stored result wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::loader::FontLoader;
use crate::name::FontName;

/// Shared handle to a loaded font. Identity is `Arc::ptr_eq`.
pub type FontHandle<F> = Arc<F>;

/// How concurrent misses for the same uncached name are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissPolicy {
    /// One loader call per miss; other callers wait for its result.
    #[default]
    Coalesce,
    /// Every racing caller may call the loader; the first stored result wins
    /// and the others are discarded.
    Race,
}

/// Snapshot of registry counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Resolutions answered from the table.
    pub hits: u64,
    /// Resolutions that found no entry.
    pub misses: u64,
    /// Loader invocations.
    pub loads: u64,
    /// Loader invocations that returned an error.
    pub load_failures: u64,
    /// Calls to `register`.
    pub registrations: u64,
}

/// Outcome of [`FontRegistry::preload`].
#[derive(Debug, Default)]
pub struct PreloadReport {
    /// Names that resolved successfully.
    pub loaded: Vec<FontName>,
    /// Per-name failures, in input order.
    pub failed: Vec<RegistryError>,
}

impl PreloadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

enum Slot<F> {
    Ready(Arc<F>),
    Loading(u64),
}

struct Table<F> {
    slots: HashMap<FontName, Slot<F>>,
    next_ticket: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    loads: AtomicU64,
    load_failures: AtomicU64,
    registrations: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Maps font names to loaded fonts, resolving unknown names through a
/// [`FontLoader`].
///
/// Entries are never evicted. Once a handle is returned for a name, every
/// later `resolve` of that name returns the same `Arc` until `register`
/// replaces it. Handles already handed out stay valid after a replacement.
pub struct FontRegistry<L: FontLoader> {
    loader: L,
    policy: MissPolicy,
    table: Mutex<Table<L::Font>>,
    /// Signalled whenever a `Loading` marker is replaced or removed.
    settled: Condvar,
    counters: Counters,
}

impl<L: FontLoader> FontRegistry<L> {
    /// Create an empty registry using [`MissPolicy::Coalesce`].
    pub fn new(loader: L) -> Self {
        Self::with_policy(loader, MissPolicy::default())
    }

    /// Create an empty registry with an explicit miss policy.
    pub fn with_policy(loader: L, policy: MissPolicy) -> Self {
        FontRegistry {
            loader,
            policy,
            table: Mutex::new(Table {
                slots: HashMap::new(),
                next_ticket: 0,
            }),
            settled: Condvar::new(),
            counters: Counters::default(),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn policy(&self) -> MissPolicy {
        self.policy
    }

    /// Resolve a font by name, loading and caching it on a miss.
    ///
    /// # Errors
    /// - [`RegistryError::InvalidName`] if `name` is empty or malformed
    /// - [`RegistryError::FontNotFound`] if the loader has no match
    /// - [`RegistryError::LoadFailure`] if the loader matched but failed
    ///
    /// Failures are not cached.
    pub fn resolve(&self, name: &str) -> Result<FontHandle<L::Font>, RegistryError> {
        let name = FontName::new(name)?;
        self.resolve_name(&name)
    }

    /// Resolve an already validated name. See [`resolve`](Self::resolve).
    pub fn resolve_name(&self, name: &FontName) -> Result<FontHandle<L::Font>, RegistryError> {
        let mut table = self.table.lock();
        loop {
            match table.slots.get(name) {
                Some(Slot::Ready(font)) => {
                    Counters::bump(&self.counters.hits);
                    log::debug!("Font cache hit: {}", name);
                    return Ok(Arc::clone(font));
                }
                Some(Slot::Loading(_)) => {
                    log::debug!("Waiting for in-flight load of '{}'", name);
                    self.settled.wait(&mut table);
                }
                None => break,
            }
        }

        Counters::bump(&self.counters.misses);
        log::debug!("Font cache miss: {} ({:?})", name, self.policy);

        match self.policy {
            MissPolicy::Coalesce => {
                let ticket = table.next_ticket;
                table.next_ticket += 1;
                table.slots.insert(name.clone(), Slot::Loading(ticket));
                drop(table);

                // Clears the marker on failure or unwind and wakes waiters.
                let _in_flight = InFlight {
                    registry: self,
                    name,
                    ticket,
                };
                let font = Arc::new(self.invoke_loader(name)?);

                let mut table = self.table.lock();
                if let Some(Slot::Ready(registered)) = table.slots.get(name) {
                    log::debug!(
                        "Font '{}' was registered during load, discarding loaded font",
                        name
                    );
                    return Ok(Arc::clone(registered));
                }
                table
                    .slots
                    .insert(name.clone(), Slot::Ready(Arc::clone(&font)));
                Ok(font)
            }
            MissPolicy::Race => {
                drop(table);
                let font = Arc::new(self.invoke_loader(name)?);

                let mut table = self.table.lock();
                if let Some(Slot::Ready(winner)) = table.slots.get(name) {
                    log::debug!("Lost load race for '{}', using stored font", name);
                    return Ok(Arc::clone(winner));
                }
                table
                    .slots
                    .insert(name.clone(), Slot::Ready(Arc::clone(&font)));
                Ok(font)
            }
        }
    }

    fn invoke_loader(&self, name: &FontName) -> Result<L::Font, RegistryError> {
        Counters::bump(&self.counters.loads);
        match self.loader.load(name) {
            Ok(font) => {
                log::info!("Loaded font '{}'", name);
                Ok(font)
            }
            Err(e) => {
                Counters::bump(&self.counters.load_failures);
                log::warn!("Failed to load font '{}': {}", name, e);
                Err(RegistryError::from_load(name.as_str(), e))
            }
        }
    }

    /// Set the entry for `name`, replacing any prior entry.
    ///
    /// Never calls the loader. Returns the handle that was replaced, if any.
    /// A load in flight for the same name completes with this handle instead
    /// of its own result.
    pub fn register(
        &self,
        name: FontName,
        font: impl Into<FontHandle<L::Font>>,
    ) -> Option<FontHandle<L::Font>> {
        let font = font.into();
        Counters::bump(&self.counters.registrations);
        log::debug!("Registering font '{}'", name);

        let previous = {
            let mut table = self.table.lock();
            table.slots.insert(name, Slot::Ready(font))
        };
        match previous {
            Some(Slot::Ready(old)) => Some(old),
            Some(Slot::Loading(_)) => {
                self.settled.notify_all();
                None
            }
            None => None,
        }
    }

    /// [`register`](Self::register) with an unvalidated name.
    pub fn register_str(
        &self,
        name: &str,
        font: impl Into<FontHandle<L::Font>>,
    ) -> Result<Option<FontHandle<L::Font>>, RegistryError> {
        let name = FontName::new(name)?;
        Ok(self.register(name, font))
    }

    /// Resolve `name`, trying each fallback in order if it is unavailable.
    ///
    /// Returns the error for `name` itself if every fallback also fails.
    /// Invalid names are reported immediately.
    pub fn resolve_or<S: AsRef<str>>(
        &self,
        name: &str,
        fallbacks: &[S],
    ) -> Result<FontHandle<L::Font>, RegistryError> {
        let primary_err = match self.resolve(name) {
            Ok(font) => return Ok(font),
            Err(e) if e.is_unavailable() => e,
            Err(e) => return Err(e),
        };

        for fallback in fallbacks {
            let fallback = match FontName::new(fallback.as_ref()) {
                Ok(fallback) => fallback,
                Err(e) => {
                    log::warn!("Skipping fallback for '{}': {}", name, e);
                    continue;
                }
            };
            if let Ok(font) = self.resolve_name(&fallback) {
                log::info!("Font '{}' unavailable, using fallback '{}'", name, fallback);
                return Ok(font);
            }
        }
        Err(primary_err)
    }

    /// Resolve every name, collecting failures instead of stopping.
    pub fn preload<I>(&self, names: I) -> PreloadReport
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut report = PreloadReport::default();
        for name in names {
            let result =
                FontName::new(name.as_ref()).and_then(|n| self.resolve_name(&n).map(|_| n));
            match result {
                Ok(n) => report.loaded.push(n),
                Err(e) => report.failed.push(e),
            }
        }
        log::info!(
            "Preloaded {} fonts ({} failed)",
            report.loaded.len(),
            report.failed.len()
        );
        report
    }

    /// Return the cached handle without ever calling the loader.
    pub fn get(&self, name: &str) -> Option<FontHandle<L::Font>> {
        match self.table.lock().slots.get(name) {
            Some(Slot::Ready(font)) => Some(Arc::clone(font)),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        matches!(self.table.lock().slots.get(name), Some(Slot::Ready(_)))
    }

    /// Number of cached fonts. In-flight loads are not counted.
    pub fn len(&self) -> usize {
        self.table
            .lock()
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted snapshot of cached font names.
    pub fn names(&self) -> Vec<FontName> {
        let mut names: Vec<FontName> = self
            .table
            .lock()
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Ready(_)))
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            loads: self.counters.loads.load(Ordering::Relaxed),
            load_failures: self.counters.load_failures.load(Ordering::Relaxed),
            registrations: self.counters.registrations.load(Ordering::Relaxed),
        }
    }
}

impl<L: FontLoader> fmt::Debug for FontRegistry<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRegistry")
            .field("policy", &self.policy)
            .field("fonts", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Owns a `Loading` marker for the duration of a coalesced load.
struct InFlight<'a, L: FontLoader> {
    registry: &'a FontRegistry<L>,
    name: &'a FontName,
    ticket: u64,
}

impl<L: FontLoader> Drop for InFlight<'_, L> {
    fn drop(&mut self) {
        {
            let mut table = self.registry.table.lock();
            if matches!(table.slots.get(self.name), Some(Slot::Loading(t)) if *t == self.ticket) {
                table.slots.remove(self.name);
            }
        }
        self.registry.settled.notify_all();
    }
}

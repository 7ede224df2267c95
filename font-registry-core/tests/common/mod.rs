//! Shared integration test helpers for font-registry-core.
//!
//! Include with `mod common;` at the top of a test file.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use font_registry_core::{FontLoader, FontName, LoadError};

/// Stand-in for a platform font object.
#[derive(Debug, PartialEq, Eq)]
pub struct TestFont {
    pub name: String,
    pub generation: usize,
}

/// Deterministic loader that counts invocations per name.
///
/// Names starting with `Missing` are not found, names starting with
/// `Corrupt` fail with invalid data. Everything else loads.
#[derive(Default)]
pub struct CountingLoader {
    calls: parking_lot::Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep inside every `load` call to widen race windows.
    pub fn with_delay(delay: Duration) -> Self {
        CountingLoader {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self, name: &str) -> usize {
        self.calls.lock().get(name).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl FontLoader for CountingLoader {
    type Font = TestFont;

    fn load(&self, name: &FontName) -> Result<TestFont, LoadError> {
        self.total.fetch_add(1, Ordering::SeqCst);
        let generation = {
            let mut calls = self.calls.lock();
            let count = calls.entry(name.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if name.as_str().starts_with("Missing") || name.as_str() == "DoesNotExist" {
            return Err(LoadError::NotFound);
        }
        if name.as_str().starts_with("Corrupt") {
            return Err(LoadError::InvalidData("truncated glyf table".to_string()));
        }
        Ok(TestFont {
            name: name.to_string(),
            generation,
        })
    }
}

pub fn font(name: &str) -> TestFont {
    TestFont {
        name: name.to_string(),
        generation: 0,
    }
}

pub fn name(s: &str) -> FontName {
    FontName::new(s).expect("valid test font name")
}

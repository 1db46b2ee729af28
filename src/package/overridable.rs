//! Dual-field attribute model: an upstream original plus an optional curator
//! override, with fallback when the override is absent or stale.

use serde::{Deserialize, Serialize};

/// Equality policy used when deciding whether an override is redundant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqPolicy {
    /// Byte-for-byte comparison.
    Exact,
    /// Case-insensitive comparison (repository slugs).
    IgnoreCase,
}

impl EqPolicy {
    fn matches(self, a: &str, b: &str) -> bool {
        match self {
            EqPolicy::Exact => a == b,
            EqPolicy::IgnoreCase => a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// A field pair of (original upstream value, curator override).
///
/// The override is only stored when it meaningfully differs from the
/// original under the field's equality policy; otherwise it is cleared so
/// reads fall back to the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overridable {
    policy: EqPolicy,
    original: Option<String>,
    #[serde(rename = "override")]
    custom: Option<String>,
}

impl Overridable {
    /// Field pair compared byte-for-byte (descriptions).
    pub fn exact() -> Self {
        Self {
            policy: EqPolicy::Exact,
            original: None,
            custom: None,
        }
    }

    /// Field pair compared case-insensitively (repository slugs).
    pub fn ignore_case() -> Self {
        Self {
            policy: EqPolicy::IgnoreCase,
            original: None,
            custom: None,
        }
    }

    /// Replace the original value as fetched from upstream.
    ///
    /// If the new original differs from the stored one, any existing
    /// override is discarded: the upstream identity changed, so a prior
    /// override may now be wrong. Returns the discarded override so the
    /// caller can report it.
    pub fn set_original(&mut self, value: Option<String>) -> Option<String> {
        let discarded = if self.original.as_deref() != value.as_deref() {
            self.custom.take()
        } else {
            None
        };
        self.original = value;
        discarded
    }

    /// Store a curator override.
    ///
    /// Setting an override equal to the original (under the field's equality
    /// policy) clears it instead, so reads fall back to the original.
    pub fn set_override(&mut self, value: Option<String>) {
        let v = value.as_deref().unwrap_or("");
        let o = self.original.as_deref().unwrap_or("");
        if self.policy.matches(v, o) {
            self.custom = None;
        } else {
            self.custom = value;
        }
    }

    /// The value to display: the override when present and non-empty,
    /// falling back to the original.
    pub fn effective(&self) -> Option<&str> {
        match self.custom.as_deref() {
            Some(c) if !c.is_empty() => Some(c),
            _ => self.original.as_deref(),
        }
    }

    /// The override exactly as stored, for diagnostics. Never falls back.
    pub fn raw_override(&self) -> Option<&str> {
        self.custom.as_deref()
    }

    /// The most recently fetched upstream value.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }
}

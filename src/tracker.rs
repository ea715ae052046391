// SPDX-License-Identifier: PMPL-1.0-or-later
//! Live hierarchy tracking for bottom-up document composition.
//!
//! Independently-authored content sections register the heading level they
//! are about to emit; the scope tracks the deepest level seen so far (the
//! watermark) across the whole composition, so cross-section skips are
//! caught without sections knowing about each other.
//!
//! A [`HierarchyScope`] is an owned value: one per document/page render,
//! never shared between concurrently composing documents, passed by
//! `&mut` to every registration. There is no ambient or global current
//! level. Hosts with speculative or re-entrant render passes call
//! [`HierarchyScope::reset`] before each committed pass so abandoned
//! passes cannot leak watermark state into the next one.

use crate::level::HeadingLevel;
use crate::rule::{check_skip, Violation};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Mutable hierarchy state for one composition scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyScope {
    /// Depth the scope starts from; `None` means "no heading yet".
    base: Option<HeadingLevel>,
    /// Deepest level registered so far in the current pass.
    watermark: Option<HeadingLevel>,
}

impl HierarchyScope {
    /// A fresh scope with no heading registered yet.
    pub fn new() -> Self {
        HierarchyScope {
            base: None,
            watermark: None,
        }
    }

    /// A scope mounted at a non-zero base depth.
    ///
    /// Used when a component tree is composed into a surrounding document
    /// that has already reached `base`: the first registration is judged
    /// against that depth rather than against an empty scope.
    pub fn with_base(base: HeadingLevel) -> Self {
        HierarchyScope {
            base: Some(base),
            watermark: Some(base),
        }
    }

    /// The current watermark: the deepest level registered so far.
    pub fn depth(&self) -> Option<HeadingLevel> {
        self.watermark
    }

    /// Register a heading emission and evaluate the skip rule against the
    /// current watermark.
    ///
    /// The watermark then rises to `max(watermark, level)` whether or not
    /// the registration violated: a later shallower heading must not erase
    /// the fact that a deeper level was already reached, and the next
    /// skip-check stays relative to the deepest point of the scope.
    ///
    /// Registrations must arrive in final document order; the rule is
    /// order-dependent. In development builds a violation is also surfaced
    /// as a warning log; release builds stay silent. The returned value is
    /// identical in both configurations, so tests can assert on it
    /// regardless of build mode.
    pub fn register(&mut self, level: HeadingLevel) -> Option<Violation> {
        let violation = check_skip(self.watermark, level);
        self.watermark = Some(self.watermark.map_or(level, |w| w.max(level)));

        if cfg!(debug_assertions) {
            if let Some(v) = &violation {
                warn!(
                    observed = %v.observed,
                    watermark = ?v.prior,
                    "{} {}",
                    v.message,
                    v.suggestion
                );
            }
        }

        violation
    }

    /// Begin-pass operation: abandon the in-flight watermark and restore
    /// the scope to its initial depth.
    ///
    /// Hosts call this before each committed render pass; afterwards the
    /// next registration is evaluated exactly as if the scope were freshly
    /// created.
    pub fn reset(&mut self) {
        self.watermark = self.base;
    }
}

impl Default for HierarchyScope {
    fn default() -> Self {
        HierarchyScope::new()
    }
}

/// Cloneable handle serializing registrations onto one shared scope.
///
/// Exclusive mutation is normally enforced statically by `&mut`; this
/// handle exists for hosts that genuinely hand one composition scope to
/// multiple owners, and guarantees registrations apply one at a time in
/// lock-acquisition order.
#[derive(Debug, Clone)]
pub struct SharedScope {
    inner: Arc<Mutex<HierarchyScope>>,
}

impl SharedScope {
    /// Wrap a scope for shared ownership.
    pub fn new(scope: HierarchyScope) -> Self {
        SharedScope {
            inner: Arc::new(Mutex::new(scope)),
        }
    }

    /// Serialized [`HierarchyScope::register`].
    pub fn register(&self, level: HeadingLevel) -> Option<Violation> {
        self.lock().register(level)
    }

    /// Serialized [`HierarchyScope::reset`].
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Serialized [`HierarchyScope::depth`].
    pub fn depth(&self) -> Option<HeadingLevel> {
        self.lock().depth()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HierarchyScope> {
        // A poisoned scope is still structurally valid watermark state;
        // keep serving rather than propagate a panic into rendering.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

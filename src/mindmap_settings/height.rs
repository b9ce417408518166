//! # Height Override
//!
//! Resizing a mind map is a drag gesture: the handle emits many small deltas
//! per second, and only the release should touch the document. The tracker
//! keeps two values:
//!
//! - `persisted`: the `height` found in the block's settings, if any.
//! - `ephemeral`: the in-progress height while a drag is underway.
//!
//! ```text
//!             adjust(d)                      commit()
//!  clean ───────────────▶ pending ─────────────────────────▶ clean
//!    ▲                      │                (writes height, persisted = value)
//!    └──────────────────────┘
//!      adjust(d) lands back on the baseline (snap-to-no-change)
//! ```
//!
//! The snap check runs on every delta, so a drag that returns exactly to its
//! starting height leaves nothing to write. The baseline for that check is
//! `persisted`, or the default height when the block has none.

use crate::document::HostDocument;
use crate::error::Result;
use crate::live::LiveSettings;
use crate::model::{number, Scope, SettingsMap, DEFAULT_HEIGHT};
use serde_json::Value;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightOverride {
    persisted: Option<f64>,
    ephemeral: Option<f64>,
    default: f64,
}

impl Default for HeightOverride {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HeightOverride {
    pub fn new(persisted: Option<f64>) -> Self {
        Self::with_default(persisted, DEFAULT_HEIGHT)
    }

    pub fn with_default(persisted: Option<f64>, default: f64) -> Self {
        Self {
            persisted,
            ephemeral: None,
            default,
        }
    }

    /// Sources the persisted height from block-scope settings. A non-numeric
    /// `height` counts as absent.
    pub fn from_settings(block: &SettingsMap) -> Self {
        Self::new(block.get("height").and_then(Value::as_f64))
    }

    pub fn persisted(&self) -> Option<f64> {
        self.persisted
    }

    pub fn ephemeral(&self) -> Option<f64> {
        self.ephemeral
    }

    pub fn is_pending(&self) -> bool {
        self.ephemeral.is_some()
    }

    fn baseline(&self) -> f64 {
        self.persisted.unwrap_or(self.default)
    }

    pub fn read(&self) -> f64 {
        self.ephemeral.unwrap_or_else(|| self.baseline())
    }

    /// Apply one drag delta.
    pub fn adjust(&mut self, delta: f64) {
        if !delta.is_finite() {
            warn!(delta, "ignoring non-finite height delta");
            return;
        }
        self.set(self.read() + delta);
        trace!(delta, height = self.read(), pending = self.is_pending(), "height adjusted");
    }

    /// Set the in-progress height directly, collapsing to clean when it
    /// matches the baseline.
    pub fn set(&mut self, height: f64) {
        self.ephemeral = if height == self.baseline() {
            None
        } else {
            Some(height)
        };
    }

    /// Abandon the gesture without writing.
    pub fn discard(&mut self) {
        self.ephemeral = None;
    }

    /// Re-source `persisted` after the block settings changed underneath.
    pub fn rebase(&mut self, persisted: Option<f64>) {
        self.persisted = persisted;
        if self.ephemeral == Some(self.baseline()) {
            self.ephemeral = None;
        }
    }

    /// Persist the pending height into the block's settings. Returns the
    /// written height, or `None` when nothing was pending.
    ///
    /// On a failed write the pending value is kept so the caller can retry.
    pub fn commit<D: HostDocument + ?Sized>(
        &mut self,
        block: &mut LiveSettings,
        doc: &mut D,
    ) -> Result<Option<f64>> {
        let height = match self.ephemeral {
            Some(height) => height,
            None => return Ok(None),
        };
        debug_assert_eq!(block.scope(), Scope::Block);
        block.set(doc, "height", number(height))?;
        self.ephemeral = None;
        self.persisted = Some(height);
        debug!(height, "height committed");
        Ok(Some(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::memory::fixtures::DocumentFixture;
    use crate::document::SectionTarget;
    use crate::model::BlockId;
    use serde_json::json;

    #[test]
    fn test_read_defaults() {
        assert_eq!(HeightOverride::new(None).read(), 150.0);
        assert_eq!(HeightOverride::new(Some(336.0)).read(), 336.0);
        assert_eq!(HeightOverride::with_default(None, 90.0).read(), 90.0);
    }

    #[test]
    fn test_adjust_accumulates() {
        let mut h = HeightOverride::new(Some(150.0));
        h.adjust(20.0);
        h.adjust(5.0);
        assert_eq!(h.read(), 175.0);
        assert_eq!(h.ephemeral(), Some(175.0));
        assert_eq!(h.persisted(), Some(150.0));
    }

    #[test]
    fn test_snap_back() {
        let mut h = HeightOverride::new(Some(150.0));
        h.adjust(20.0);
        h.adjust(-20.0);
        assert_eq!(h.ephemeral(), None);
        assert_eq!(h.read(), 150.0);
    }

    #[test]
    fn test_snap_back_is_checked_on_every_delta() {
        let mut h = HeightOverride::new(Some(150.0));
        h.adjust(10.0);
        h.adjust(-10.0);
        assert!(!h.is_pending());
        h.adjust(-5.0);
        assert_eq!(h.ephemeral(), Some(145.0));
    }

    #[test]
    fn test_snap_back_against_default() {
        let mut h = HeightOverride::new(None);
        h.adjust(30.0);
        h.adjust(-30.0);
        assert!(!h.is_pending());
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut h = HeightOverride::new(Some(150.0));
        h.adjust(f64::NAN);
        h.adjust(f64::INFINITY);
        assert_eq!(h.read(), 150.0);
        assert!(!h.is_pending());
    }

    #[test]
    fn test_discard() {
        let mut h = HeightOverride::new(Some(150.0));
        h.adjust(40.0);
        h.discard();
        assert_eq!(h.read(), 150.0);
    }

    #[test]
    fn test_rebase_collapses_matching_pending_value() {
        let mut h = HeightOverride::new(Some(150.0));
        h.adjust(50.0);
        h.rebase(Some(200.0));
        assert!(!h.is_pending());
        assert_eq!(h.read(), 200.0);
    }

    #[test]
    fn test_commit_without_pending_is_noop() {
        let mut doc = DocumentFixture::new().with_block("# Root\n").build();
        let before = doc.value();
        let target = SectionTarget::CodeBlock(BlockId(0));
        let mut block = LiveSettings::load(Scope::Block, target, &doc).unwrap();

        let mut h = HeightOverride::from_settings(block.as_map());
        assert_eq!(h.commit(&mut block, &mut doc).unwrap(), None);
        assert_eq!(doc.value(), before);
    }

    #[test]
    fn test_commit_writes_height() {
        let mut doc = DocumentFixture::new()
            .with_block("---\nmarkmap:\n  height: 150\n---\n# Root\n")
            .build();
        let target = SectionTarget::CodeBlock(BlockId(0));
        let mut block = LiveSettings::load(Scope::Block, target, &doc).unwrap();

        let mut h = HeightOverride::from_settings(block.as_map());
        h.adjust(20.0);
        assert_eq!(h.commit(&mut block, &mut doc).unwrap(), Some(170.0));

        assert_eq!(block.get("height"), Some(&json!(170)));
        assert_eq!(h.persisted(), Some(170.0));
        assert_eq!(h.ephemeral(), None);
        assert_eq!(
            doc.value(),
            "```markmap\n---\nmarkmap:\n  height: 170\n---\n# Root\n```\n"
        );
    }

    #[test]
    fn test_failed_commit_keeps_pending_value() {
        let mut doc = DocumentFixture::new().with_block("# Root\n").build();
        let mut block = LiveSettings::new(
            Scope::Block,
            SectionTarget::CodeBlock(BlockId(3)),
            SettingsMap::new(),
        );
        let mut h = HeightOverride::new(None);
        h.adjust(10.0);
        assert!(h.commit(&mut block, &mut doc).is_err());
        assert_eq!(h.ephemeral(), Some(160.0));
    }
}

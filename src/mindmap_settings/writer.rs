//! # Frontmatter Writer
//!
//! Persists settings into a document section. Every write follows the same
//! discipline: resolve the section, read its whole text, re-split it into
//! header and body, swap the `markmap` entry, and replace the whole section.
//! There is no incremental patching, so consecutive writes never overlap.
//!
//! - The body after the header is carried over byte for byte.
//! - Other header keys keep their values and order.
//! - Empty settings remove the `markmap` key; a header left empty is dropped.
//! - When the settings come out unchanged the section text is written back
//!   as it was, so header comments and formatting are kept.
//! - A section whose existing header does not parse is left untouched and
//!   the codec's error is returned.

use crate::codec::FrontmatterDocument;
use crate::document::{HostDocument, SectionTarget};
use crate::error::Result;
use crate::model::{Scope, SettingsMap};
use tracing::debug;

/// Replace the section's settings with `settings`.
pub fn write<D: HostDocument + ?Sized>(
    scope: Scope,
    target: SectionTarget,
    settings: &SettingsMap,
    doc: &mut D,
) -> Result<()> {
    update(scope, target, doc, |current| *current = settings.clone())
}

/// Apply `edit` to the settings currently stored in the section's text,
/// then write the result back.
pub fn update<D, F>(scope: Scope, target: SectionTarget, doc: &mut D, edit: F) -> Result<()>
where
    D: HostDocument + ?Sized,
    F: FnOnce(&mut SettingsMap),
{
    let (from, to) = target.resolve(doc)?;
    let text = doc.get_range(from, to);

    let mut parsed = FrontmatterDocument::parse(scope, &text)?;
    let current = parsed.settings();
    let mut settings = current.clone();
    edit(&mut settings);

    // Settings unchanged: the section goes back exactly as it was read, so
    // comments and layout in the header survive.
    let rewritten = if settings.iter().eq(current.iter()) {
        text.clone()
    } else {
        parsed.set_settings(&settings);
        parsed.to_text()?
    };

    debug!(
        %scope,
        %from,
        %to,
        keys = settings.len(),
        changed = rewritten != text,
        "writing frontmatter"
    );
    doc.replace_range(&rewritten, from, to);
    Ok(())
}

use crate::commands::{CmdMessage, CmdResult};
use crate::document::HostDocument;
use crate::error::Result;
use crate::model::{number, BlockId, SettingsMap};
use crate::session::CodeBlockSession;

/// Replay a drag gesture on a block and commit it on release.
///
/// Deltas that end where the drag started leave the document untouched.
pub fn run<D: HostDocument + ?Sized>(
    doc: &mut D,
    global: &SettingsMap,
    block: BlockId,
    deltas: &[f64],
) -> Result<CmdResult> {
    let mut session = CodeBlockSession::open(doc, block, global.clone())?;
    let before = session.height();
    for delta in deltas {
        session.drag(*delta);
    }

    let mut result = CmdResult::default();
    match session.release(doc)? {
        Some(height) => result.add_message(CmdMessage::success(format!(
            "Height of block {}: {} -> {}",
            block,
            number(before),
            number(height)
        ))),
        None => result.add_message(CmdMessage::info(format!(
            "Height of block {} unchanged ({})",
            block,
            number(before)
        ))),
    }
    Ok(result.with_settings(session.merged().into_map()))
}

use crate::commands::{BlockSummary, CmdMessage, CmdResult};
use crate::document::{HostDocument, SectionTarget};
use crate::error::Result;
use crate::live::LiveSettings;
use crate::model::{BlockId, Scope};

/// List the document's mind-map blocks with their stored settings.
///
/// A block whose header does not parse is still listed; the parse error
/// becomes a warning and the listing carries on.
pub fn run<D: HostDocument + ?Sized>(doc: &D) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut blocks = Vec::new();

    for (n, section) in doc.sections().into_iter().enumerate() {
        let id = BlockId(n);
        let settings = match LiveSettings::load(Scope::Block, SectionTarget::CodeBlock(id), doc) {
            Ok(live) => Some(live.as_map().clone()),
            Err(e) => {
                result.add_message(CmdMessage::warning(format!("Block {}: {}", id, e)));
                None
            }
        };
        blocks.push(BlockSummary {
            id,
            section,
            settings,
        });
    }

    if blocks.is_empty() {
        result.add_message(CmdMessage::info("No mind-map code blocks found."));
    }
    Ok(result.with_blocks(blocks))
}

//! Integration tests for editor crate

use mailblocks_common::{BlockContent, BlockPatch, BlockStyleKey, StyleKind};
use mailblocks_editor::{EditSession, EditorError};

#[test]
fn test_document_lifecycle() -> anyhow::Result<()> {
    let mut session = EditSession::new("session-1").with_title("Weekly");

    let heading = session.add_block(BlockContent::heading("Hello"), None)?;
    let body = session.add_block(BlockContent::text("Some news"), None)?;
    session.add_block(BlockContent::Divider, None)?;
    session.add_block(BlockContent::button("https://example.com", "Read more"), None)?;

    session.update_block(&body, BlockPatch::content(BlockContent::text("Updated news")))?;
    session.move_block(3, 1)?;
    session.select_block(Some(heading.as_str()));

    assert_eq!(session.blocks().len(), 4);
    assert_eq!(session.blocks()[1].kind_name(), "button");
    assert_eq!(session.selected_block().map(|b| b.id.as_str()), Some(heading.as_str()));

    let html = session.export_html()?;
    assert!(html.contains("<title>Weekly</title>"));
    assert!(html.contains(">Updated news</p>"));
    assert!(html.find(">Read more</a>").unwrap() < html.find(">Updated news</p>").unwrap());

    Ok(())
}

#[test]
fn test_json_round_trip_through_sessions() -> anyhow::Result<()> {
    let mut session = EditSession::new("a");
    session.add_block(BlockContent::heading("Title"), None)?;
    session.add_block(BlockContent::image("https://cdn.example.com/x.png", "X"), None)?;

    let json = session.to_json(true);
    let restored = EditSession::from_json("b", &json);

    assert_eq!(restored.blocks(), session.blocks());
    Ok(())
}

#[test]
fn test_deleted_block_keeps_stale_style_override() -> anyhow::Result<()> {
    let mut session = EditSession::new("s");
    let id = session.add_block(BlockContent::text("styled"), None)?;
    session.update_block_style(&id, BlockStyleKey::FontSize, "22px");

    session.delete_block(&id)?;
    assert!(session.blocks().is_empty());
    assert_eq!(
        session.block_styles(&id, StyleKind::Paragraph).font_size.as_deref(),
        Some("22px")
    );

    // Re-creating a block under the same id picks the stale override up
    session.undo();
    let html = session.export_html()?;
    assert!(html.contains("font-size: 22px;"));

    session.delete_block_styles(&id);
    assert_eq!(
        session.block_styles(&id, StyleKind::Paragraph).font_size.as_deref(),
        Some("16px")
    );
    Ok(())
}

#[test]
fn test_noop_operations_do_not_fail() -> anyhow::Result<()> {
    let mut session = EditSession::new("s");
    session.add_block(BlockContent::text("only"), None)?;

    session.update_block("ghost", BlockPatch::content(BlockContent::Divider))?;
    session.delete_block("ghost")?;
    session.move_block(0, 7)?;

    assert_eq!(session.blocks().len(), 1);
    assert_eq!(session.blocks()[0].content, BlockContent::text("only"));
    Ok(())
}

#[test]
fn test_duplicate_ids_rejected_on_construction() {
    use mailblocks_common::Block;

    let result = EditSession::with_blocks(
        "s",
        vec![
            Block::with_id("x", BlockContent::Divider),
            Block::with_id("x", BlockContent::Divider),
        ],
    );
    assert!(matches!(result, Err(EditorError::Mutation(_))));
}

#[test]
fn test_undo_and_redo_availability() -> anyhow::Result<()> {
    let mut session = EditSession::new("s");
    assert!(!session.can_undo());

    session.add_block(BlockContent::text("a"), None)?;
    assert!(session.can_undo());
    assert!(!session.can_redo());

    assert!(session.undo());
    assert!(session.can_redo());
    assert!(!session.undo());

    assert!(session.redo());
    assert_eq!(session.blocks().len(), 1);
    Ok(())
}

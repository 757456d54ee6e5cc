//! End-to-end: commands through the processor against an on-disk database

use cardboard_kanban::activity::ListActivity;
use cardboard_kanban::board::{CreateBoard, DeleteBoard, GetBoard};
use cardboard_kanban::card::{AddCard, DeleteCard, MoveCard, UpdateCard};
use cardboard_kanban::column::{AddColumn, DeleteColumn, RenameColumn};
use cardboard_kanban::{KanbanContext, KanbanOperationProcessor, OperationProcessor, SqliteGateway};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;

fn id(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_full_board_lifecycle_is_audited() {
    let temp = TempDir::new().unwrap();
    let db = Arc::new(SqliteGateway::open(temp.path().join("board.db")).unwrap());
    let ctx = KanbanContext::new(db, "alice");
    let processor = KanbanOperationProcessor::new();

    let board = processor.process(&CreateBoard::new("Launch"), &ctx).await.unwrap();
    let board_id = id(&board);
    let todo = id(&board["columns"][0]);
    let done = id(&board["columns"][2]);

    let review = processor
        .process(&AddColumn::new(board_id.clone(), "Review"), &ctx)
        .await
        .unwrap();
    processor
        .process(&RenameColumn::new(id(&review), "QA"), &ctx)
        .await
        .unwrap();

    let mut cards = Vec::new();
    for title in ["Docs", "Tests", "Release"] {
        let card = processor
            .process(&AddCard::new(todo.clone(), title), &ctx)
            .await
            .unwrap();
        cards.push(id(&card));
    }

    processor
        .process(&UpdateCard::new(cards[0].clone()).with_label("blue"), &ctx)
        .await
        .unwrap();
    processor
        .process(&MoveCard::new(cards[2].clone(), done.clone(), 0), &ctx)
        .await
        .unwrap();
    processor
        .process(&DeleteCard::new(cards[1].clone()), &ctx)
        .await
        .unwrap();
    processor
        .process(&DeleteColumn::new(id(&review)), &ctx)
        .await
        .unwrap();

    let view = processor
        .process(&GetBoard::new(board_id.clone()), &ctx)
        .await
        .unwrap();
    let columns = view["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0]["cards"][0]["title"], "Docs");
    assert_eq!(columns[0]["cards"][0]["label"], "blue");
    assert_eq!(columns[2]["cards"][0]["title"], "Release");

    let activity = processor.process(&ListActivity::new(), &ctx).await.unwrap();
    let ops: Vec<&str> = activity["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["op"].as_str().unwrap())
        .collect();
    assert_eq!(
        ops,
        vec![
            "delete column",
            "delete card",
            "move card",
            "update card",
            "add card",
            "add card",
            "add card",
            "rename column",
            "add column",
            "create board",
        ]
    );

    processor
        .process(&DeleteBoard::new(board_id.clone()), &ctx)
        .await
        .unwrap();
    let err = processor
        .process(&GetBoard::new(board_id), &ctx)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_explicit_actor_overrides_user() {
    let db = Arc::new(SqliteGateway::open_in_memory().unwrap());
    let ctx = KanbanContext::new(db.clone(), "alice");
    let processor = KanbanOperationProcessor::with_actor("importer");

    processor.process(&CreateBoard::new("Imported"), &ctx).await.unwrap();

    // Activity is listed per actor, so the importer sees its own entry
    let importer = KanbanContext::new(db, "importer");
    let activity = processor.process(&ListActivity::new(), &importer).await.unwrap();
    assert_eq!(activity["count"], 1);
    assert_eq!(activity["entries"][0]["actor"], "importer");
}

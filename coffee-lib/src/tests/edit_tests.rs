use super::*;
use coffee_catalog::CategoryKind;
use coffee_db::{all_cups, find_cup, insert_category, insert_cup, open_memory};

use crate::search::SearchForm;

/// Two cups with every category filled.
fn catalog() -> Connection {
    let conn = open_memory().unwrap();
    insert_category(&conn, CategoryKind::Kind, "Arabica").unwrap();
    insert_category(&conn, CategoryKind::Kind, "Robusta").unwrap();
    insert_category(&conn, CategoryKind::Roasting, "Light").unwrap();
    insert_category(&conn, CategoryKind::Roasting, "Dark").unwrap();
    insert_category(&conn, CategoryKind::Condition, "Beans").unwrap();
    insert_category(&conn, CategoryKind::Condition, "Ground").unwrap();

    for (price, size, kind_id) in [(300, 250, 1), (450, 500, 2)] {
        insert_cup(
            &conn,
            &CupFields {
                price,
                size,
                kind_id,
                roasting_id: 1,
                condition_id: 1,
                taste_description: "Nutty".to_string(),
            },
        )
        .unwrap();
    }
    conn
}

fn change(row: usize, column: Column, text: &str) -> EditAction {
    EditAction::CellChanged {
        row,
        column,
        text: text.to_string(),
    }
}

fn fill_new_row(view: &mut EditView, conn: &mut Connection, row: usize, skip: &[Column]) {
    let values = [
        (Column::Price, "199"),
        (Column::Size, "100"),
        (Column::Kind, "robusta"),
        (Column::Roasting, "Dark"),
        (Column::Condition, "ground"),
        (Column::Taste, "Bitter"),
    ];
    for (column, text) in values {
        if !skip.contains(&column) {
            view.handle(conn, change(row, column, text)).unwrap();
        }
    }
}

#[test]
fn open_loads_every_cup_with_capture_enabled() {
    let conn = catalog();
    let view = EditView::open(&conn).unwrap();

    assert_eq!(view.capture_state(), CaptureState::Enabled);
    assert_eq!(view.row_count(), 2);
    assert_eq!(view.cell_text(1, Column::Kind), Some("Robusta"));
    assert_eq!(view.cell_text(0, Column::Price), Some("300"));
    assert!(!view.has_pending_changes());
}

#[test]
fn valid_edit_is_staged_not_written() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let outcome = view.handle(&mut conn, change(0, Column::Price, " 350 ")).unwrap();
    assert_eq!(outcome, EditOutcome::Cell(CellOutcome::Accepted));
    assert_eq!(view.cell_text(0, Column::Price), Some("350"));
    assert!(view.has_pending_changes());
    assert_eq!(find_cup(&conn, 1).unwrap().unwrap().price, 300);
}

#[test]
fn invalid_integer_reverts_the_cell() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let err = view
        .handle(&mut conn, change(0, Column::Price, "abc"))
        .unwrap_err();
    assert!(matches!(
        err,
        EditError::InvalidCell {
            row: 0,
            column: Column::Price,
            reason: Rejection::NotAnInteger { .. }
        }
    ));
    assert_eq!(err.column(), Some(Column::Price));
    assert_eq!(view.cell_text(0, Column::Price), Some("300"));
    assert_eq!(view.capture_state(), CaptureState::Enabled);
    assert!(!view.has_pending_changes());
}

#[test]
fn negative_size_is_refused() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let err = view
        .handle(&mut conn, change(1, Column::Size, "-500"))
        .unwrap_err();
    assert!(matches!(
        err,
        EditError::InvalidCell {
            row: 1,
            column: Column::Size,
            reason: Rejection::Negative { value: -500 }
        }
    ));
    assert_eq!(view.cell_text(1, Column::Size), Some("500"));
    assert!(!view.has_pending_changes());
}

#[test]
fn revert_restores_last_accepted_value() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    view.handle(&mut conn, change(0, Column::Size, "260")).unwrap();
    view.handle(&mut conn, change(0, Column::Size, "big"))
        .unwrap_err();
    assert_eq!(view.cell_text(0, Column::Size), Some("260"));
}

#[test]
fn category_edits_are_normalized_and_checked() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    view.handle(&mut conn, change(0, Column::Kind, "  robusta "))
        .unwrap();
    assert_eq!(view.cell_text(0, Column::Kind), Some("Robusta"));

    let err = view
        .handle(&mut conn, change(0, Column::Roasting, "Charcoal"))
        .unwrap_err();
    assert!(matches!(
        err,
        EditError::InvalidCell {
            column: Column::Roasting,
            reason: Rejection::UnknownCategory { .. },
            ..
        }
    ));
    assert_eq!(view.cell_text(0, Column::Roasting), Some("Light"));
    // No category is created by editing.
    assert_eq!(coffee_db::category_names(&conn, CategoryKind::Roasting).unwrap().len(), 2);
}

#[test]
fn id_column_is_locked() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let err = view.handle(&mut conn, change(0, Column::Id, "9")).unwrap_err();
    assert!(matches!(
        err,
        EditError::InvalidCell {
            reason: Rejection::Locked,
            ..
        }
    ));
    assert_eq!(view.cell_text(0, Column::Id), Some("1"));
}

#[test]
fn editing_back_to_the_original_unstages() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    view.handle(&mut conn, change(1, Column::Taste, "Sweet")).unwrap();
    assert!(view.has_pending_changes());
    view.handle(&mut conn, change(1, Column::Taste, "Nutty")).unwrap();
    assert!(!view.has_pending_changes());
}

#[test]
fn suppressed_events_are_ignored() {
    let conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let outcome = view.with_capture_suppressed(|v| {
        assert_eq!(v.capture_state(), CaptureState::Suppressed);
        v.on_cell_changed(&conn, 0, Column::Price, "abc").unwrap()
    });
    assert_eq!(outcome, CellOutcome::Ignored);
    assert_eq!(view.capture_state(), CaptureState::Enabled);
    assert_eq!(view.cell_text(0, Column::Price), Some("300"));
}

#[test]
fn unknown_row_is_reported() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let err = view
        .handle(&mut conn, change(7, Column::Price, "1"))
        .unwrap_err();
    assert!(matches!(err, EditError::NoSuchRow { row: 7 }));
}

#[test]
fn create_appends_blank_row_and_blocks_second_create() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let outcome = view.handle(&mut conn, EditAction::CreateCup).unwrap();
    assert_eq!(outcome, EditOutcome::Created { row: 2 });
    assert_eq!(view.row_count(), 3);
    assert_eq!(view.cell_text(2, Column::Id), Some("3"));
    assert_eq!(view.cell_text(2, Column::Price), Some(""));
    assert!(view.is_new_row(2));
    assert!(!view.is_new_row(0));
    assert_eq!(view.capture_state(), CaptureState::AwaitingNewRow);

    let err = view.handle(&mut conn, EditAction::CreateCup).unwrap_err();
    assert!(matches!(err, EditError::CreationPending));
    assert_eq!(view.row_count(), 3);
}

#[test]
fn empty_commit_is_a_no_op() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let report = view.commit(&mut conn).unwrap();
    assert_eq!((report.inserted, report.updated), (0, 0));
    assert_eq!(all_cups(&conn).unwrap().len(), 2);
    assert_eq!(view.capture_state(), CaptureState::Enabled);
}

#[test]
fn commit_writes_updates_and_reloads() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    view.handle(&mut conn, change(0, Column::Price, "320")).unwrap();
    view.handle(&mut conn, change(1, Column::Condition, "ground"))
        .unwrap();
    let outcome = view.handle(&mut conn, EditAction::Commit).unwrap();
    let EditOutcome::Committed(report) = outcome else {
        panic!("expected a commit report, got {outcome:?}");
    };
    assert_eq!(report.updated, 2);
    assert_eq!(report.inserted, 0);
    assert!(report.summary().contains("2 updated"));

    assert_eq!(find_cup(&conn, 1).unwrap().unwrap().price, 320);
    assert_eq!(find_cup(&conn, 2).unwrap().unwrap().condition.name, "Ground");
    assert!(!view.has_pending_changes());
    assert_eq!(view.cell_text(1, Column::Condition), Some("Ground"));
}

#[test]
fn complete_new_row_is_inserted_with_other_edits() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    view.handle(&mut conn, change(0, Column::Taste, "Fruity")).unwrap();
    let row = view.create_cup().unwrap();
    fill_new_row(&mut view, &mut conn, row, &[]);

    let report = view.commit(&mut conn).unwrap();
    assert_eq!((report.inserted, report.updated), (1, 1));
    assert_eq!(view.capture_state(), CaptureState::Enabled);
    assert!(!view.is_new_row(row));

    let cups = all_cups(&conn).unwrap();
    assert_eq!(cups.len(), 3);
    assert_eq!(cups[0].taste_description, "Fruity");
    assert_eq!(cups[2].kind.name, "Robusta");
    assert_eq!(cups[2].condition.name, "Ground");
    assert_eq!(cups[2].price, 199);

    // Creation is allowed again once the row is committed.
    assert!(view.create_cup().is_ok());
}

#[test]
fn new_row_may_leave_taste_empty() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let row = view.create_cup().unwrap();
    fill_new_row(&mut view, &mut conn, row, &[Column::Taste]);
    view.commit(&mut conn).unwrap();

    assert_eq!(find_cup(&conn, 3).unwrap().unwrap().taste_description, "");
}

#[test]
fn incomplete_new_row_blocks_the_whole_commit() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    view.handle(&mut conn, change(0, Column::Price, "999")).unwrap();
    let row = view.create_cup().unwrap();
    fill_new_row(&mut view, &mut conn, row, &[Column::Condition]);

    let err = view.commit(&mut conn).unwrap_err();
    match &err {
        EditError::IncompleteCreation {
            display_number,
            column,
            reason,
        } => {
            assert_eq!(*display_number, 3);
            assert_eq!(*column, Column::Condition);
            assert_eq!(*reason, Rejection::Blank);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("row 3"));

    // Nothing was written, and the view still waits for the new row.
    assert_eq!(all_cups(&conn).unwrap().len(), 2);
    assert_eq!(find_cup(&conn, 1).unwrap().unwrap().price, 300);
    assert_eq!(view.capture_state(), CaptureState::AwaitingNewRow);
    assert!(view.has_pending_changes());

    view.handle(&mut conn, change(row, Column::Condition, "Beans"))
        .unwrap();
    let report = view.commit(&mut conn).unwrap();
    assert_eq!((report.inserted, report.updated), (1, 1));
}

#[test]
fn rejected_cell_in_new_row_counts_as_missing() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let row = view.create_cup().unwrap();
    fill_new_row(&mut view, &mut conn, row, &[Column::Size]);
    view.handle(&mut conn, change(row, Column::Size, "large"))
        .unwrap_err();
    assert_eq!(view.cell_text(row, Column::Size), Some(""));

    let err = view.commit(&mut conn).unwrap_err();
    assert!(matches!(
        err,
        EditError::IncompleteCreation {
            column: Column::Size,
            ..
        }
    ));
}

#[test]
fn failed_commit_keeps_updates_and_drops_the_insert() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    view.handle(&mut conn, change(1, Column::Price, "500")).unwrap();
    let row = view.create_cup().unwrap();
    fill_new_row(&mut view, &mut conn, row, &[]);

    // The edited cup disappears underneath the view.
    conn.execute("DELETE FROM coffee_cup WHERE id = 2", []).unwrap();
    let err = view.commit(&mut conn).unwrap_err();
    assert!(matches!(
        err,
        EditError::Store(OperationError::NotFound { .. })
    ));
    assert_eq!(all_cups(&conn).unwrap().len(), 1);
    assert!(view.has_pending_changes());
    assert_eq!(view.capture_state(), CaptureState::AwaitingNewRow);
}

#[test]
fn rows_match_the_store_when_reload_after_commit_fails() {
    let mut conn = catalog();
    // Updating cup 1 also writes a row that cannot be read back.
    conn.execute_batch(
        "CREATE TRIGGER unreadable_cup AFTER UPDATE ON coffee_cup WHEN NEW.id = 1 BEGIN
             INSERT INTO coffee_cup (kind_id, roasting_id, condition_id, taste_description, price, size)
             VALUES (1, 1, 1, '', 'abc', 1);
         END;",
    )
    .unwrap();
    let mut view = EditView::open(&conn).unwrap();

    view.handle(&mut conn, change(0, Column::Price, "350")).unwrap();
    let row = view.create_cup().unwrap();
    fill_new_row(&mut view, &mut conn, row, &[]);

    let err = view.commit(&mut conn).unwrap_err();
    assert!(matches!(err, EditError::Store(_)));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM coffee_cup", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 4);

    assert_eq!(view.capture_state(), CaptureState::Enabled);
    assert!(!view.has_pending_changes());
    assert!(!view.is_new_row(row));
    assert_eq!(view.cell_text(row, Column::Id), Some("4"));
    assert_eq!(view.cell_text(0, Column::Price), Some("350"));

    // The committed value is the new baseline, so going back is a change.
    view.handle(&mut conn, change(0, Column::Price, "300")).unwrap();
    assert!(view.has_pending_changes());
    assert!(view.create_cup().is_ok());
}

#[test]
fn close_discards_uncommitted_changes() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    view.handle(&mut conn, change(0, Column::Price, "1")).unwrap();
    view.handle(&mut conn, change(1, Column::Kind, "Arabica")).unwrap();
    view.create_cup().unwrap();
    assert_eq!(view.close(), 3);

    let found = SearchForm::open(&conn).unwrap().search(&conn).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].price, 300);
    assert_eq!(found[1].kind.name, "Robusta");
}

#[test]
fn hint_and_samples() {
    let mut conn = catalog();
    let mut view = EditView::open(&conn).unwrap();

    let EditOutcome::Hint(text) = view.handle(&mut conn, EditAction::ShowHint).unwrap() else {
        panic!("expected the hint");
    };
    assert!(text.contains("Create cup"));

    let EditOutcome::Samples(lines) = view.handle(&mut conn, EditAction::ShowSamples).unwrap()
    else {
        panic!("expected samples");
    };
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1].column, Column::Roasting);
    assert_eq!(lines[1].names, vec!["Light", "Dark"]);
}

#[test]
fn draft_reports_first_missing_column() {
    let mut draft = CupDraft::default();
    assert_eq!(draft.first_missing(), Some(Column::Price));
    assert!(draft.to_fields().is_none());

    assert!(draft.apply(Column::Price, CellValue::Integer(10)));
    assert!(draft.apply(Column::Size, CellValue::Integer(20)));
    assert!(!draft.apply(Column::Kind, CellValue::Integer(1)));
    assert_eq!(draft.first_missing(), Some(Column::Kind));
}

use coffee_catalog::{CategoryKind, CupFields};
use coffee_db::*;

fn seeded() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    insert_category(&conn, CategoryKind::Kind, "Arabica").unwrap();
    insert_category(&conn, CategoryKind::Roasting, "Medium").unwrap();
    insert_category(&conn, CategoryKind::Condition, "Beans").unwrap();
    conn
}

fn fields(price: i64) -> CupFields {
    CupFields {
        price,
        size: 250,
        kind_id: 1,
        roasting_id: 1,
        condition_id: 1,
        taste_description: String::new(),
    }
}

#[test]
fn empty_commit_is_a_no_op() {
    let mut conn = seeded();
    let mut session = Session::begin();
    let stats = session.commit(&mut conn).unwrap();
    assert!(stats.is_empty());
    assert_eq!(catalog_stats(&conn).unwrap().cups, 0);
}

#[test]
fn staged_changes_are_invisible_until_commit() {
    let mut conn = seeded();
    let existing = insert_cup(&conn, &fields(100)).unwrap();

    let mut session = Session::begin();
    session.stage_insert(fields(200));
    session.stage_update(existing, fields(150));
    assert_eq!(session.pending_inserts(), 1);
    assert_eq!(session.pending_updates(), 1);

    assert_eq!(all_cups(&conn).unwrap().len(), 1);
    assert_eq!(find_cup(&conn, existing).unwrap().unwrap().price, 100);

    let stats = session.commit(&mut conn).unwrap();
    assert_eq!(stats.updated, 1);
    assert_eq!(stats.inserted.len(), 1);
    assert!(session.is_empty());

    assert_eq!(find_cup(&conn, existing).unwrap().unwrap().price, 150);
    assert_eq!(find_cup(&conn, stats.inserted[0]).unwrap().unwrap().price, 200);
}

#[test]
fn later_updates_replace_earlier_ones() {
    let mut conn = seeded();
    let id = insert_cup(&conn, &fields(100)).unwrap();

    let mut session = Session::begin();
    session.stage_update(id, fields(110));
    session.stage_update(id, fields(120));
    assert_eq!(session.pending_updates(), 1);
    assert_eq!(session.staged_update(id).unwrap().price, 120);

    session.commit(&mut conn).unwrap();
    assert_eq!(find_cup(&conn, id).unwrap().unwrap().price, 120);
}

#[test]
fn rollback_discards_everything() {
    let mut conn = seeded();
    let id = insert_cup(&conn, &fields(100)).unwrap();

    let mut session = Session::begin();
    session.stage_insert(fields(1));
    session.stage_update(id, fields(2));
    assert_eq!(session.rollback(), 2);

    let stats = session.commit(&mut conn).unwrap();
    assert!(stats.is_empty());
    assert_eq!(all_cups(&conn).unwrap().len(), 1);
    assert_eq!(find_cup(&conn, id).unwrap().unwrap().price, 100);
}

#[test]
fn failed_commit_writes_nothing_and_keeps_staged_changes() {
    let mut conn = seeded();
    let id = insert_cup(&conn, &fields(100)).unwrap();

    let mut session = Session::begin();
    session.stage_update(id, fields(300));
    let mut dangling = fields(5);
    dangling.roasting_id = 77;
    session.stage_insert(dangling);

    assert!(session.commit(&mut conn).is_err());
    assert_eq!(find_cup(&conn, id).unwrap().unwrap().price, 100);
    assert_eq!(all_cups(&conn).unwrap().len(), 1);
    assert_eq!(session.pending_updates(), 1);
    assert_eq!(session.pending_inserts(), 1);

    assert_eq!(session.discard_inserts(), 1);
    session.commit(&mut conn).unwrap();
    assert_eq!(find_cup(&conn, id).unwrap().unwrap().price, 300);
}

#[test]
fn unstage_update() {
    let mut session = Session::begin();
    session.stage_update(3, fields(1));
    assert!(session.unstage_update(3));
    assert!(!session.unstage_update(3));
    assert!(session.is_empty());
}

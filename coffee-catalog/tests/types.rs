use coffee_catalog::*;

fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
    }
}

fn sample_cup() -> Cup {
    Cup {
        id: 4,
        price: 350,
        size: 250,
        kind: category(1, "Arabica"),
        roasting: category(3, "Dark"),
        condition: category(2, "Ground"),
        taste_description: "Chocolate, nutty".to_string(),
    }
}

#[test]
fn cell_texts_follow_column_order() {
    let cells = sample_cup().cell_texts();
    assert_eq!(cells[Column::Id.index()], "4");
    assert_eq!(cells[Column::Price.index()], "350");
    assert_eq!(cells[Column::Size.index()], "250");
    assert_eq!(cells[Column::Kind.index()], "Arabica");
    assert_eq!(cells[Column::Roasting.index()], "Dark");
    assert_eq!(cells[Column::Condition.index()], "Ground");
    assert_eq!(cells[Column::Taste.index()], "Chocolate, nutty");
}

#[test]
fn fields_carry_category_ids() {
    let fields = sample_cup().fields();
    assert_eq!(fields.kind_id, 1);
    assert_eq!(fields.roasting_id, 3);
    assert_eq!(fields.condition_id, 2);
}

#[test]
fn column_indices_follow_grid_order() {
    for (i, column) in Column::ALL.iter().enumerate() {
        assert_eq!(column.index(), i);
    }
    assert_eq!(Column::ALL.len(), COLUMN_COUNT);
}

#[test]
fn identity_is_not_editable() {
    assert!(!Column::EDITABLE.contains(&Column::Id));
    assert_eq!(Column::Id.field_kind(), FieldKind::Identity);
    assert_eq!(
        Column::Roasting.field_kind(),
        FieldKind::Category(CategoryKind::Roasting)
    );
}

#[test]
fn category_kind_maps_to_its_column() {
    for kind in CategoryKind::ALL {
        assert_eq!(kind.column().field_kind(), FieldKind::Category(kind));
    }
}

#[test]
fn loose_kind_names() {
    assert_eq!(CategoryKind::from_str_loose("Roast"), Some(CategoryKind::Roasting));
    assert_eq!(CategoryKind::from_str_loose(" kind "), Some(CategoryKind::Kind));
    assert_eq!(CategoryKind::from_str_loose("state"), Some(CategoryKind::Condition));
    assert_eq!(CategoryKind::from_str_loose("origin"), None);
}

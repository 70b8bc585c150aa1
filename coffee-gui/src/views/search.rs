use coffee_catalog::{COLUMN_COUNT, CategoryKind};
use coffee_lib::NumericField;

use crate::app::CoffeeApp;
use crate::widgets::cup_table;

/// Render the search view: filter controls above the result table.
pub fn show(ui: &mut egui::Ui, app: &mut CoffeeApp) {
    ui.heading("Coffee catalog");
    ui.separator();
    ui.add_space(4.0);

    show_filters(ui, app);

    ui.add_space(4.0);
    let mut search = false;
    let mut reset = false;
    let mut edit = false;
    ui.horizontal(|ui| {
        search = ui.button("Search").clicked();
        reset = ui.button("Reset filters").clicked();
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            edit = ui.button("Edit catalog").clicked();
        });
    });
    ui.separator();

    if reset {
        app.search.reset();
    }
    if search || reset {
        app.run_search();
    }
    if edit {
        app.open_editor();
        return;
    }

    let rows: Vec<[String; COLUMN_COUNT]> = app.results.iter().map(|c| c.cell_texts()).collect();
    if rows.is_empty() {
        ui.weak("No cups match these filters.");
    } else {
        cup_table::show_results(ui, &app.headers, &rows);
    }
}

/// Numeric fields use 0 and dropdowns use "Any" to mean no constraint.
fn show_filters(ui: &mut egui::Ui, app: &mut CoffeeApp) {
    egui::Grid::new("search_filters")
        .num_columns(4)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for (i, field) in NumericField::ALL.into_iter().enumerate() {
                ui.label(app.settings.column_header(field.column()));
                ui.add(egui::DragValue::new(app.search.numeric_mut(field)).range(0..=999_999_999));

                let kind = CategoryKind::ALL[i];
                ui.label(kind.column().header());
                let control = app.search.control_mut(kind);
                let options = control.options().to_vec();
                egui::ComboBox::from_id_salt(kind.as_str())
                    .width(160.0)
                    .selected_text(control.selected.clone())
                    .show_ui(ui, |ui| {
                        for option in options {
                            ui.selectable_value(&mut control.selected, option.clone(), option);
                        }
                    });
                ui.end_row();
            }
        });
}

use coffee_catalog::{COLUMN_COUNT, Column};
use egui_extras::{Column as TableColumn, TableBuilder};

/// A cell whose text changed and lost focus.
pub struct CellEdit {
    pub row: usize,
    pub column: Column,
    pub text: String,
}

fn column_widths<'a>(builder: TableBuilder<'a>) -> TableBuilder<'a> {
    builder
        .column(TableColumn::initial(50.0).at_least(30.0)) // ID
        .column(TableColumn::initial(90.0).at_least(50.0)) // Price
        .column(TableColumn::initial(90.0).at_least(50.0)) // Size
        .column(TableColumn::initial(120.0).at_least(60.0)) // Kind
        .column(TableColumn::initial(120.0).at_least(60.0)) // Roasting
        .column(TableColumn::initial(120.0).at_least(60.0)) // Condition
        .column(TableColumn::remainder().at_least(120.0)) // Taste
}

fn row_height(ui: &egui::Ui) -> f32 {
    egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y)
}

/// Render search results read-only.
pub fn show_results(ui: &mut egui::Ui, headers: &[String], rows: &[[String; COLUMN_COUNT]]) {
    let available_height = ui.available_height();
    let text_height = row_height(ui);

    egui::ScrollArea::horizontal().show(ui, |ui| {
        let table = column_widths(
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center)),
        )
        .min_scrolled_height(0.0)
        .max_scroll_height(available_height);

        table
            .header(20.0, |mut header| {
                for title in headers {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, rows.len(), |mut row| {
                    let cells = &rows[row.index()];
                    for text in cells {
                        row.col(|ui| {
                            ui.label(text);
                        });
                    }
                });
            });
    });
}

/// Render the editable grid.
///
/// `buffers` hold what the user is typing; `displayed` is what the edit
/// view currently holds. A cell whose buffer differs from `displayed` when
/// it loses focus is returned as an edit. At most one edit is returned per
/// frame. The ID column is read-only and `new_row` is highlighted.
pub fn show_editable(
    ui: &mut egui::Ui,
    headers: &[String],
    buffers: &mut [[String; COLUMN_COUNT]],
    displayed: &[[String; COLUMN_COUNT]],
    new_row: Option<usize>,
) -> Option<CellEdit> {
    let available_height = ui.available_height();
    let text_height = row_height(ui) + 4.0;
    let mut edit = None;

    egui::ScrollArea::horizontal().show(ui, |ui| {
        let table = column_widths(
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center)),
        )
        .min_scrolled_height(0.0)
        .max_scroll_height(available_height);

        table
            .header(20.0, |mut header| {
                for title in headers {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(text_height, buffers.len(), |mut row| {
                    let row_idx = row.index();
                    row.set_selected(new_row == Some(row_idx));

                    for column in Column::ALL {
                        let idx = column.index();
                        let buffer = &mut buffers[row_idx][idx];
                        let shown = displayed.get(row_idx).map(|r| r[idx].as_str());
                        row.col(|ui| {
                            if column == Column::Id {
                                ui.label(buffer.as_str());
                                return;
                            }
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut *buffer)
                                    .desired_width(f32::INFINITY)
                                    .id_salt(("cup_cell", row_idx, idx)),
                            );
                            if response.lost_focus()
                                && edit.is_none()
                                && shown != Some(buffer.as_str())
                            {
                                edit = Some(CellEdit {
                                    row: row_idx,
                                    column,
                                    text: buffer.clone(),
                                });
                            }
                        });
                    }
                });
            });
    });

    edit
}

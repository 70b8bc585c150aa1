use coffee_lib::hints::format_samples;
use coffee_lib::{CaptureState, CellOutcome, EditAction, EditError, EditOutcome};

use crate::app::{CoffeeApp, Screen};
use crate::widgets::cup_table;

/// Render the edit view: action buttons above the editable grid.
pub fn show(ui: &mut egui::Ui, app: &mut CoffeeApp) {
    let Screen::Edit(edit) = &mut app.screen else {
        return;
    };

    let mut action = None;
    let mut close = false;
    ui.horizontal(|ui| {
        if ui.button("Create cup").clicked() {
            action = Some(EditAction::CreateCup);
        }
        if ui.button("Commit changes").clicked() {
            action = Some(EditAction::Commit);
        }
        if ui.button("Show hint").clicked() {
            action = Some(EditAction::ShowHint);
        }
        if ui.button("Show samples").clicked() {
            action = Some(EditAction::ShowSamples);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            close = ui
                .button("Close")
                .on_hover_text("Close the editor, discarding uncommitted changes")
                .clicked();
            if edit.view.has_pending_changes() {
                ui.weak("Uncommitted changes");
            }
        });
    });
    ui.separator();

    let new_row = match edit.view.capture_state() {
        CaptureState::AwaitingNewRow => edit.view.row_count().checked_sub(1),
        _ => None,
    };
    let displayed = edit.view.display_rows();
    let cell = cup_table::show_editable(ui, &app.headers, &mut edit.buffers, &displayed, new_row);

    // A cell that lost focus to a button click is applied before the button.
    let actions = cell
        .map(|cell| EditAction::CellChanged {
            row: cell.row,
            column: cell.column,
            text: cell.text,
        })
        .into_iter()
        .chain(action);
    for action in actions {
        let Screen::Edit(edit) = &mut app.screen else {
            return;
        };
        let result = edit.view.handle(&mut app.conn, action);
        edit.sync_buffers();
        match result {
            Ok(outcome) => handle_outcome(app, outcome),
            Err(e) => {
                handle_error(app, e);
                break;
            }
        }
    }

    if close {
        app.close_editor();
    }
}

fn handle_outcome(app: &mut CoffeeApp, outcome: EditOutcome) {
    match outcome {
        EditOutcome::Created { row } => {
            app.status = format!("Added row {}. Fill it in, then commit.", row + 1);
        }
        EditOutcome::Cell(CellOutcome::Accepted | CellOutcome::Ignored) => {}
        EditOutcome::Committed(report) => {
            app.status = format!(
                "Committed at {}",
                report.committed_at.format("%Y-%m-%d %H:%M:%S")
            );
            app.show_info("Changes committed", report.summary());
        }
        EditOutcome::Hint(text) => app.show_info("Hint", text),
        EditOutcome::Samples(lines) => app.show_info("Accepted values", format_samples(&lines)),
    }
}

fn handle_error(app: &mut CoffeeApp, error: EditError) {
    let title = match &error {
        EditError::InvalidCell { .. } => "Invalid value",
        EditError::IncompleteCreation { .. } => "Cannot commit",
        EditError::CreationPending => "Cannot create cup",
        EditError::NoSuchRow { .. } => "Edit failed",
        EditError::Store(_) => "Database error",
    };
    app.show_error(title, error.to_string());
}

use coffee_catalog::{COLUMN_COUNT, Cup};
use coffee_lib::{AppSettings, EditView, SearchForm};
use rusqlite::Connection;

use crate::views;
use crate::widgets::message_box::{self, MessageBox};

/// Which screen fills the central panel.
pub enum Screen {
    Search,
    Edit(EditScreen),
}

/// The edit view plus the text buffers its grid widgets write into.
pub struct EditScreen {
    pub view: EditView,
    /// One buffer per cell. Resynced from the view after every action.
    pub buffers: Vec<[String; COLUMN_COUNT]>,
}

impl EditScreen {
    pub fn new(view: EditView) -> Self {
        let buffers = view.display_rows();
        Self { view, buffers }
    }

    pub fn sync_buffers(&mut self) {
        self.buffers = self.view.display_rows();
    }
}

/// Main application state.
pub struct CoffeeApp {
    pub conn: Connection,
    pub settings: AppSettings,

    /// Column headers, with the configured size unit.
    pub headers: Vec<String>,

    pub search: SearchForm,

    /// Cups matched by the last search.
    pub results: Vec<Cup>,

    pub screen: Screen,

    /// Modal message shown over the current screen.
    pub message: Option<MessageBox>,

    /// Text for the status bar.
    pub status: String,
}

impl CoffeeApp {
    pub fn new(conn: Connection, settings: AppSettings) -> Self {
        let search = SearchForm::open(&conn).unwrap_or_else(|e| {
            log::warn!("Failed to load category filters: {}", e);
            SearchForm::default()
        });
        let mut app = Self {
            headers: settings.column_headers(),
            conn,
            settings,
            search,
            results: Vec::new(),
            screen: Screen::Search,
            message: None,
            status: String::new(),
        };
        app.run_search();
        app
    }

    pub fn run_search(&mut self) {
        match self.search.search(&self.conn) {
            Ok(cups) => {
                self.status = format!("{} cups found", cups.len());
                self.results = cups;
            }
            Err(e) => self.show_error("Search failed", e.to_string()),
        }
    }

    pub fn open_editor(&mut self) {
        match EditView::open(&self.conn) {
            Ok(view) => {
                self.status = format!("Editing {} cups", view.row_count());
                self.screen = Screen::Edit(EditScreen::new(view));
            }
            Err(e) => self.show_error("Cannot open the editor", e.to_string()),
        }
    }

    /// Leave the editor, discarding anything not committed.
    pub fn close_editor(&mut self) {
        if let Screen::Edit(edit) = std::mem::replace(&mut self.screen, Screen::Search) {
            let discarded = edit.view.close();
            if discarded > 0 {
                self.status = format!("Discarded changes to {} cups", discarded);
            }
        }
        self.run_search();
    }

    pub fn show_info(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.message = Some(MessageBox::info(title, body));
    }

    pub fn show_error(&mut self, title: impl Into<String>, body: impl Into<String>) {
        let message = MessageBox::error(title, body);
        log::warn!("{}: {}", message.title, message.body);
        self.message = Some(message);
    }
}

impl eframe::App for CoffeeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.settings.database_path.display().to_string());
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // The message box is modal.
            ui.add_enabled_ui(self.message.is_none(), |ui| match self.screen {
                Screen::Search => views::search::show(ui, self),
                Screen::Edit(_) => views::edit::show(ui, self),
            });
        });

        if let Some(message) = &self.message
            && message_box::show(ctx, message)
        {
            self.message = None;
        }
    }
}

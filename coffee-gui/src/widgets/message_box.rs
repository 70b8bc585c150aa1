#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// A message shown in a centered window until dismissed.
#[derive(Debug, Clone)]
pub struct MessageBox {
    pub kind: MessageKind,
    pub title: String,
    pub body: String,
}

impl MessageBox {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Draw the message. Returns true once the user dismisses it.
pub fn show(ctx: &egui::Context, message: &MessageBox) -> bool {
    let mut dismissed = false;
    egui::Window::new(&message.title)
        .id(egui::Id::new("message_box"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_max_width(420.0);
            match message.kind {
                MessageKind::Info => {
                    ui.label(&message.body);
                }
                MessageKind::Error => {
                    let color = ui.visuals().error_fg_color;
                    ui.label(egui::RichText::new(&message.body).color(color));
                }
            }
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        dismissed = true;
    }
    dismissed
}

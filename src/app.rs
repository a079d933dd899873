use std::path::{Path, PathBuf};

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::config::EditorConfig;
use crate::export::{format_coords, generate_fragment};
use crate::geometry::{Point, ShapeKind};
use crate::loader::{load_image, LoadedImage, IMAGE_EXTENSIONS};
use crate::region::{Region, RegionId, RegionUpdate};
use crate::render::{fit_to_width, ClickOutcome, LayoutWatcher, Overlay, OverlayStyle};
use crate::session::{AuthoringSession, Effect, Key, Mode, MIN_POLYGON_VERTICES};

// ── Property editor ─────────────────────────────────────────────────────────

/// Form buffers for editing one region's link metadata.
struct PropertyEditor {
    id: RegionId,
    link: String,
    alt: String,
    tooltip: String,
}

impl PropertyEditor {
    fn open(region: &Region) -> Self {
        Self {
            id: region.id(),
            link: region.link.clone().unwrap_or_default(),
            alt: region.alt_text.clone().unwrap_or_default(),
            tooltip: region.tooltip_text.clone().unwrap_or_default(),
        }
    }

    fn to_update(&self) -> RegionUpdate {
        RegionUpdate {
            link: Some(self.link.trim().to_string()),
            alt_text: Some(self.alt.clone()),
            tooltip_text: Some(self.tooltip.clone()),
        }
    }
}

enum ListAction {
    Select(RegionId),
    Edit(RegionId),
    Delete(RegionId),
}

// ── App ─────────────────────────────────────────────────────────────────────

pub struct ImageMapApp {
    session: AuthoringSession,
    overlay: Overlay,
    layout: LayoutWatcher,

    texture: Option<egui::TextureHandle>,
    image_size: egui::Vec2,
    pending_image: Option<LoadedImage>,

    editor: Option<PropertyEditor>,
    status: Option<String>,
}

impl ImageMapApp {
    pub fn new(config: EditorConfig, initial_image: Option<PathBuf>) -> Self {
        let mut app = Self {
            session: AuthoringSession::new(config.default_tool, config.close_radius),
            overlay: Overlay::new(OverlayStyle::from(&config)),
            layout: LayoutWatcher::default(),
            texture: None,
            image_size: egui::Vec2::ZERO,
            pending_image: None,
            editor: None,
            status: None,
        };
        if let Some(path) = initial_image {
            app.open_image(&path);
        }
        app
    }

    fn open_image(&mut self, path: &Path) {
        match load_image(path) {
            Ok(image) => {
                self.session.load_image(image.name.clone());
                self.editor = None;
                self.status = None;
                self.overlay.detach();
                self.layout.subscribe();
                self.texture = None;
                self.pending_image = Some(image);
            }
            Err(e) => {
                log::error!("Could not open {}: {}", path.display(), e);
                self.status = Some(format!("Could not open image: {e}"));
            }
        }
    }

    fn pick_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.open_image(&path);
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if let Some(image) = self.pending_image.take() {
            self.image_size = image.size();
            self.texture = Some(ctx.load_texture(
                "image",
                image.pixels,
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.session.mode() == mode {
            return;
        }
        self.session.set_mode(mode);
        self.overlay.clear_hover();
        self.status = None;
        if self.session.has_image() {
            // the image is shown afresh in the new mode; resync before painting
            self.layout.subscribe();
        }
    }

    fn after_effect(&mut self, effect: Effect) {
        if let Effect::Removed(id) = effect {
            if self.editor.as_ref().is_some_and(|e| e.id == id) {
                self.editor = None;
            }
        }
    }

    fn open_editor(&mut self, id: RegionId) {
        self.session.select(id);
        self.editor = self.session.region(id).map(PropertyEditor::open);
    }

    // ── Input ───────────────────────────────────────────────────────────────

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if self.editor.is_some() || ctx.wants_keyboard_input() {
            return;
        }
        let keys: Vec<Key> = ctx.input(|i| {
            [
                (egui::Key::Enter, Key::Enter),
                (egui::Key::Escape, Key::Escape),
                (egui::Key::Delete, Key::Delete),
                (egui::Key::Backspace, Key::Delete),
            ]
            .into_iter()
            .filter(|(k, _)| i.key_pressed(*k))
            .map(|(_, key)| key)
            .collect()
        });
        for key in keys {
            let effect = self.session.key(key);
            self.after_effect(effect);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.open_image(&path);
        }
    }

    fn handle_edit_input(&mut self, ctx: &egui::Context, response: &egui::Response, origin: egui::Pos2) {
        let overlay = &self.overlay;
        // the pointer can leave the image mid-drag; keep coords on it
        let to_local = |pos: egui::Pos2| {
            let v = (pos - origin).round();
            overlay.clamp(Point::new(v.x, v.y))
        };
        let (pressed, released, latest) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
            )
        });

        if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            if pressed {
                if let Some(pos) = response.hover_pos() {
                    self.session.pointer_down(to_local(pos));
                }
            }
            if response.double_clicked() {
                self.session.double_click();
            }
        }
        if let Some(pos) = latest {
            self.session.pointer_move(to_local(pos));
        }
        if released {
            self.session.pointer_up();
        }
    }

    fn handle_preview_input(&mut self, ctx: &egui::Context, response: &egui::Response, origin: egui::Pos2) {
        let to_local = |pos: egui::Pos2| {
            let v = pos - origin;
            Point::new(v.x, v.y)
        };

        match response.hover_pos() {
            Some(pos) => {
                self.overlay.pointer_moved(self.session.regions(), to_local(pos));
                if self.overlay.hovered().is_some() {
                    ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                }
            }
            None => self.overlay.pointer_left(),
        }

        if !response.clicked() {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        match self.overlay.click(self.session.regions(), to_local(pos)) {
            ClickOutcome::Follow { link, .. } => {
                log::info!("Opening {}", link);
                self.status = None;
                if let Err(e) = open::that(&link) {
                    log::warn!("Failed to open {}: {}", link, e);
                    self.status = Some(format!("Could not open {link}"));
                }
            }
            ClickOutcome::NoLink(id) => {
                let ordinal = self.session.ordinal(id).unwrap_or_default();
                self.status = Some(format!("Area {ordinal} has no link"));
            }
            ClickOutcome::Miss => self.status = None,
        }
    }

    // ── Panels ──────────────────────────────────────────────────────────────

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open Image…").clicked() {
                self.pick_image();
            }
            ui.separator();
            for kind in ShapeKind::all() {
                if ui
                    .selectable_label(self.session.tool() == kind, kind.label())
                    .clicked()
                {
                    self.session.set_tool(kind);
                }
            }
            ui.separator();
            let mode = self.session.mode();
            if ui.selectable_label(mode == Mode::Edit, "Edit").clicked() {
                self.set_mode(Mode::Edit);
            }
            if ui.selectable_label(mode == Mode::Preview, "Preview").clicked() {
                self.set_mode(Mode::Preview);
            }
            if !self.session.regions().is_empty() {
                ui.separator();
                if ui
                    .add(egui::Button::new(
                        egui::RichText::new("Clear All").color(egui::Color32::from_rgb(0xef, 0x44, 0x44)),
                    ))
                    .clicked()
                {
                    self.session.clear_regions();
                    self.editor = None;
                }
            }
            if let Some(status) = &self.status {
                ui.separator();
                ui.label(status.as_str());
            }
        });

        if self.session.tool() == ShapeKind::Polygon
            && self.session.has_image()
            && self.session.mode() == Mode::Edit
        {
            let count = self.session.polygon_vertex_count();
            let mut hint = String::from("Polygon: click to add points.");
            if count >= MIN_POLYGON_VERTICES {
                hint.push_str(" Click the first point (green) or double-click to finish.");
            } else {
                hint.push_str(" Add at least 3 points.");
            }
            if count > 0 {
                hint.push_str(&format!(" Press Escape to cancel. {count} point(s)"));
            }
            ui.label(egui::RichText::new(hint).color(egui::Color32::from_rgb(0xf5, 0x9e, 0x0b)));
        }
    }

    fn area_list(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Areas");
            ui.label(self.session.regions().len().to_string());
        });
        if self.session.regions().is_empty() {
            ui.weak("No areas yet");
            return;
        }

        let mut actions = Vec::new();
        let selection = self.session.selection();
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(260.0)
            .column(Column::exact(24.0))
            .column(Column::remainder())
            .column(Column::auto())
            .body(|mut body| {
                for (i, region) in self.session.regions().iter().enumerate() {
                    let id = region.id();
                    let selected = selection == Some(id);
                    body.row(24.0, |mut row| {
                        row.set_selected(selected);
                        row.col(|ui| {
                            ui.label((i + 1).to_string());
                        });
                        row.col(|ui| {
                            let label = ui.selectable_label(selected, region.shape().label());
                            if label.double_clicked() {
                                actions.push(ListAction::Edit(id));
                            } else if label.clicked() {
                                actions.push(ListAction::Select(id));
                            }
                        });
                        row.col(|ui| {
                            if ui.small_button("Edit").clicked() {
                                actions.push(ListAction::Edit(id));
                            }
                            if ui.small_button("Delete").clicked() {
                                actions.push(ListAction::Delete(id));
                            }
                        });
                    });
                }
            });

        for action in actions {
            match action {
                ListAction::Select(id) => {
                    self.session.select(id);
                }
                ListAction::Edit(id) => self.open_editor(id),
                ListAction::Delete(id) => {
                    let effect = self.session.delete(id);
                    self.after_effect(effect);
                }
            }
        }
    }

    fn code_panel(&mut self, ui: &mut egui::Ui) {
        ui.strong("Generated Code");
        let code = generate_fragment(self.session.image_name(), self.session.regions());
        if code.is_empty() {
            ui.weak("Draw areas to generate code");
            return;
        }
        egui::ScrollArea::vertical()
            .id_salt("generated_code")
            .max_height(200.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut code.as_str())
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
        if ui.button("Copy Code").clicked() {
            ui.ctx().copy_text(code);
            log::info!("Copied image map for {} area(s)", self.session.regions().len());
            self.status = Some("Copied to clipboard".to_string());
        }
    }

    fn property_editor(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let Some(region) = self.session.region(editor.id) else {
            self.editor = None;
            return;
        };
        let ordinal = self.session.ordinal(editor.id).unwrap_or_default();
        let shape = region.shape().html_name();
        let coords = format_coords(&region.geometry().coords());

        let mut save = None;
        egui::Window::new(format!("Edit Area {ordinal}"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("area_properties")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Link URL");
                        ui.add(egui::TextEdit::singleline(&mut editor.link).hint_text("https://example.com"));
                        ui.end_row();
                        ui.label("Alt Text");
                        ui.add(egui::TextEdit::singleline(&mut editor.alt).hint_text("Description"));
                        ui.end_row();
                        ui.label("Tooltip");
                        ui.add(egui::TextEdit::singleline(&mut editor.tooltip).hint_text("Hover text"));
                        ui.end_row();
                    });
                ui.separator();
                ui.weak(format!("Shape: {shape}"));
                ui.weak(format!("Coords: {coords}"));
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        save = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        save = Some(false);
                    }
                });
            });

        match save {
            Some(true) => {
                let (id, update) = (editor.id, editor.to_update());
                self.session.update_region(id, update);
                self.editor = None;
            }
            Some(false) => self.editor = None,
            None => {}
        }
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for ImageMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.ensure_texture(ctx);
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::SidePanel::right("sidebar")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                self.area_list(ui);
                ui.separator();
                self.code_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(texture_id) = self.texture.as_ref().map(|t| t.id()) else {
                self.layout.unsubscribe();
                ui.centered_and_justified(|ui| {
                    if ui.button("Click to open an image, or drop one here").clicked() {
                        self.pick_image();
                    }
                });
                return;
            };

            egui::ScrollArea::vertical().show(ui, |ui| {
                let display = fit_to_width(self.image_size, ui.available_width());
                let (rect, response) = ui.allocate_exact_size(display, egui::Sense::click_and_drag());
                if let Some(event) = self.layout.observe(rect.size()) {
                    self.overlay.sync(event);
                }

                let painter = ui.painter_at(rect);
                painter.image(
                    texture_id,
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                match self.session.mode() {
                    Mode::Edit => self.handle_edit_input(ctx, &response, rect.min),
                    Mode::Preview => self.handle_preview_input(ctx, &response, rect.min),
                }

                let scene = self.overlay.scene(&self.session);
                self.overlay.paint(&painter, rect.min, &scene);
            });
        });

        self.property_editor(ctx);
    }
}

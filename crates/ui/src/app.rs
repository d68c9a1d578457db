use std::collections::HashMap;

use eframe::egui;
use scrollspy_core::{ActiveSectionTracker, PageDoc, PollSubscription, SectionBody};
use scrollspy_protocol::{
    DEFAULT_VISIBILITY_THRESHOLD, DisplayMeta, NavCommand, ObservationBatch, SectionId, ThemeToken,
};

use crate::demo;
use crate::theme::{self, ThemeMode};

/// Window width below which the sidebar collapses into the popover menu.
const NARROW_BREAKPOINT: f32 = 700.0;
/// Scroll offset past which the back-to-top control appears.
const BACK_TO_TOP_AFTER: f32 = 400.0;
const ARTICLE_MAX_WIDTH: f32 = 720.0;
const SIDEBAR_WIDTH: f32 = 230.0;

/// One mounted page: the document plus the page-scoped tracker that owns
/// the active-section state for as long as the page is shown.
struct LoadedPage {
    page: PageDoc,
    tracker: ActiveSectionTracker<DisplayMeta>,
    /// Threshold state per section from the previous frame's rect check.
    visible: HashMap<SectionId, bool>,
    /// Section whose block should scroll into view this frame.
    pending_scroll: Option<SectionId>,
    /// Reset the article scroll offset to the very top this frame.
    pending_top: bool,
}

/// Main application state.
pub struct PageApp {
    loaded: Option<LoadedPage>,
    theme_mode: ThemeMode,
    error: Option<String>,
    /// Article scroll offset from the last frame, for the back-to-top control.
    scroll_offset: f32,
}

impl PageApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(theme::visuals(ThemeMode::Dark));
        theme::apply_typography(&cc.egui_ctx);

        let mut app = Self {
            loaded: None,
            theme_mode: ThemeMode::Dark,
            error: None,
            scroll_offset: 0.0,
        };
        app.install_page(demo::sample_page());
        app
    }

    fn install_page(&mut self, page: PageDoc) {
        // Unmount the previous page first; dropping its tracker releases
        // the old observation.
        self.loaded = None;
        self.scroll_offset = 0.0;

        match page.tracker() {
            Ok(mut tracker) => {
                // Section rects are re-checked every frame, so the
                // observation itself is a passive handle.
                tracker.attach_observation(Box::new(PollSubscription));
                self.loaded = Some(LoadedPage {
                    page,
                    tracker,
                    visible: HashMap::new(),
                    pending_scroll: None,
                    pending_top: false,
                });
                self.error = None;
            }
            Err(e) => {
                self.error = Some(format!("Invalid page config: {e}"));
            }
        }
    }

    fn load_page_bytes(&mut self, data: &[u8]) {
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!("scrollspy: parsing {} bytes...", data.len()).into());
        match PageDoc::from_json(data) {
            Ok(page) => self.install_page(page),
            Err(e) => {
                self.error = Some(format!("Failed to parse page: {e}"));
            }
        }
    }

    fn navigate(&mut self, id: &str) {
        if let Some(loaded) = &mut self.loaded {
            if let Err(err) = loaded.tracker.navigate_to(id) {
                // Unknown entries are a nav no-op at the surface.
                log::debug!("{err}");
            }
        }
    }

    /// Translate drained tracker commands into this frame's scroll plan.
    fn collect_nav_commands(&mut self) {
        let Some(loaded) = &mut self.loaded else {
            return;
        };
        for command in loaded.tracker.drain_commands() {
            match command {
                NavCommand::ScrollIntoView { id, .. } => loaded.pending_scroll = Some(id),
                NavCommand::ScrollToTop { .. } => loaded.pending_top = true,
            }
        }
    }
}

fn nav_entries(
    ui: &mut egui::Ui,
    tracker: &ActiveSectionTracker<DisplayMeta>,
    mode: ThemeMode,
    clicked: &mut Option<SectionId>,
) {
    for section in tracker.sections() {
        let active = tracker.is_active(&section.id);
        let color = if active {
            theme::resolve(section.meta.tone, mode)
        } else {
            theme::resolve(ThemeToken::NavEntryText, mode)
        };
        let mut text = egui::RichText::new(format!("{} {}", section.meta.icon, section.title))
            .color(color);
        if active {
            text = text.strong();
        }
        if ui.selectable_label(active, text).clicked() {
            *clicked = Some(section.id.clone());
        }
    }
}

fn render_section(ui: &mut egui::Ui, body: &SectionBody, mode: ThemeMode) {
    let tone = theme::resolve(body.tone, mode);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&body.icon).size(theme::FONT_HEADING));
        ui.label(
            egui::RichText::new(&body.title)
                .size(theme::FONT_HEADING)
                .color(tone)
                .strong(),
        );
    });
    ui.add_space(4.0);
    for paragraph in &body.paragraphs {
        ui.label(egui::RichText::new(paragraph).color(theme::resolve(ThemeToken::BodyText, mode)));
        ui.add_space(6.0);
    }
    for link in &body.links {
        ui.hyperlink_to(format!("→ {}", link.label), &link.url);
    }
}

impl eframe::App for PageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mode = self.theme_mode;
        let narrow = ctx.screen_rect().width() < NARROW_BREAKPOINT;
        let mut clicked: Option<SectionId> = None;
        let mut opened_bytes: Option<Vec<u8>> = None;

        // Top toolbar: title, open, theme toggle, popover nav when narrow.
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let title = self
                    .loaded
                    .as_ref()
                    .map_or("scrollspy", |loaded| loaded.page.title.as_str());
                ui.label(
                    egui::RichText::new(title)
                        .size(theme::FONT_TITLE)
                        .color(theme::resolve(ThemeToken::HeadingText, mode))
                        .strong(),
                );
                ui.separator();

                if ui.button("📂 Open").clicked() {
                    #[cfg(not(target_arch = "wasm32"))]
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Page", &["json"])
                        .pick_file()
                    {
                        match std::fs::read(&path) {
                            Ok(data) => opened_bytes = Some(data),
                            Err(e) => {
                                self.error = Some(format!("Failed to read file: {e}"));
                            }
                        }
                    }
                }

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "🌙 Dark",
                    ThemeMode::Light => "☀ Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = match self.theme_mode {
                        ThemeMode::Dark => ThemeMode::Light,
                        ThemeMode::Light => ThemeMode::Dark,
                    };
                    ctx.set_visuals(theme::visuals(self.theme_mode));
                }

                if narrow {
                    if let Some(loaded) = &self.loaded {
                        ui.menu_button("☰ Sections", |ui| {
                            nav_entries(ui, &loaded.tracker, mode, &mut clicked);
                            if clicked.is_some() {
                                ui.close();
                            }
                        });
                    }
                }
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::RED, err);
                } else if let Some(loaded) = &self.loaded {
                    let tracker = &loaded.tracker;
                    let position = tracker
                        .registry()
                        .position(tracker.current_id())
                        .map_or(0, |i| i + 1);
                    let title = tracker
                        .registry()
                        .get(tracker.current_id())
                        .map_or("", |s| s.title.as_str());
                    ui.label(format!(
                        "Reading: {title} ({position}/{})",
                        tracker.sections().len()
                    ));
                } else {
                    ui.label("No page loaded — click Open");
                }
            });
        });

        // Sidebar nav on wide windows.
        if !narrow && self.loaded.is_some() {
            egui::SidePanel::left("section_nav")
                .exact_width(SIDEBAR_WIDTH)
                .show(ctx, |ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("ON THIS PAGE")
                            .small()
                            .color(theme::resolve(ThemeToken::MutedText, mode)),
                    );
                    ui.add_space(4.0);
                    if let Some(loaded) = &self.loaded {
                        nav_entries(ui, &loaded.tracker, mode, &mut clicked);
                    }
                });
        }

        // Nav gestures first: the highlight must reflect the click in this
        // same frame, before the scroll catches up.
        if let Some(id) = clicked {
            self.navigate(&id);
        }
        self.collect_nav_commands();

        // Central panel: the article itself.
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(loaded) = &mut self.loaded else {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() / 3.0);
                        ui.heading("📑");
                        ui.heading("Open a page document to start reading");
                    });
                });
                return;
            };

            let reset_top = std::mem::take(&mut loaded.pending_top);
            let target = loaded.pending_scroll.take();

            let mut scroll_area = egui::ScrollArea::vertical()
                .id_salt("article")
                .auto_shrink([false, false]);
            if reset_top {
                scroll_area = scroll_area.vertical_scroll_offset(0.0);
            }

            let mut rects: Vec<(SectionId, egui::Rect)> = Vec::new();
            let output = scroll_area.show(ui, |ui| {
                let viewport = ui.clip_rect();
                ui.set_max_width(ARTICLE_MAX_WIDTH);

                if let Some(subtitle) = &loaded.page.subtitle {
                    ui.label(
                        egui::RichText::new(subtitle)
                            .italics()
                            .color(theme::resolve(ThemeToken::MutedText, mode)),
                    );
                    ui.add_space(16.0);
                }

                for body in &loaded.page.sections {
                    let response = ui.scope(|ui| render_section(ui, body, mode)).response;
                    if target.as_ref().is_some_and(|id| *id == body.id) {
                        response.scroll_to_me(Some(egui::Align::Min));
                    }
                    rects.push((body.id.clone(), response.rect));
                    ui.add_space(28.0);
                }

                viewport
            });
            let viewport = output.inner;
            self.scroll_offset = output.state.offset.y;

            // Observation pass: report threshold crossings since the last
            // frame, batched, in document order.
            let mut batch = ObservationBatch::new();
            for (id, rect) in &rects {
                let overlap = (rect.bottom().min(viewport.bottom())
                    - rect.top().max(viewport.top()))
                .max(0.0);
                let fraction = if rect.height() > 0.0 {
                    overlap / rect.height()
                } else {
                    0.0
                };
                let now_visible = f64::from(fraction) >= DEFAULT_VISIBILITY_THRESHOLD;
                let was_visible = loaded.visible.insert(id.clone(), now_visible).unwrap_or(false);
                if now_visible != was_visible {
                    batch.push(id.clone(), now_visible);
                }
            }
            if !batch.is_empty() {
                loaded.tracker.apply_batch(&batch);
            }
        });

        // Floating back-to-top control once the reader is deep in the page.
        if self.scroll_offset > BACK_TO_TOP_AFTER && self.loaded.is_some() {
            let mut go_top = false;
            egui::Area::new(egui::Id::new("back_to_top"))
                .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -40.0))
                .show(ctx, |ui| {
                    let button = egui::Button::new(
                        egui::RichText::new("⬆ Top")
                            .color(theme::resolve(ThemeToken::BackToTopIcon, mode)),
                    )
                    .fill(theme::resolve(ThemeToken::BackToTopBackground, mode))
                    .corner_radius(egui::CornerRadius::same(14));
                    if ui.add(button).clicked() {
                        go_top = true;
                    }
                });
            if go_top {
                if let Some(loaded) = &mut self.loaded {
                    loaded.tracker.scroll_to_top();
                }
            }
        }

        if let Some(data) = opened_bytes {
            self.load_page_bytes(&data);
        }
    }
}

use scrollspy_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Mocha palette
    use ThemeToken::*;
    match token {
        ToneSky => ResolvedColor::rgb(0x89, 0xb4, 0xfa),    // Blue
        ToneAmber => ResolvedColor::rgb(0xfa, 0xb3, 0x87),  // Peach
        ToneEmerald => ResolvedColor::rgb(0xa6, 0xe3, 0xa1), // Green
        ToneViolet => ResolvedColor::rgb(0xcb, 0xa6, 0xf7), // Mauve
        ToneRose => ResolvedColor::rgb(0xf3, 0x8b, 0xa8),   // Red
        ToneSlate => ResolvedColor::rgb(0xa6, 0xad, 0xc8),  // Subtext0

        NavBackground => ResolvedColor::rgb(0x18, 0x18, 0x25), // Mantle
        NavEntryText => ResolvedColor::rgb(0xba, 0xc2, 0xde),  // Subtext1
        NavEntryActiveText => ResolvedColor::rgb(0xcd, 0xd6, 0xf4), // Text
        NavEntryActiveBackground => ResolvedColor::rgba(0x89, 0xb4, 0xfa, 50),
        NavEntryHover => ResolvedColor::rgba(0xcd, 0xd6, 0xf4, 20),

        HeadingText => ResolvedColor::rgb(0xcd, 0xd6, 0xf4), // Text
        BodyText => ResolvedColor::rgb(0xba, 0xc2, 0xde),    // Subtext1
        MutedText => ResolvedColor::rgb(0xa6, 0xad, 0xc8),   // Subtext0
        LinkText => ResolvedColor::rgb(0x89, 0xb4, 0xfa),    // Blue

        Background => ResolvedColor::rgb(0x11, 0x11, 0x1b), // Crust
        Surface => ResolvedColor::rgb(0x1e, 0x1e, 0x2e),    // Base
        Border => ResolvedColor::rgb(0x31, 0x32, 0x44),     // Surface0

        PopoverBackground => ResolvedColor::rgb(0x1e, 0x1e, 0x2e),
        PopoverBorder => ResolvedColor::rgb(0x45, 0x47, 0x5a), // Surface1
        BackToTopBackground => ResolvedColor::rgb(0x31, 0x32, 0x44),
        BackToTopIcon => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        ToneSky => ResolvedColor::rgb(40, 120, 200),
        ToneAmber => ResolvedColor::rgb(200, 120, 20),
        ToneEmerald => ResolvedColor::rgb(56, 142, 60),
        ToneViolet => ResolvedColor::rgb(120, 80, 190),
        ToneRose => ResolvedColor::rgb(200, 50, 90),
        ToneSlate => ResolvedColor::rgb(100, 100, 110),

        NavBackground => ResolvedColor::rgb(248, 248, 250),
        NavEntryText => ResolvedColor::rgb(80, 80, 100),
        NavEntryActiveText => ResolvedColor::rgb(20, 20, 30),
        NavEntryActiveBackground => ResolvedColor::rgba(66, 135, 245, 50),
        NavEntryHover => ResolvedColor::rgba(0, 0, 0, 12),

        HeadingText => ResolvedColor::rgb(20, 20, 30),
        BodyText => ResolvedColor::rgb(60, 60, 75),
        MutedText => ResolvedColor::rgb(100, 100, 110),
        LinkText => ResolvedColor::rgb(50, 110, 220),

        Background => ResolvedColor::rgb(255, 255, 255),
        Surface => ResolvedColor::rgb(250, 250, 252),
        Border => ResolvedColor::rgb(210, 210, 220),

        PopoverBackground => ResolvedColor::rgb(255, 255, 255),
        PopoverBorder => ResolvedColor::rgb(210, 210, 220),
        BackToTopBackground => ResolvedColor::rgb(235, 235, 240),
        BackToTopIcon => ResolvedColor::rgb(40, 40, 50),
    }
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_TITLE: f32 = 22.0;
pub const FONT_HEADING: f32 = 17.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_CAPTION: f32 = 12.0;

/// Apply the article typography scale to egui styles.
pub fn apply_typography(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(FONT_HEADING),
    );
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY));
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(FONT_BODY),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(FONT_CAPTION),
    );
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.interact_size.y = 26.0;
    ctx.set_style(style);
}

pub fn visuals(mode: ThemeMode) -> egui::Visuals {
    let mut v = match mode {
        ThemeMode::Dark => egui::Visuals::dark(),
        ThemeMode::Light => egui::Visuals::light(),
    };
    v.panel_fill = resolve(ThemeToken::Surface, mode);
    v.window_fill = resolve(ThemeToken::PopoverBackground, mode);
    v.extreme_bg_color = resolve(ThemeToken::Background, mode);
    v.widgets.noninteractive.bg_stroke =
        egui::Stroke::new(1.0, resolve(ThemeToken::Border, mode));
    v.selection.bg_fill = resolve(ThemeToken::NavEntryActiveBackground, mode);
    v.hyperlink_color = resolve(ThemeToken::LinkText, mode);
    v.window_corner_radius = egui::CornerRadius::same(6);
    v.menu_corner_radius = egui::CornerRadius::same(6);
    v
}

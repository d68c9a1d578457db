use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by each surface's active theme.
///
/// Section configs reference tone tokens in their display meta; the nav
/// and article widgets reference the rest. The core never resolves these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    // Per-section accent tones (referenced from `DisplayMeta`)
    ToneSky,
    ToneAmber,
    ToneEmerald,
    ToneViolet,
    ToneRose,
    ToneSlate,

    // Sidebar / popover nav
    NavBackground,
    NavEntryText,
    NavEntryActiveText,
    NavEntryActiveBackground,
    NavEntryHover,

    // Article body
    HeadingText,
    BodyText,
    MutedText,
    LinkText,

    Background,
    Surface,
    Border,

    // Floating controls
    PopoverBackground,
    PopoverBorder,
    BackToTopBackground,
    BackToTopIcon,
}

impl ThemeToken {
    /// Fallback accent for configs that specify no tone.
    pub const DEFAULT_TONE: ThemeToken = ThemeToken::ToneSlate;
}

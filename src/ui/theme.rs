//! Dark color palette for the demo window.

// Background colors
pub const BACKGROUND: u32 = 0x1e1e1e;
pub const PANEL_BACKGROUND: u32 = 0x252526;
pub const HEADER_BACKGROUND: u32 = 0x2d2d30;
pub const BORDER_COLOR: u32 = 0x3e3e42;
pub const BUTTON_BACKGROUND: u32 = 0x3a3a3a;
pub const HOVER_COLOR: u32 = 0x505050;

// Text colors
pub const TEXT_COLOR: u32 = 0xd4d4d4;
pub const TEXT_COLOR_SECONDARY: u32 = 0xcccccc;
pub const MUTED_TEXT: u32 = 0x6e7681;

// Accent colors
pub const STEP_TITLE: u32 = 0x4ec9b0;
pub const BLUE_ACCENT: u32 = 0x007acc;
pub const BLUE_ACCENT_HOVER: u32 = 0x0088ee;
pub const GREEN_BUTTON: u32 = 0x0e7a0d;
pub const GREEN_BUTTON_HOVER: u32 = 0x13a10e;
pub const RED_BUTTON: u32 = 0x7a0d0d;
pub const RED_BUTTON_HOVER: u32 = 0x9a1d1d;

// Trend colors
pub const TREND_POSITIVE: u32 = 0x77dd77;
pub const TREND_NEGATIVE: u32 = 0xdd7777;
pub const TREND_NEUTRAL: u32 = 0xaaaaaa;

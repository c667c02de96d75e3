// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for the sleuth CLI.
//!
//! OneDark on dark terminals, One Light on light ones. Detection tries
//! `SLEUTH_THEME` first (for explicit control), then `COLORFGBG` (set by some
//! terminals), then defaults to dark. `NO_COLOR` and non-TTY stdout turn
//! styling off entirely, so piping `sleuth search` into a file gives plain text.
//!
//! Marked segments of a result render bold in the accent color; group headers
//! get the boxed section treatment.

use std::sync::OnceLock;

use crate::search::{CascadeStage, HitSource};
use crate::types::{Segment, SegmentKind};

/// Width between the `│` borders.
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn parse_theme(name: &str) -> Option<Theme> {
    match name.to_lowercase().as_str() {
        "light" | "l" => Some(Theme::Light),
        "dark" | "d" => Some(Theme::Dark),
        _ => None,
    }
}

/// `COLORFGBG` is "fg;bg"; backgrounds 7 and up (except 8) are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg = value.split(';').next_back()?.parse::<u8>().ok()?;
    Some(if bg >= 7 && bg != 8 {
        Theme::Light
    } else {
        Theme::Dark
    })
}

fn detect_theme() -> Theme {
    if let Some(theme) = std::env::var("SLEUTH_THEME").ok().and_then(|t| parse_theme(&t)) {
        return theme;
    }
    if let Some(theme) = std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| theme_from_colorfgbg(&v))
    {
        return theme;
    }
    Theme::Dark
}

/// The current theme (cached).
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const BLUE: (u8, u8, u8) = (97, 175, 239); // #61afef
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const BLUE: (u8, u8, u8) = (64, 120, 242); // #4078f2
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164); // #a626a4
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Colors only on a TTY, and never with `NO_COLOR` set.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply a theme color with optional modifiers.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length without ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

/// `│ content          │`
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    let (b, r) = (border(), reset());
    println!("{b}│{r}{content}{}{b}│{r}", " ".repeat(pad));
}

/// `┌─ LABEL ──────────┐`
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    let (b, r) = (border(), reset());
    println!("{b}┌{r}{label_part}{b}{}┐{r}", "─".repeat(remaining));
}

/// `└──────────────────┘`
pub fn section_bot() {
    let (b, r) = (border(), reset());
    println!("{b}└{}┘{r}", "─".repeat(BOX_WIDTH));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Highlighted text: marked segments bold in the accent color.
pub fn segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| match seg.kind {
            SegmentKind::Marked if use_colors() => themed(YELLOW, &[BOLD], &seg.text),
            SegmentKind::Marked => format!("[{}]", seg.text),
            SegmentKind::Plain => seg.text.clone(),
        })
        .collect()
}

/// Which stage of which oracle answered, e.g. `scoped/prefix`.
pub fn source_label(source: Option<(HitSource, CascadeStage)>) -> String {
    let Some((origin, stage)) = source else {
        return themed(GRAY, &[], "none");
    };
    let origin_name = match origin {
        HitSource::Scoped => "scoped",
        HitSource::Full => "full",
        HitSource::Joined => "joined",
    };
    let color: fn() -> String = match stage {
        CascadeStage::Exact => GREEN,
        CascadeStage::Prefix => BLUE,
        CascadeStage::Substring => MAGENTA,
    };
    themed(color, &[], &format!("{}/{}", origin_name, stage))
}

/// Left-pad a styled string to a visible width.
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Green under 5ms, yellow under 20ms, red beyond.
pub fn timing_ms(value: f64) -> String {
    let text = format!("{:.3} ms", value);
    let color: fn() -> String = if value < 5.0 {
        GREEN
    } else if value < 20.0 {
        YELLOW
    } else {
        RED
    };
    themed(color, &[], &text)
}

/// Oracle scores are small; two decimals are enough to tell hits apart.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>6.2}", score);
    if score >= 5.0 {
        themed(GREEN, &[BOLD], &text)
    } else if score >= 1.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(GRAY, &[], &text)
    }
}

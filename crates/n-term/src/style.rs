// SPDX-License-Identifier: MIT
//
// Text styling: attributes, colors and painted strings.
//
// An inline prompt does not own a frame buffer; it writes whole lines of
// text. So styling is applied to strings up front: `Style::paint` wraps a
// string in the SGR sequences for its color and attributes and resets
// afterward. The width module knows how to skip those sequences when
// measuring, so painted strings can be laid out like plain ones.

use crate::ansi;

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR (Select Graphic Rendition) parameters.
    ///
    /// ```
    /// use n_term::style::Attr;
    ///
    /// let style = Attr::BOLD | Attr::DIM;
    /// assert!(style.contains(Attr::BOLD));
    /// assert!(!style.contains(Attr::ITALIC));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1: increased intensity.
        const BOLD      = 1 << 0;
        /// SGR 2: decreased intensity (faint).
        const DIM       = 1 << 1;
        /// SGR 3: italic or oblique.
        const ITALIC    = 1 << 2;
        /// SGR 4: single underline.
        const UNDERLINE = 1 << 3;
        /// SGR 7: swap foreground and background.
        const INVERSE   = 1 << 4;
    }
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// A terminal foreground color.
///
/// Indices 0-7 are the standard palette, 8-15 the bright variants, and
/// 16-255 the extended 256-color cube and grayscale ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Color {
    /// The terminal's own default color.
    #[default]
    Default,
    /// A palette index.
    Ansi(u8),
}

impl Color {
    pub const BLACK: Self = Self::Ansi(0);
    pub const RED: Self = Self::Ansi(1);
    pub const GREEN: Self = Self::Ansi(2);
    pub const YELLOW: Self = Self::Ansi(3);
    pub const BLUE: Self = Self::Ansi(4);
    pub const MAGENTA: Self = Self::Ansi(5);
    pub const CYAN: Self = Self::Ansi(6);
    pub const WHITE: Self = Self::Ansi(7);
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// A foreground color plus attributes.
///
/// The default style is plain: [`paint`](Self::paint) returns the text
/// unchanged, with no escape sequences at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Color,
    pub attr: Attr,
}

impl Style {
    /// A style that emits nothing.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            fg: Color::Default,
            attr: Attr::empty(),
        }
    }

    /// Builder: set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: add attributes.
    #[must_use]
    pub const fn attr(mut self, attr: Attr) -> Self {
        self.attr = self.attr.union(attr);
        self
    }

    /// Whether painting with this style would change the text.
    #[inline]
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.fg == Color::Default && self.attr.is_empty()
    }

    /// Wrap `text` in this style's SGR sequences, followed by a reset.
    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_owned();
        }
        let mut out = Vec::with_capacity(text.len() + 16);
        // Writing into a Vec cannot fail.
        let _ = ansi::attrs(&mut out, self.attr);
        if self.fg != Color::Default {
            let _ = ansi::fg(&mut out, self.fg);
        }
        out.extend_from_slice(text.as_bytes());
        let _ = ansi::reset(&mut out);
        // Only valid UTF-8 went in: ASCII escapes and a `&str`.
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Append `text` painted with this style to `out`.
    pub fn paint_into(&self, out: &mut String, text: &str) {
        out.push_str(&self.paint(text));
    }
}

/// Whether color output should be used at all.
///
/// Honors the `NO_COLOR` convention (<https://no-color.org>): any
/// non-empty value disables color.
#[must_use]
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

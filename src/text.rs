//! Minimal rich text with the section-sign legacy encoding the host's
//! display payloads expect.
//!
//! A [`Text`] is an ordered run of [`Span`]s, each carrying an optional
//! color and a set of decorations. [`Text::to_legacy`] flattens it into
//! the `§`-code string form deterministically; repeated calls on the
//! same value always produce the same string.

use std::fmt::{self, Display};

const SECTION: char = '§';

/// The sixteen legacy text colors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl Color {
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
        }
    }
}

/// A single styled run of text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Span {
    text: String,
    color: Option<Color>,
    bold: bool,
    italic: bool,
    underlined: bool,
    strikethrough: bool,
    obfuscated: bool,
}

impl Span {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub const fn underlined(mut self) -> Self {
        self.underlined = true;
        self
    }

    #[must_use]
    pub const fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    #[must_use]
    pub const fn obfuscated(mut self) -> Self {
        self.obfuscated = true;
        self
    }

    const fn is_styled(&self) -> bool {
        self.color.is_some()
            || self.bold
            || self.italic
            || self.underlined
            || self.strikethrough
            || self.obfuscated
    }

    fn write_codes(&self, out: &mut String) {
        if let Some(color) = self.color {
            out.push(SECTION);
            out.push(color.code());
        }
        // Decoration emit order is fixed so the output is canonical.
        for (active, code) in [
            (self.obfuscated, 'k'),
            (self.bold, 'l'),
            (self.strikethrough, 'm'),
            (self.underlined, 'n'),
            (self.italic, 'o'),
        ] {
            if active {
                out.push(SECTION);
                out.push(code);
            }
        }
    }
}

/// Rich text: an ordered sequence of styled spans.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Text {
    spans: Vec<Span>,
}

impl Text {
    #[must_use]
    pub const fn new() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().append(Span::text(text))
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self::new().append(Span::text(text).color(color))
    }

    #[must_use]
    pub fn append(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| span.text.is_empty())
    }

    /// Flatten into the legacy `§`-code string.
    ///
    /// A span's color code implicitly clears decorations, so it is
    /// emitted first, followed by decoration codes in a fixed order. A
    /// colorless span following a styled one is preceded by `§r`.
    #[must_use]
    pub fn to_legacy(&self) -> String {
        let mut out = String::new();
        let mut styled = false;
        for span in &self.spans {
            if span.color.is_none() && styled {
                out.push(SECTION);
                out.push('r');
            }
            span.write_codes(&mut out);
            out.push_str(&span.text);
            styled = span.is_styled();
        }
        out
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_legacy())
    }
}

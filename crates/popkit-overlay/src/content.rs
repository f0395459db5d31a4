#![forbid(unsafe_code)]

//! Overlay content model.
//!
//! Content is laid out top to bottom in four sections: the title bar (icon,
//! title text, close button), a sticky header, the scrolling body and a
//! sticky footer. Empty sections take no space.
//!
//! Heights are estimates from [`ContentMetrics`]; the host's real text
//! layout is not consulted. Text wraps on display width as measured by
//! `unicode-width`, so wide glyphs count double.

use unicode_width::UnicodeWidthStr;

use popkit_core::color::Rgba;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::intent::MeasureHeight;

/// Identifier of a button, unique within one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonId(pub u32);

/// What a button does besides reporting the press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ButtonRole {
    /// Report the press; the overlay stays up.
    #[default]
    Default,
    /// Dismiss, then report the press.
    Dismiss,
    /// Dismiss, then report the press. Rendered as the cancel action.
    Cancel,
}

impl ButtonRole {
    #[inline]
    pub fn dismisses(self) -> bool {
        !matches!(self, Self::Default)
    }
}

/// One element of overlay content.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContentBlock {
    Text(String),
    /// Image by asset name; height is `height_ratio` × content width.
    Image {
        name: String,
        tint: Option<Rgba>,
        height_ratio: f64,
    },
    TextField {
        placeholder: String,
        mandatory: bool,
    },
    Button {
        id: ButtonId,
        title: String,
        role: ButtonRole,
    },
    /// Host-rendered view of a fixed height.
    Custom { height: f64 },
}

impl ContentBlock {
    /// Default image height ratio.
    pub const IMAGE_HEIGHT_RATIO: f64 = 0.4;

    /// Image with the default height ratio and no tint.
    pub fn image(name: impl Into<String>) -> Self {
        Self::Image {
            name: name.into(),
            tint: None,
            height_ratio: Self::IMAGE_HEIGHT_RATIO,
        }
    }

    /// Estimated height at `width`.
    pub fn height(&self, width: f64, metrics: &ContentMetrics) -> f64 {
        match self {
            Self::Text(text) => metrics.text_height(text, width, metrics.line_height),
            Self::Image { height_ratio, .. } => (width * height_ratio).max(0.0),
            Self::TextField { .. } => metrics.text_field_height,
            Self::Button { .. } => metrics.button_height,
            Self::Custom { height } => height.max(0.0),
        }
    }
}

/// Region of the overlay a block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Section {
    /// Pinned above the body.
    Header,
    /// Scrolling body.
    Body,
    /// Pinned below the body.
    Footer,
}

/// Size constants used to estimate content height.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentMetrics {
    pub line_height: f64,
    pub title_line_height: f64,
    /// Average advance of a single-width glyph.
    pub glyph_width: f64,
    pub button_height: f64,
    pub text_field_height: f64,
    pub close_button_size: f64,
}

impl Default for ContentMetrics {
    fn default() -> Self {
        Self {
            line_height: 17.0,
            title_line_height: 24.0,
            glyph_width: 7.5,
            button_height: 44.0,
            text_field_height: 44.0,
            close_button_size: 30.0,
        }
    }
}

impl ContentMetrics {
    /// Number of wrapped lines `text` occupies at `width`.
    pub fn line_count(&self, text: &str, width: f64) -> usize {
        let per_line = if self.glyph_width > 0.0 {
            ((width / self.glyph_width).floor() as usize).max(1)
        } else {
            usize::MAX
        };
        text.split('\n')
            .map(|line| line.width().div_ceil(per_line).max(1))
            .sum()
    }

    fn text_height(&self, text: &str, width: f64, line_height: f64) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        self.line_count(text, width) as f64 * line_height
    }
}

/// Everything the overlay displays.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OverlayContent {
    pub title: String,
    pub title_icon: Option<String>,
    pub show_close_button: bool,
    pub header: Vec<ContentBlock>,
    pub body: Vec<ContentBlock>,
    pub footer: Vec<ContentBlock>,
}

impl Default for OverlayContent {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_icon: None,
            show_close_button: true,
            header: Vec::new(),
            body: Vec::new(),
            footer: Vec::new(),
        }
    }
}

impl OverlayContent {
    /// Blocks of one section.
    pub fn section(&self, section: Section) -> &[ContentBlock] {
        match section {
            Section::Header => &self.header,
            Section::Body => &self.body,
            Section::Footer => &self.footer,
        }
    }

    pub(crate) fn push(&mut self, section: Section, block: ContentBlock) {
        match section {
            Section::Header => self.header.push(block),
            Section::Body => self.body.push(block),
            Section::Footer => self.footer.push(block),
        }
    }

    /// Whether the title bar takes space.
    pub fn title_visible(&self) -> bool {
        !self.title.is_empty() || self.title_icon.is_some() || self.show_close_button
    }

    /// All blocks in display order.
    pub fn blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.header.iter().chain(&self.body).chain(&self.footer)
    }

    /// Text blocks joined with newlines.
    pub fn visible_text(&self) -> String {
        self.blocks()
            .filter_map(|b| match b {
                ContentBlock::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Find a button by id.
    pub fn button(&self, id: ButtonId) -> Option<(&str, ButtonRole)> {
        self.blocks().find_map(|b| match b {
            ContentBlock::Button { id: bid, title, role } if *bid == id => {
                Some((title.as_str(), *role))
            }
            _ => None,
        })
    }

    /// Number of buttons with a dismissing role.
    pub fn dismiss_button_count(&self) -> usize {
        self.blocks()
            .filter(|b| matches!(b, ContentBlock::Button { role, .. } if role.dismisses()))
            .count()
    }

    /// Retint images that follow the overlay tint.
    pub(crate) fn retint(&mut self, color: Rgba) {
        for block in self
            .header
            .iter_mut()
            .chain(self.body.iter_mut())
            .chain(self.footer.iter_mut())
        {
            if let ContentBlock::Image { tint: Some(t), .. } = block {
                *t = color;
            }
        }
    }

    fn title_height(&self, width: f64, metrics: &ContentMetrics) -> f64 {
        let mut text_width = width;
        if self.show_close_button {
            text_width -= metrics.close_button_size;
        }
        if self.title_icon.is_some() {
            text_width -= metrics.close_button_size;
        }
        let text = metrics.text_height(&self.title, text_width.max(0.0), metrics.title_line_height);
        let icon = if self.show_close_button || self.title_icon.is_some() {
            metrics.close_button_size
        } else {
            0.0
        };
        text.max(icon)
    }

    fn blocks_height(blocks: &[ContentBlock], width: f64, metrics: &ContentMetrics, margin: f64) -> f64 {
        if blocks.is_empty() {
            return 0.0;
        }
        let sum: f64 = blocks.iter().map(|b| b.height(width, metrics)).sum();
        sum + margin * (blocks.len() - 1) as f64
    }

    /// Estimated height of the whole content for a frame of `width`.
    ///
    /// Four margins of padding plus every non-empty section, separated by
    /// one margin.
    pub fn intrinsic_height(&self, width: f64, metrics: &ContentMetrics, margin: f64) -> f64 {
        let inner = (width - 2.0 * margin).max(0.0);
        let mut sections = Vec::with_capacity(4);
        if self.title_visible() {
            sections.push(self.title_height(inner, metrics));
        }
        for blocks in [&self.header, &self.body, &self.footer] {
            if !blocks.is_empty() {
                sections.push(Self::blocks_height(blocks, inner, metrics, margin));
            }
        }
        let gaps = sections.len().saturating_sub(1) as f64;
        4.0 * margin + sections.iter().sum::<f64>() + gaps * margin
    }
}

/// Content paired with the metrics needed to measure it.
#[derive(Debug, Clone, Copy)]
pub struct MeasuredContent<'a> {
    pub content: &'a OverlayContent,
    pub metrics: &'a ContentMetrics,
    pub margin: f64,
}

impl MeasureHeight for MeasuredContent<'_> {
    fn height_for_width(&self, width: f64) -> f64 {
        self.content.intrinsic_height(width, self.metrics, self.margin)
    }
}

//! Text labels.

use super::{Content, Shape, ShapeKind, ShapeStyle, Text, TextStyle, parse_content};
use crate::color::ColorSpec;
use crate::error::Result;
use crate::geometry::{AnchoredGeometry, Geometry};
use crate::surface::SharedSurface;
use crate::validate;
use std::fmt::Display;
use std::str::FromStr;

impl Text {
    pub(crate) fn create(surface: &SharedSurface, x: i32, y: i32, text: String, font: TextStyle) -> Self {
        Self(Shape::create(
            surface,
            ShapeKind::Text,
            Geometry::Anchored(AnchoredGeometry::new(x, y, None)),
            ShapeStyle::default(),
            Content::Text { text, font },
        ))
    }

    /// Current message.
    pub fn message(&self) -> String {
        self.content_text()
    }

    /// Parse the message as `T`.
    pub fn read<T: FromStr>(&self) -> Result<T> {
        parse_content("text.read", &self.content_text())
    }

    /// Replace the message.
    pub fn rewrite(&self, message: impl Display) {
        self.replace_text(message.to_string());
    }

    /// Current font and color.
    pub fn font(&self) -> TextStyle {
        match &self.inner.borrow().content {
            Content::Text { font, .. } => font.clone(),
            _ => TextStyle::default(),
        }
    }

    /// Change font family, point size and color.
    pub fn format(&self, family: &str, size: i32, color: impl Into<ColorSpec>) -> Result<()> {
        validate::name("text.format", "font", family)?;
        validate::at_least("text.format", "font size", size.into(), 1)?;
        let color = self.resolve_color("text.format", &color.into())?;
        self.mutate(|d| {
            let style = TextStyle {
                family: family.to_string(),
                size: size as u32,
                color,
            };
            d.surface.borrow_mut().set_font(d.item, &style);
            if let Content::Text { font, .. } = &mut d.content {
                *font = style;
            }
            d.refresh_extent();
        });
        Ok(())
    }
}

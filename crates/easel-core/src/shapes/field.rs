//! Single-line text entries.

use super::{Content, Field, Shape, ShapeKind, ShapeStyle, TextStyle, parse_content};
use crate::error::Result;
use crate::geometry::{AnchoredGeometry, Geometry};
use crate::surface::SharedSurface;
use std::fmt::Display;
use std::str::FromStr;

impl Field {
    pub(crate) fn create(surface: &SharedSurface, x: i32, y: i32, text: String, font: TextStyle) -> Self {
        let field = Self(Shape::create(
            surface,
            ShapeKind::Field,
            Geometry::Anchored(AnchoredGeometry::new(x, y, None)),
            ShapeStyle::default(),
            Content::Field { text },
        ));
        field.mutate(|d| {
            d.surface.borrow_mut().set_font(d.item, &font);
            d.refresh_extent();
        });
        field
    }

    /// Current contents.
    pub fn contents(&self) -> String {
        self.content_text()
    }

    /// Parse the contents as `T`.
    pub fn read<T: FromStr>(&self) -> Result<T> {
        parse_content("field.read", &self.content_text())
    }

    /// Replace the contents.
    pub fn rewrite(&self, message: impl Display) {
        self.replace_text(message.to_string());
    }

    /// Gaining focus clears the contents, so typing replaces rather than appends.
    pub(crate) fn focus_in(&self) {
        self.replace_text(String::new());
    }

    /// The host widget's text changed under the user's hands.
    pub(crate) fn edited(&self, text: &str) {
        self.mutate(|d| {
            if let Content::Field { text: current } = &mut d.content {
                *current = text.to_string();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::testing;

    #[test]
    fn test_focus_clears_then_edit_updates() {
        let (_host, window) = testing::window(400, 300);
        let field = window.field(10, 10, "type here").unwrap().unwrap();
        assert_eq!(field.contents(), "type here");

        field.focus_in();
        assert_eq!(field.contents(), "");

        field.edited("3.5");
        assert!((field.read::<f64>().unwrap() - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rewrite_and_read() {
        let (_host, window) = testing::window(400, 300);
        let field = window.field(0, 0, "").unwrap().unwrap();
        assert!(field.width() > 0);

        field.rewrite(17);
        assert_eq!(field.read::<u8>().unwrap(), 17);
        assert!(field.read::<bool>().is_err());
    }
}

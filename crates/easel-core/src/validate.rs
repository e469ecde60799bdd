//! Argument checks shared by every public operation.
//!
//! Each helper returns the checked value or an [`Error`] naming the
//! operation, the conceptual argument and the offending value. Callers run
//! these before touching any state.

use crate::color::{ColorSpec, Rgba};
use crate::error::{Error, Result};
use crate::surface::Surface;
use std::fmt::Debug;

/// Build (and log) an invalid-value error.
pub fn invalid(operation: &str, argument: &'static str, value: impl Debug) -> Error {
    let err = Error::InvalidValue {
        operation: operation.to_string(),
        argument,
        value: format!("{value:?}"),
    };
    log::warn!("{err}");
    err
}

/// Build (and log) a missing-argument error.
pub fn missing(operation: &str, detail: impl Into<String>) -> Error {
    let err = Error::MissingArgument {
        operation: operation.to_string(),
        detail: detail.into(),
    };
    log::warn!("{err}");
    err
}

/// Build (and log) an illegal-operation error.
pub fn illegal(operation: &str, message: impl Into<String>) -> Error {
    let err = Error::IllegalOperation {
        operation: operation.to_string(),
        message: message.into(),
    };
    log::warn!("{err}");
    err
}

/// Width and height must both be at least 1.
pub fn dimensions(
    operation: &str,
    argument: &'static str,
    width: i32,
    height: i32,
) -> Result<()> {
    if width < 1 || height < 1 {
        return Err(invalid(operation, argument, (width, height)));
    }
    Ok(())
}

/// A box placed at `(x, y)` must have representable far edges.
pub fn placement(operation: &str, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
    if x.checked_add(width).is_none() || y.checked_add(height).is_none() {
        return Err(invalid(operation, "location", (x, y)));
    }
    Ok(())
}

/// A single value that must be at least `min`.
pub fn at_least(operation: &str, argument: &'static str, value: i64, min: i64) -> Result<()> {
    if value < min {
        return Err(invalid(operation, argument, value));
    }
    Ok(())
}

/// Collect a point list, requiring at least `min` points.
pub fn point_list<I>(operation: &str, points: I, min: usize) -> Result<Vec<(i32, i32)>>
where
    I: IntoIterator<Item = (i32, i32)>,
{
    let points: Vec<(i32, i32)> = points.into_iter().collect();
    if points.len() < min {
        return Err(missing(
            operation,
            format!("expected at least {min} points, got {}", points.len()),
        ));
    }
    let xs = points.iter().map(|&(x, _)| x);
    let ys = points.iter().map(|&(_, y)| y);
    if let (Some(left), Some(right), Some(top), Some(bottom)) =
        (xs.clone().min(), xs.max(), ys.clone().min(), ys.max())
    {
        span(operation, left, top, right, bottom)?;
    }
    Ok(points)
}

/// The extent between two edges must fit an `i32`.
pub fn span(operation: &str, left: i32, top: i32, right: i32, bottom: i32) -> Result<()> {
    if right.checked_sub(left).is_none() || bottom.checked_sub(top).is_none() {
        return Err(invalid(operation, "point list", ((left, top), (right, bottom))));
    }
    Ok(())
}

/// Names used for groups must not be empty.
pub fn name(operation: &str, argument: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(operation, argument, value));
    }
    Ok(())
}

/// A zero-based pixel index inside a `width` x `height` raster.
pub fn pixel(operation: &str, x: i32, y: i32, width: u32, height: u32) -> Result<(u32, u32)> {
    let in_x = x >= 0 && (x as u32) < width;
    let in_y = y >= 0 && (y as u32) < height;
    if !in_x || !in_y {
        return Err(invalid(operation, "image pixel", (x, y)));
    }
    Ok((x as u32, y as u32))
}

/// Resolve a caller color against the surface's color table.
pub fn color(operation: &str, surface: &dyn Surface, spec: &ColorSpec) -> Result<Rgba> {
    match spec {
        ColorSpec::Rgb(r, g, b) => Ok(Rgba::rgb(*r, *g, *b)),
        ColorSpec::Named(name) => surface
            .resolve_color(name)
            .ok_or_else(|| invalid(operation, "color", name)),
    }
}

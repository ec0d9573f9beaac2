//! Cairo-based rendering functions for strokes, text and imported images.

use super::color::Color;
use super::font::FontDescriptor;

/// Line style fixed at pointer-down for the whole stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Line width in backing-store pixels
    pub width: f64,
    /// Paint color (the background color when erasing)
    pub color: Color,
    /// Whether this stroke erases
    pub erasing: bool,
}

impl StrokeStyle {
    /// Builds the style for a brush or eraser stroke.
    ///
    /// Erasing paints the canvas background color; it never clears to transparency.
    pub fn new(size: u32, brush_color: Color, background: Color, erasing: bool) -> Self {
        Self {
            width: size as f64,
            color: if erasing {
                background.opaque()
            } else {
                brush_color.opaque()
            },
            erasing,
        }
    }
}

/// Render one straight stroke segment with round caps and joins.
///
/// A segment whose endpoints coincide paints a round dot of the line width, so
/// a tap without motion still leaves a mark.
pub fn render_segment(
    ctx: &cairo::Context,
    from: (f64, f64),
    to: (f64, f64),
    style: &StrokeStyle,
) -> Result<(), cairo::Error> {
    style.color.apply(ctx);
    ctx.set_line_width(style.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    ctx.stroke()
}

/// Renders single-line text with its baseline origin at (x, y) using Pango.
///
/// Pango positions layouts by their top-left corner, so the layout baseline is
/// subtracted from `y`. Empty text still goes through the layout path and
/// paints nothing.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `x` - X coordinate of text baseline start
/// * `y` - Y coordinate of text baseline
/// * `text` - Text content to render
/// * `color` - Fill color
/// * `pixel_size` - Font size in pixels
/// * `font_descriptor` - Font configuration (family, weight, style)
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    pixel_size: f64,
    font_descriptor: &FontDescriptor,
) -> Result<(), cairo::Error> {
    ctx.save()?;

    // Gray antialiasing; subpixel rendering would bake color fringes into the image
    ctx.set_antialias(cairo::Antialias::Gray);

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = font_descriptor.to_pango_description(pixel_size);
    layout.set_font_description(Some(&font_desc));
    layout.set_single_paragraph_mode(true);
    layout.set_text(text);

    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.move_to(x, y - baseline);
    color.apply(ctx);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore()
}

/// Pixel extents of `text` relative to its baseline origin: `(left, top, width, height)`.
///
/// Used to compute the dirty region of a text commit.
pub fn measure_text(
    ctx: &cairo::Context,
    text: &str,
    pixel_size: f64,
    font_descriptor: &FontDescriptor,
) -> (f64, f64, f64, f64) {
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = font_descriptor.to_pango_description(pixel_size);
    layout.set_font_description(Some(&font_desc));
    layout.set_single_paragraph_mode(true);
    layout.set_text(text);

    let (ink, logical) = layout.pixel_extents();
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    let left = ink.x().min(logical.x()) as f64;
    let top = ink.y().min(logical.y()) as f64 - baseline;
    let right = (ink.x() + ink.width()).max(logical.x() + logical.width()) as f64;
    let bottom = (ink.y() + ink.height()).max(logical.y() + logical.height()) as f64 - baseline;
    (left, top, right - left, bottom - top)
}

/// Clears the target and paints `image` stretched to exactly `width`×`height`.
///
/// Aspect ratio is not preserved. Equal sizes copy pixels one to one.
pub fn render_image_fill(
    ctx: &cairo::Context,
    image: &cairo::ImageSurface,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Clear);
    ctx.paint()?;
    ctx.set_operator(cairo::Operator::Over);

    let src_w = image.width() as f64;
    let src_h = image.height() as f64;
    if src_w > 0.0 && src_h > 0.0 {
        if src_w != width || src_h != height {
            ctx.scale(width / src_w, height / src_h);
        }
        ctx.set_source_surface(image, 0.0, 0.0)?;
        // Pad so edge pixels are not blended with transparency when stretching
        ctx.source().set_extend(cairo::Extend::Pad);
        ctx.paint()?;
    }

    ctx.restore()
}

//! Screen-space layout of the three surfaces and CPU composition.
//!
//! The window path hands the same layout to the GPU as viewports; the
//! recording path composes on the CPU with identical placement.

use image::RgbaImage;

use crate::params::RenderConfig;
use crate::surface::{Rgba, Surface};

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x - self.x < self.width && y - self.y < self.height
    }
}

/// Where each surface lands in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Whole viewport (field is stretched to fill it)
    pub field: Rect,
    /// Immediately left of the screen strip, drawn over the field
    pub graph: Rect,
    /// Right edge, opaque
    pub screen: Rect,
}

impl Layout {
    pub fn for_viewport(viewport: (u32, u32), config: &RenderConfig) -> Self {
        let (width, height) = viewport;
        let screen_x = width.saturating_sub(config.screen_width_px);
        let graph_x = screen_x.saturating_sub(config.graph_width_px);
        Self {
            field: Rect {
                x: 0,
                y: 0,
                width,
                height,
            },
            graph: Rect {
                x: graph_x,
                y: 0,
                width: screen_x - graph_x,
                height,
            },
            screen: Rect {
                x: screen_x,
                y: 0,
                width: width - screen_x,
                height,
            },
        }
    }
}

/// Compose field, graph and screen into one viewport-sized image
pub fn compose(field: &Surface, screen: &Surface, graph: &Surface, layout: &Layout) -> RgbaImage {
    let viewport = layout.field;
    RgbaImage::from_fn(viewport.width, viewport.height, |x, y| {
        let mut color = stretch_sample(field, viewport, x, y).unwrap_or([0, 0, 0, 255]);

        if layout.graph.contains(x, y) {
            if let Some(over) = stretch_sample(graph, layout.graph, x, y) {
                color = blend_over(color, over);
            }
        }
        if layout.screen.contains(x, y) {
            if let Some(strip) = stretch_sample(screen, layout.screen, x, y) {
                color = strip;
            }
        }

        image::Rgba(color)
    })
}

/// Nearest-neighbor sample of `surface` stretched over `rect`
fn stretch_sample(surface: &Surface, rect: Rect, x: u32, y: u32) -> Option<Rgba> {
    if surface.is_empty() || rect.is_empty() {
        return None;
    }
    let sx = (x - rect.x) as u64 * surface.width() as u64 / rect.width as u64;
    let sy = (y - rect.y) as u64 * surface.height() as u64 / rect.height as u64;
    Some(surface.pixel(
        (sx as u32).min(surface.width() - 1),
        (sy as u32).min(surface.height() - 1),
    ))
}

/// Straight-alpha "over" onto an opaque destination
fn blend_over(dst: Rgba, src: Rgba) -> Rgba {
    let alpha = src[3] as u32;
    let mix = |s: u8, d: u8| ((s as u32 * alpha + d as u32 * (255 - alpha) + 127) / 255) as u8;
    [mix(src[0], dst[0]), mix(src[1], dst[1]), mix(src[2], dst[2]), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_places_strip_and_graph_on_right() {
        let layout = Layout::for_viewport((1000, 600), &RenderConfig::default());
        assert_eq!(layout.screen, Rect { x: 950, y: 0, width: 50, height: 600 });
        assert_eq!(layout.graph, Rect { x: 770, y: 0, width: 180, height: 600 });
    }

    #[test]
    fn test_layout_shrinks_in_narrow_viewport() {
        let layout = Layout::for_viewport((100, 40), &RenderConfig::default());
        assert_eq!(layout.screen.x, 50);
        assert_eq!(layout.graph, Rect { x: 0, y: 0, width: 50, height: 40 });
    }

    #[test]
    fn test_compose_stretches_field_and_overlays() {
        let config = RenderConfig {
            screen_width_px: 2,
            graph_width_px: 2,
            ..RenderConfig::default()
        };
        let layout = Layout::for_viewport((8, 4), &config);

        let mut field = Surface::new(4, 2);
        field.fill([10, 20, 30, 255]);
        field.set_pixel(0, 0, [200, 0, 0, 255]);

        let mut screen = Surface::new(2, 4);
        screen.fill([0, 0, 99, 255]);

        let mut graph = Surface::new(2, 4);
        graph.fill([0, 0, 0, 0]);
        graph.set_pixel(0, 1, [255, 255, 0, 255]);

        let image = compose(&field, &screen, &graph, &layout);
        assert_eq!(image.dimensions(), (8, 4));
        // Field pixel (0,0) covers a 2x2 block
        assert_eq!(image.get_pixel(1, 1).0, [200, 0, 0, 255]);
        assert_eq!(image.get_pixel(2, 0).0, [10, 20, 30, 255]);
        // Transparent graph leaves the field visible, opaque ink replaces it
        assert_eq!(image.get_pixel(5, 0).0, [10, 20, 30, 255]);
        assert_eq!(image.get_pixel(4, 1).0, [255, 255, 0, 255]);
        // Screen strip is opaque
        assert_eq!(image.get_pixel(7, 3).0, [0, 0, 99, 255]);
    }
}

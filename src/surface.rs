//! RGBA pixel surfaces reused across frames.

/// One RGBA8 pixel
pub type Rgba = [u8; 4];

/// Row-major RGBA8 pixel buffer.
///
/// The backing allocation is kept across frames; only a size change
/// reallocates.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Resize in place. Returns true if the dimensions changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixels
            .resize((width as usize) * (height as usize), [0, 0, 0, 255]);
        true
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[self.index(x, y)]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Set a pixel given signed coordinates, ignoring anything off-surface
    pub fn plot(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.set_pixel(x as u32, y as u32, color);
    }

    /// Mutable view of one row
    pub fn row_mut(&mut self, y: u32) -> &mut [Rgba] {
        let start = self.index(0, y);
        &mut self.pixels[start..start + self.width as usize]
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Raw RGBA8 bytes for texture upload or image encoding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

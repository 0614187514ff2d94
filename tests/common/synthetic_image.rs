use pixel_pipeline::{PixelBuffer, Rgba8};

/// Uniform opaque fill.
pub fn solid(width: usize, height: usize, color: Rgba8) -> PixelBuffer<Rgba8> {
    PixelBuffer::filled(width, height, color).expect("positive dimensions")
}

/// High-contrast checkerboard with `cell`-pixel squares, dark in the top-left.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> PixelBuffer<Rgba8> {
    assert!(cell > 0, "cell size must be positive");
    let dark = Rgba8::new(32, 32, 32, 255);
    let light = Rgba8::new(220, 220, 220, 255);
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            data.push(if sum & 1 == 0 { dark } else { light });
        }
    }
    PixelBuffer::from_pixels(width, height, data).expect("checkerboard size")
}

/// Red ramps left to right, green top to bottom, blue fixed.
pub fn gradient(width: usize, height: usize) -> PixelBuffer<Rgba8> {
    let ramp = |i: usize, n: usize| ((i * 255) / n.saturating_sub(1).max(1)) as u8;
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(Rgba8::new(ramp(x, width), ramp(y, height), 128, 255));
        }
    }
    PixelBuffer::from_pixels(width, height, data).expect("gradient size")
}

/// Each pixel's red channel holds its row-major index (mod 256).
pub fn numbered(width: usize, height: usize) -> PixelBuffer<Rgba8> {
    let data = (0..width * height)
        .map(|i| Rgba8::new((i % 256) as u8, 0, 0, 255))
        .collect();
    PixelBuffer::from_pixels(width, height, data).expect("numbered size")
}

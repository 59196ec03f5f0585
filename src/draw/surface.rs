//! Conversions between `image` RGBA buffers and Cairo ARGB32 surfaces.
//!
//! Cairo stores pixels as native-endian `u32` words (`0xAARRGGBB`) with
//! premultiplied alpha; `image` stores straight-alpha RGBA bytes.

use cairo::{Format, ImageSurface};

/// Copies an RGBA image into a new premultiplied ARGB32 surface.
pub fn surface_from_rgba(image: &image::RgbaImage) -> Result<ImageSurface, cairo::Error> {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let stride = Format::ARgb32.stride_for_width(image.width())?;

    let mut data = vec![0u8; stride as usize * image.height() as usize];
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let premultiply = |c: u8| (c as u32 * a as u32 + 127) / 255;
        let argb = (a as u32) << 24 | premultiply(r) << 16 | premultiply(g) << 8 | premultiply(b);

        let offset = y as usize * stride as usize + x as usize * 4;
        data[offset..offset + 4].copy_from_slice(&argb.to_ne_bytes());
    }

    ImageSurface::create_for_data(data, Format::ARgb32, width, height, stride)
}

/// Copies an ARGB32 surface into a straight-alpha RGBA image.
///
/// Requires exclusive access: every context drawing on the surface must have
/// been dropped.
pub fn rgba_from_surface(surface: &mut ImageSurface) -> Result<image::RgbaImage, cairo::BorrowError> {
    let width = surface.width().max(0) as u32;
    let height = surface.height().max(0) as u32;
    let stride = surface.stride().max(0) as usize;
    let data = surface.data()?;

    let mut image = image::RgbaImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let offset = y as usize * stride + x as usize * 4;
        let argb = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);

        let a = argb >> 24;
        let unpremultiply = |c: u32| {
            if a == 0 {
                0
            } else {
                ((c * 255 + a / 2) / a).min(255) as u8
            }
        };
        pixel.0 = [
            unpremultiply((argb >> 16) & 0xff),
            unpremultiply((argb >> 8) & 0xff),
            unpremultiply(argb & 0xff),
            a as u8,
        ];
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_pixels_survive_a_round_trip() {
        let mut source = image::RgbaImage::new(3, 2);
        source.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        source.put_pixel(2, 1, image::Rgba([12, 34, 56, 255]));

        let mut surface = surface_from_rgba(&source).unwrap();
        let back = rgba_from_surface(&mut surface).unwrap();

        assert_eq!(back.dimensions(), (3, 2));
        assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(back.get_pixel(2, 1).0, [12, 34, 56, 255]);
        assert_eq!(back.get_pixel(1, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn surface_is_premultiplied() {
        let source = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 128]));
        let mut surface = surface_from_rgba(&source).unwrap();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        assert_eq!(stride % 4, 0);

        let argb = u32::from_ne_bytes([data[0], data[1], data[2], data[3]]);
        assert_eq!(argb, 0x8080_8080);
    }
}

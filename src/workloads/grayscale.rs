//! Grayscale conversion, one unit per image row

use anyhow::{Context, Result};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use rayon::prelude::*;
use std::path::Path;

use crate::parallel::{Granularity, decompose};

/// ITU-R 601 luma on 16-bit-expanded channels, rounded back to 8 bits
///
/// Color channels are premultiplied by alpha first, so a translucent pixel darkens
/// towards black in proportion to its transparency. Opaque pixels are unaffected.
pub fn luma(pixel: &Rgba<u8>) -> u8 {
    let [r, g, b, a] = pixel.0.map(|c| c as u32 * 0x101);
    // 0xffff * 0xffff still fits in a u32
    let [r, g, b] = [r, g, b].map(|c| c * a / 0xffff);
    ((19595 * r + 38470 * g + 7471 * b + (1 << 15)) >> 24) as u8
}

pub fn load(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode image {}", path.display()))?;
    Ok(image.to_rgba8())
}

pub fn save(path: &Path, image: &GrayImage) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to write image {}", path.display()))
}

pub fn sequential(source: &RgbaImage) -> GrayImage {
    let (width, height) = source.dimensions();
    let mut gray = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            gray.put_pixel(x, y, Luma([luma(source.get_pixel(x, y))]));
        }
    }
    gray
}

/// Parallel conversion on `pool`; every row is written through its own disjoint slice
pub fn parallel(source: &RgbaImage, pool: &rayon::ThreadPool) -> Result<GrayImage> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Ok(GrayImage::new(width, height));
    }

    let w = width as usize;
    let rows = decompose(height as usize, Granularity::PerRow { width: w })?;
    let mut buffer = vec![0u8; w * height as usize];

    pool.install(|| {
        buffer
            .par_chunks_mut(w)
            .zip(rows.par_iter())
            .for_each(|(row, partition)| {
                let y = partition.index as u32;
                for (x, out) in row.iter_mut().enumerate() {
                    *out = luma(source.get_pixel(x as u32, y));
                }
            });
    });

    GrayImage::from_raw(width, height, buffer)
        .context("Gray buffer does not match image dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::build_pool;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let alpha = if x % 3 == 0 { 255 } else { (x * 11 % 256) as u8 };
            Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8, alpha])
        })
    }

    #[test]
    fn test_luma_extremes_and_weights() {
        assert_eq!(luma(&Rgba([0, 0, 0, 255])), 0);
        assert_eq!(luma(&Rgba([255, 255, 255, 255])), 255);
        assert_eq!(luma(&Rgba([255, 0, 0, 255])), 76);
        assert_eq!(luma(&Rgba([0, 255, 0, 255])), 150);
        assert_eq!(luma(&Rgba([0, 0, 255, 255])), 29);
    }

    #[test]
    fn test_luma_premultiplies_alpha() {
        assert_eq!(luma(&Rgba([255, 255, 255, 0])), 0);
        assert_eq!(luma(&Rgba([255, 255, 255, 128])), 128);
        assert_eq!(luma(&Rgba([255, 0, 0, 128])), 38);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let source = gradient(61, 47);
        let pool = build_pool(4).unwrap();
        let expected = sequential(&source);
        let actual = parallel(&source, &pool).unwrap();
        assert_eq!(actual.as_raw(), expected.as_raw());
    }

    #[test]
    fn test_empty_image() {
        let pool = build_pool(1).unwrap();
        let gray = parallel(&RgbaImage::new(0, 5), &pool).unwrap();
        assert_eq!(gray.dimensions(), (0, 5));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let gray = sequential(&gradient(8, 4));

        save(&path, &gray).unwrap();
        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded.dimensions(), (8, 4));
        assert_eq!(reloaded.get_pixel(3, 2).0[0], gray.get_pixel(3, 2).0[0]);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(load(Path::new("definitely/missing.jpg")).is_err());
    }
}

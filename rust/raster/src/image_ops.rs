// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Image operations for structure mask extraction

use crate::types::RasterConfig;
use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;

/// Derive the Gaussian sigma from an odd kernel size, the same way OpenCV
/// does for an unspecified sigma: `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Apply Gaussian blur for scan noise suppression
pub fn gaussian_blur(image: &GrayImage, sigma: f32) -> GrayImage {
    imageproc::filter::gaussian_blur_f32(image, sigma)
}

/// Adaptive mean threshold with constant offset, polarity inverted.
///
/// A pixel becomes foreground (255) when it is darker than its local mean
/// minus `c`, so dark ink on light paper ends up white in the mask.
/// imageproc's adaptive_threshold takes neither the offset constant nor an
/// inverted polarity, so the local mean is computed here over an integral
/// image, with the window clamped at the borders.
pub fn mean_offset_threshold(image: &GrayImage, block_size: u32, c: f64) -> GrayImage {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let radius = (block_size / 2) as i64;

    // Summed-area table with a one-pixel zero border
    let stride = width + 1;
    let mut integral = vec![0u64; stride * (height + 1)];
    for y in 0..height {
        for x in 0..width {
            let pixel = image.get_pixel(x as u32, y as u32).0[0] as u64;
            integral[(y + 1) * stride + (x + 1)] = pixel
                + integral[y * stride + (x + 1)]
                + integral[(y + 1) * stride + x]
                - integral[y * stride + x];
        }
    }

    let mut result = GrayImage::new(image.width(), image.height());
    for y in 0..height {
        for x in 0..width {
            let x0 = (x as i64 - radius).max(0) as usize;
            let y0 = (y as i64 - radius).max(0) as usize;
            let x1 = (x as i64 + radius).min(width as i64 - 1) as usize;
            let y1 = (y as i64 + radius).min(height as i64 - 1) as usize;

            let sum = integral[(y1 + 1) * stride + (x1 + 1)]
                + integral[y0 * stride + x0]
                - integral[y0 * stride + (x1 + 1)]
                - integral[(y1 + 1) * stride + x0];
            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
            let mean = sum as f64 / count;

            let pixel = image.get_pixel(x as u32, y as u32).0[0] as f64;
            let value = if pixel <= mean - c { 255 } else { 0 };
            result.put_pixel(x as u32, y as u32, Luma([value]));
        }
    }

    result
}

/// Morphological dilation with a square structuring element
pub fn dilate(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::dilate(image, Norm::LInf, radius)
}

/// Morphological erosion with a square structuring element
pub fn erode(image: &GrayImage, radius: u8) -> GrayImage {
    imageproc::morphology::erode(image, Norm::LInf, radius)
}

/// Morphological closing: `iterations` dilations, then as many erosions.
///
/// Bridges broken wall lines. The iteration semantics match the usual
/// morphologyEx convention (n-fold dilation before any erosion, not n
/// independent closings).
pub fn morphological_close(image: &GrayImage, radius: u8, iterations: u32) -> GrayImage {
    let mut current = image.clone();
    for _ in 0..iterations {
        current = dilate(&current, radius);
    }
    for _ in 0..iterations {
        current = erode(&current, radius);
    }
    current
}

/// Morphological opening: `iterations` erosions, then as many dilations.
/// Removes speckle noise smaller than the structuring element.
pub fn morphological_open(image: &GrayImage, radius: u8, iterations: u32) -> GrayImage {
    let mut current = image.clone();
    for _ in 0..iterations {
        current = erode(&current, radius);
    }
    for _ in 0..iterations {
        current = dilate(&current, radius);
    }
    current
}

/// Structuring element radius for a square kernel, clamped to the u8
/// range the morphology operators accept
fn element_radius(kernel_size: u32) -> u8 {
    u8::try_from(kernel_size / 2).unwrap_or(u8::MAX)
}

/// Build the binary structure mask isolating wall-like ink.
///
/// Blur, invert-threshold against the local mean, close to bridge broken
/// lines, open to drop speckle. Output dimensions match the input.
pub fn structure_mask(grayscale: &GrayImage, config: &RasterConfig) -> GrayImage {
    let blurred = gaussian_blur(grayscale, sigma_for_kernel(config.blur_kernel_size));
    let binary = mean_offset_threshold(&blurred, config.threshold_block_size, config.threshold_c);

    let radius = element_radius(config.morph_kernel_size);
    let closed = morphological_close(&binary, radius, config.close_iterations);
    morphological_open(&closed, radius, config.open_iterations)
}

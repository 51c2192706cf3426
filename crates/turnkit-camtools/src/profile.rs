//! Profile bitmaps
//!
//! A profile is the part's cross section as an opacity raster, centered on the
//! stock axis. Pixel `(x, y)` sits at coordinate `(x, y)` and the axis is at
//! `(width / 2, height / 2)`.

use crate::error::{TurningError, TurningResult};
use image::{DynamicImage, GrayImage, Luma};
use std::path::Path;
use tracing::debug;

/// Opacity raster of a part cross section
#[derive(Debug, Clone)]
pub struct ProfileBitmap {
    image: GrayImage,
    threshold: u8,
}

impl ProfileBitmap {
    /// Wrap an opacity image (0 = empty, 255 = solid)
    pub fn new(image: GrayImage, threshold: u8) -> Self {
        Self { image, threshold }
    }

    /// Create a fully transparent profile
    pub fn empty(width: u32, height: u32, threshold: u8) -> Self {
        Self::new(GrayImage::new(width, height), threshold)
    }

    /// Build a profile from a decoded image.
    ///
    /// Images with an alpha channel use it as opacity. Images without one are
    /// read as a dark part on a light background.
    pub fn from_image(img: DynamicImage, threshold: u8) -> Self {
        let opacity = if img.color().has_alpha() {
            let la = img.to_luma_alpha8();
            GrayImage::from_fn(la.width(), la.height(), |x, y| Luma([la.get_pixel(x, y).0[1]]))
        } else {
            let mut gray = img.to_luma8();
            image::imageops::invert(&mut gray);
            gray
        };
        Self::new(opacity, threshold)
    }

    /// Load a profile from an image file
    pub fn from_file<P: AsRef<Path>>(path: P, threshold: u8) -> TurningResult<Self> {
        let img = image::open(path.as_ref())?;
        debug!(
            "Loaded profile {:?} ({}x{})",
            path.as_ref(),
            img.width(),
            img.height()
        );
        Ok(Self::from_image(img, threshold))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Opacity cutoff for material
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Stock axis position in pixel coordinates
    pub fn center(&self) -> (f64, f64) {
        (self.width() as f64 / 2.0, self.height() as f64 / 2.0)
    }

    /// Underlying opacity image
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Whether the pixel at `(x, y)` is material. Outside the bitmap is empty.
    pub fn is_opaque(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return false;
        }
        self.image.get_pixel(x as u32, y as u32).0[0] >= self.threshold
    }

    /// Diameter of the profile in pixels: twice the largest distance from the
    /// center to any opaque pixel.
    pub fn source_diameter_px(&self) -> TurningResult<f64> {
        let (cx, cy) = self.center();
        let mut radius_sq: Option<f64> = None;

        for (x, y, pixel) in self.image.enumerate_pixels() {
            if pixel.0[0] >= self.threshold {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                let d = dx * dx + dy * dy;
                radius_sq = Some(radius_sq.map_or(d, |r: f64| r.max(d)));
            }
        }

        match radius_sq {
            Some(r) if r > 0.0 => Ok(2.0 * r.sqrt()),
            _ => Err(TurningError::EmptyProfile {
                threshold: self.threshold,
            }),
        }
    }

    /// Render this profile rotated by `angle` radians about its center into a
    /// new bitmap.
    ///
    /// Positive angles turn the image the way a canvas `rotate` does (clockwise
    /// on screen). Opacity is resampled bilinearly.
    pub fn rotated(&self, angle: f64) -> ProfileBitmap {
        let (cx, cy) = self.center();
        let (sin, cos) = angle.sin_cos();

        let image = GrayImage::from_fn(self.width(), self.height(), |x, y| {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let sx = cx + dx * cos + dy * sin;
            let sy = cy - dx * sin + dy * cos;
            Luma([self.sample_bilinear(sx, sy)])
        });

        ProfileBitmap::new(image, self.threshold)
    }

    fn opacity_at(&self, x: i64, y: i64) -> f64 {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            0.0
        } else {
            self.image.get_pixel(x as u32, y as u32).0[0] as f64
        }
    }

    fn sample_bilinear(&self, x: f64, y: f64) -> u8 {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.opacity_at(x0, y0) * (1.0 - fx) + self.opacity_at(x0 + 1, y0) * fx;
        let bottom =
            self.opacity_at(x0, y0 + 1) * (1.0 - fx) + self.opacity_at(x0 + 1, y0 + 1) * fx;
        (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
    }
}

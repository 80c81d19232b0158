use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::error::{KdTreeError, Result};
use crate::kdtree::KdTree;
use crate::point::Point;

/// A set of distinct colours with a k-d tree for nearest-colour lookups.
///
/// Colours are deduplicated and kept in ascending lexicographic order, so the palette of a
/// given image does not depend on the order its pixels were scanned in.
pub struct Palette {
    colors: Vec<Point>,
    tree: KdTree,
}

impl Palette {
    pub fn from_colors<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let unique: BTreeSet<Point> = colors.into_iter().collect();
        let colors: Vec<Point> = unique.into_iter().collect();
        let tree = KdTree::from_points(&colors);
        log::debug!("Palette with {} colours", colors.len());
        Palette { colors, tree }
    }

    /// Builds a palette from packed pixel bytes, `channels` bytes per pixel.
    ///
    /// Only the first three channels of each pixel are used; a trailing partial pixel is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is less than 3.
    pub fn from_bytes(bytes: &[u8], channels: usize) -> Self {
        Self::from_colors(pixels(bytes, channels))
    }

    pub fn colors(&self) -> &[Point] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn tree(&self) -> &KdTree {
        &self.tree
    }

    /// The palette colour closest to `color`.
    pub fn nearest(&self, color: &Point) -> Result<Point> {
        let index = self.tree.nearest_index(color)?;
        Ok(self.colors[index])
    }

    /// Maps every colour to its nearest palette colour, in parallel.
    pub fn remap(&self, colors: &[Point]) -> Result<Vec<Point>> {
        if self.is_empty() {
            return Err(KdTreeError::EmptyIndexQuery);
        }
        colors.par_iter().map(|c| self.nearest(c)).collect()
    }

    /// Rewrites packed pixel bytes in place with their nearest palette colours.
    ///
    /// Channels beyond the third (e.g. alpha) are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `channels` is less than 3 and the palette is not empty.
    pub fn remap_bytes(&self, bytes: &mut [u8], channels: usize) -> Result<()> {
        if self.is_empty() {
            return Err(KdTreeError::EmptyIndexQuery);
        }
        assert!(channels >= 3, "pixels need at least 3 channels, got {channels}");

        bytes.par_chunks_exact_mut(channels).try_for_each(|px| {
            let nearest = self.nearest(&[px[0] as i32, px[1] as i32, px[2] as i32])?;
            for i in 0..3 {
                px[i] = nearest[i].clamp(0, u8::MAX as i32) as u8;
            }
            Ok(())
        })
    }
}

/// Number of distinct colours.
pub fn count_unique_colors<I>(colors: I) -> usize
where
    I: IntoIterator<Item = Point>,
{
    colors.into_iter().collect::<BTreeSet<Point>>().len()
}

/// Iterates the colours of packed pixel bytes, `channels` bytes per pixel.
///
/// # Panics
///
/// Panics if `channels` is less than 3.
pub fn pixels(bytes: &[u8], channels: usize) -> impl Iterator<Item = Point> + '_ {
    assert!(channels >= 3, "pixels need at least 3 channels, got {channels}");
    bytes
        .chunks_exact(channels)
        .map(|px| [px[0] as i32, px[1] as i32, px[2] as i32])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_and_sorts() {
        let palette = Palette::from_colors(vec![[9, 9, 9], [0, 0, 0], [9, 9, 9], [0, 0, 1]]);
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.colors(), &[[0, 0, 0], [0, 0, 1], [9, 9, 9]]);
        assert_eq!(palette.tree().len(), 3);
    }

    #[test]
    fn test_nearest_and_remap() {
        let palette = Palette::from_colors(vec![[0, 0, 0], [255, 255, 255], [255, 0, 0]]);
        assert_eq!(palette.nearest(&[200, 30, 20]), Ok([255, 0, 0]));

        let out = palette.remap(&[[10, 10, 10], [250, 240, 245], [128, 0, 0]]).unwrap();
        assert_eq!(out, vec![[0, 0, 0], [255, 255, 255], [255, 0, 0]]);
    }

    #[test]
    fn test_remap_bytes_keeps_alpha() {
        let palette = Palette::from_bytes(&[0, 0, 0, 255, 255, 255], 3);
        let mut rgba = vec![20, 20, 20, 7, 200, 210, 220, 99];
        palette.remap_bytes(&mut rgba, 4).unwrap();
        assert_eq!(rgba, vec![0, 0, 0, 7, 255, 255, 255, 99]);
    }

    #[test]
    fn test_empty_palette() {
        let palette = Palette::from_colors(Vec::new());
        assert!(palette.is_empty());
        assert_eq!(palette.nearest(&[1, 2, 3]), Err(KdTreeError::EmptyIndexQuery));
        assert_eq!(palette.remap(&[]), Err(KdTreeError::EmptyIndexQuery));

        let mut bytes = vec![1, 2, 3];
        assert_eq!(palette.remap_bytes(&mut bytes, 3), Err(KdTreeError::EmptyIndexQuery));
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "at least 3 channels")]
    fn test_two_channel_pixels_rejected() {
        let _ = Palette::from_bytes(&[1, 2, 3, 4], 2);
    }

    #[test]
    #[should_panic(expected = "at least 3 channels")]
    fn test_remap_two_channel_pixels_rejected() {
        let palette = Palette::from_colors(vec![[0, 0, 0]]);
        let mut bytes = vec![1, 2, 3, 4];
        let _ = palette.remap_bytes(&mut bytes, 2);
    }

    #[test]
    fn test_count_unique_colors() {
        let bytes = [1, 2, 3, 1, 2, 3, 4, 5, 6, 1, 2];
        assert_eq!(count_unique_colors(pixels(&bytes, 3)), 2);
        assert_eq!(count_unique_colors(Vec::new()), 0);
    }
}

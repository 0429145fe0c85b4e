use image::Luma;
use imageproc::definitions::Image;

/// A binary per-pixel classification stored in row-major order
///
/// `true` marks a pixel classified as removable background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    data: Vec<bool>,
    width: u32,
    height: u32,
}

impl Mask {
    /// Creates a mask with every pixel set to `value`.
    #[must_use]
    pub fn filled(width: u32, height: u32, value: bool) -> Self {
        Self {
            data: vec![value; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Creates a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Wraps row-major data.
    ///
    /// # Returns
    ///
    /// `None` if `data.len() != width * height`
    #[must_use]
    pub fn from_vec(width: u32, height: u32, data: Vec<bool>) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "mask index out of bounds");
        self.data[self.index(x, y)]
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        assert!(x < self.width && y < self.height, "mask index out of bounds");
        let index = self.index(x, y);
        self.data[index] = value;
    }

    /// Row-major view of the mask.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Number of `true` pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Marks every pixel that is set in `other`; never clears a pixel.
    ///
    /// # Panics
    ///
    /// Panics if the masks have different dimensions.
    pub fn union_with(&mut self, other: &Self) {
        assert_eq!(
            self.dimensions(),
            other.dimensions(),
            "mask dimensions must match"
        );
        self.data
            .iter_mut()
            .zip(&other.data)
            .for_each(|(dst, &src)| *dst |= src);
    }

    /// Returns `true` if every pixel set in `other` is also set in `self`.
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
            && self.data.iter().zip(&other.data).all(|(&a, &b)| a || !b)
    }

    /// Renders the mask as a hard alpha matte: `true` (background) maps to
    /// `background`, `false` to `foreground`.
    pub fn to_alpha(&self, foreground: u8, background: u8) -> Image<Luma<u8>> {
        Image::from_fn(self.width, self.height, |x, y| {
            Luma([if self.get(x, y) { background } else { foreground }])
        })
    }
}

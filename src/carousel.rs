//! Client-side windowing over in-memory items: the featured listings
//! carousel and the image gallery on the detail page.

/// Viewport widths (px) below which the carousel shows fewer items
pub const NARROW_BELOW: u32 = 640;
pub const MEDIUM_BELOW: u32 = 1024;

/// Items per window for a viewport width: 1 narrow, 2 medium, 3 wide
pub fn window_size_for(width: u32) -> usize {
    if width < NARROW_BELOW {
        1
    } else if width < MEDIUM_BELOW {
        2
    } else {
        3
    }
}

/// A fixed-size window stepping over `items` with wraparound.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    window_size: usize,
    index: usize,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>, viewport_width: u32) -> Self {
        Self {
            items,
            window_size: window_size_for(viewport_width),
            index: 0,
        }
    }

    pub fn with_window_size(items: Vec<T>, window_size: usize) -> Self {
        Self {
            items,
            window_size: window_size.max(1),
            index: 0,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `ceil(len / window_size)`; zero when there are no items
    pub fn total_windows(&self) -> usize {
        self.items.len().div_ceil(self.window_size)
    }

    /// Items visible at the current index; the last window may be short.
    pub fn window(&self) -> &[T] {
        let start = (self.index * self.window_size).min(self.items.len());
        let end = (start + self.window_size).min(self.items.len());
        &self.items[start..end]
    }

    /// Prev/next buttons and dots are only shown when items overflow one window.
    pub fn has_controls(&self) -> bool {
        self.items.len() > self.window_size
    }

    pub fn next(&mut self) {
        let total = self.total_windows();
        if total > 0 {
            self.index = (self.index + 1) % total;
        }
    }

    pub fn prev(&mut self) {
        let total = self.total_windows();
        if total > 0 {
            self.index = (self.index + total - 1) % total;
        }
    }

    /// Jump straight to a window (dot navigation); out-of-range jumps are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.total_windows() {
            self.index = index;
        }
    }

    /// Viewport resize: recompute the window size and clamp the index.
    pub fn resize(&mut self, viewport_width: u32) {
        let size = window_size_for(viewport_width);
        if size == self.window_size {
            return;
        }
        self.window_size = size;
        self.index = self.index.min(self.total_windows().saturating_sub(1));
    }
}

/// Thumbnails shown under the main image
pub const GALLERY_THUMBNAILS: usize = 5;

/// Detail page image gallery with a lightbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<String>,
    videos: Vec<String>,
    main: usize,
    lightbox: Option<usize>,
    playing: Option<usize>,
}

impl Gallery {
    pub fn new(images: Vec<String>, videos: Vec<String>) -> Self {
        Self {
            images,
            videos,
            main: 0,
            lightbox: None,
            playing: None,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn main_image(&self) -> Option<&str> {
        self.images.get(self.main).map(String::as_str)
    }

    pub fn thumbnails(&self) -> &[String] {
        &self.images[..self.images.len().min(GALLERY_THUMBNAILS)]
    }

    /// Offered as a tile next to the thumbnails when the listing has videos
    pub fn video(&self) -> Option<&str> {
        self.videos.first().map(String::as_str)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.images.len() {
            self.main = index;
        }
    }

    /// Open the lightbox on the current main image
    pub fn open_lightbox(&mut self) {
        if !self.images.is_empty() {
            self.lightbox = Some(self.main);
        }
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
    }

    pub fn lightbox_image(&self) -> Option<&str> {
        self.lightbox
            .and_then(|i| self.images.get(i))
            .map(String::as_str)
    }

    pub fn lightbox_next(&mut self) {
        let len = self.images.len();
        if let Some(i) = self.lightbox.as_mut() {
            *i = (*i + 1) % len;
        }
    }

    pub fn lightbox_prev(&mut self) {
        let len = self.images.len();
        if let Some(i) = self.lightbox.as_mut() {
            *i = (*i + len - 1) % len;
        }
    }

    pub fn play_video(&mut self) -> Option<&str> {
        if self.videos.is_empty() {
            return None;
        }
        self.playing = Some(0);
        self.video()
    }

    pub fn stop_video(&mut self) {
        self.playing = None;
    }

    pub fn playing(&self) -> Option<&str> {
        self.playing
            .and_then(|i| self.videos.get(i))
            .map(String::as_str)
    }
}

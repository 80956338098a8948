/// Identity of a scroll surface, used to tell the canvas's own scroll events from bubbled ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceId(pub u64);

/// A scroll event as delivered by the host: the element it fired on and that element's live
/// offsets at dispatch time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    pub target: SurfaceId,
    pub scroll_top: u64,
    pub scroll_left: u64,
}

/// The live scroll container of the canvas.
///
/// The canvas never reaches for ambient UI state; every read and write of real scroll offsets goes
/// through this capability.
pub trait ScrollSurface {
    fn id(&self) -> SurfaceId;

    fn scroll_top(&self) -> u64;
    fn set_scroll_top(&mut self, scroll_top: u64);

    fn scroll_left(&self) -> u64;
    fn set_scroll_left(&mut self, scroll_left: u64);

    /// Outer width including the vertical scrollbar.
    fn offset_width(&self) -> u32 {
        0
    }

    /// Inner width excluding the vertical scrollbar.
    fn client_width(&self) -> u32 {
        0
    }
}

impl<S: ScrollSurface + ?Sized> ScrollSurface for &mut S {
    fn id(&self) -> SurfaceId {
        (**self).id()
    }

    fn scroll_top(&self) -> u64 {
        (**self).scroll_top()
    }

    fn set_scroll_top(&mut self, scroll_top: u64) {
        (**self).set_scroll_top(scroll_top);
    }

    fn scroll_left(&self) -> u64 {
        (**self).scroll_left()
    }

    fn set_scroll_left(&mut self, scroll_left: u64) {
        (**self).set_scroll_left(scroll_left);
    }

    fn offset_width(&self) -> u32 {
        (**self).offset_width()
    }

    fn client_width(&self) -> u32 {
        (**self).client_width()
    }
}

/// An in-memory scroll surface for headless hosts and tests.
///
/// Offsets are clamped to the scrollable extent when one is set (`content - viewport`), the way a
/// real scroll container clamps assignments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemorySurface {
    pub id: SurfaceId,
    pub scroll_top: u64,
    pub scroll_left: u64,
    pub max_scroll_top: Option<u64>,
    pub max_scroll_left: Option<u64>,
    pub offset_width: u32,
    pub client_width: u32,
}

impl MemorySurface {
    pub fn new(id: SurfaceId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_max_scroll(mut self, max_scroll_top: u64, max_scroll_left: u64) -> Self {
        self.max_scroll_top = Some(max_scroll_top);
        self.max_scroll_left = Some(max_scroll_left);
        self
    }

    pub fn with_widths(mut self, offset_width: u32, client_width: u32) -> Self {
        self.offset_width = offset_width;
        self.client_width = client_width;
        self
    }

    /// Builds the event this surface would dispatch for its current offsets.
    pub fn scroll_event(&self) -> ScrollEvent {
        ScrollEvent {
            target: self.id,
            scroll_top: self.scroll_top,
            scroll_left: self.scroll_left,
        }
    }
}

impl ScrollSurface for MemorySurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, scroll_top: u64) {
        self.scroll_top = match self.max_scroll_top {
            Some(max) => scroll_top.min(max),
            None => scroll_top,
        };
    }

    fn scroll_left(&self) -> u64 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, scroll_left: u64) {
        self.scroll_left = match self.max_scroll_left {
            Some(max) => scroll_left.min(max),
            None => scroll_left,
        };
    }

    fn offset_width(&self) -> u32 {
        self.offset_width
    }

    fn client_width(&self) -> u32 {
        self.client_width
    }
}

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Capability of a live row instance to follow the shared horizontal scroll offset.
pub trait ScrollLeftSync {
    fn set_scroll_left(&self, scroll_left: u64);
}

/// A handle to a realized row's live instance.
///
/// Handles are references into host-owned row state (typically an `Rc` around a cell), so every
/// method takes `&self`. Both methods are optional capabilities with no-op defaults.
pub trait RowHandle {
    /// The wrapped row instance, for rows decorated by another component (e.g. a drag-and-drop
    /// drop target). `None` means the handle is the row itself.
    fn decorated(&self) -> Option<&dyn RowHandle> {
        None
    }

    fn scroll_left_sync(&self) -> Option<&dyn ScrollLeftSync> {
        None
    }
}

impl dyn RowHandle + '_ {
    /// Returns the row instance behind any decoration (identity for undecorated handles).
    pub fn underlying(&self) -> &dyn RowHandle {
        self.decorated().unwrap_or(self)
    }
}

/// Slots from realized-row position to the handle the host mounted there.
///
/// Slots are overwritten as rows mount on each pass and are never shrunk eagerly, so entries from
/// a previous frame may linger past the current realized count. Readers must bound themselves by
/// that count and tolerate empty slots.
#[derive(Default)]
pub struct RowRegistry {
    slots: Vec<Option<Box<dyn RowHandle>>>,
}

impl RowRegistry {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn attach(&mut self, position: usize, handle: Box<dyn RowHandle>) {
        if position >= self.slots.len() {
            self.slots.resize_with(position + 1, || None);
        }
        self.slots[position] = Some(handle);
    }

    pub fn detach(&mut self, position: usize) -> Option<Box<dyn RowHandle>> {
        self.slots.get_mut(position).and_then(Option::take)
    }

    pub fn get(&self, position: usize) -> Option<&dyn RowHandle> {
        self.slots.get(position).and_then(|slot| slot.as_deref())
    }

    /// Number of slots ever attached (including stale and empty ones).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Visits the live handles among the first `limit` slots, in position order.
    pub fn for_each_live(&self, limit: usize, mut f: impl FnMut(usize, &dyn RowHandle)) {
        for (position, slot) in self.slots.iter().take(limit).enumerate() {
            if let Some(handle) = slot.as_deref() {
                f(position, handle);
            }
        }
    }
}

impl core::fmt::Debug for RowRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let live = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("RowRegistry")
            .field("slots", &self.slots.len())
            .field("live", &live)
            .finish()
    }
}

//! UI chrome state: the pocket split pane, the memories-page tabs, and the
//! notice stack.
//!
//! DESIGN
//! ======
//! Split and tab values are neither persisted nor shared across pages, so
//! there is no global UI struct; the owning page holds a signal and uses the
//! math here. Keeping the clamp pure makes the drag bounds testable without
//! pointer events. Notices are the one shared piece: any page pushes, the
//! shell renders and dismisses.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Lower bound of the chat pane, percent of the container width.
pub const SPLIT_MIN_PERCENT: f64 = 30.0;

/// Upper bound of the chat pane, percent of the container width.
pub const SPLIT_MAX_PERCENT: f64 = 80.0;

/// Starting split for every pocket visit.
pub const SPLIT_DEFAULT_PERCENT: f64 = 50.0;

/// Clamp a dragged split into its bounds. Non-finite input (a drag against
/// a zero-width container divides by zero) resets to the default.
#[must_use]
pub fn clamp_split(percent: f64) -> f64 {
    if !percent.is_finite() {
        return SPLIT_DEFAULT_PERCENT;
    }
    percent.clamp(SPLIT_MIN_PERCENT, SPLIT_MAX_PERCENT)
}

/// Pane split implied by a pointer at `x` over a container starting at
/// `container_left` with `container_width` pixels.
#[must_use]
pub fn split_percent_from_pointer(x: f64, container_left: f64, container_width: f64) -> f64 {
    if container_width <= 0.0 {
        return SPLIT_DEFAULT_PERCENT;
    }
    clamp_split((x - container_left) / container_width * 100.0)
}

/// Tabs on the memories page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemoriesTab {
    #[default]
    MyMemories,
    GeneralChat,
}

/// One dismissible notice line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Render key, unique within the session.
    pub id: u64,
    pub text: String,
}

/// The notice stack the shell renders. Mutation failures land here.
#[derive(Clone, Debug, Default)]
pub struct NoticesState {
    pub items: Vec<Notice>,
    next_id: u64,
}

impl NoticesState {
    /// Append a notice. Returns unit so call sites compose with
    /// `RwSignal::update` closures.
    pub fn push(&mut self, text: impl Into<String>) {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notice { id, text: text.into() });
    }

    /// Remove one notice. Unknown ids are a no-op.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|notice| notice.id != id);
    }
}

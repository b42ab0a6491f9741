/// A drag event delivered to the drop zone.
///
/// Hosts that need the platform default suppressed (browsers, some toolkits) read
/// `default_prevented` back after dispatch.
#[derive(Clone, Debug, Default)]
pub struct DragEvent {
    default_prevented: bool,
}

impl DragEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Highlight state of the drop target.
#[derive(Clone, Debug, Default)]
pub struct DropZone {
    highlighted: bool,
}

impl DropZone {
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Dragging over the zone: highlight it and allow the drop.
    pub fn drag_over(&mut self, event: &mut DragEvent) {
        event.prevent_default();
        self.highlighted = true;
    }

    pub fn drag_leave(&mut self) {
        self.highlighted = false;
    }

    /// A drop landed. Returns whether it carried files worth taking.
    pub fn drop(&mut self, event: &mut DragEvent, file_count: usize) -> bool {
        event.prevent_default();
        self.highlighted = false;
        file_count > 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intake/drop_zone.rs"]
mod tests;

//! Ordered set of controls that make up the right-aligned button cluster.

use crate::controls::{Control, ControlId, SystemButton};
use crate::error::{Result, TitleBarError};
use crate::geometry::{Point, RectF, Size};

const SYSTEM_BUTTONS: usize = 3;

/// Controls in left-to-right visual order. Tool items are inserted at the
/// leading edge of the cluster; minimize, maximize and close always occupy
/// the last three slots.
#[derive(Debug, Clone)]
pub struct ControlRegistry {
    controls: Vec<Control>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self {
            controls: vec![Control::minimize(), Control::maximize(), Control::close()],
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.controls.iter().position(|c| c.key() == Some(key))
    }

    fn insert_item(&mut self, key: &str, make: impl FnOnce() -> Control) -> &mut Control {
        let idx = match self.position(key) {
            Some(idx) => {
                tracing::trace!(key, "title bar item already present");
                idx
            }
            None => {
                tracing::debug!(key, "adding title bar item");
                self.controls.insert(0, make());
                0
            }
        };
        &mut self.controls[idx]
    }

    /// Add a text tool item. Re-adding an existing key leaves the registry
    /// untouched and returns the existing control.
    pub fn add_item(&mut self, key: &str, text: Option<&str>) -> &mut Control {
        self.insert_item(key, || Control::tool(key, text.map(str::to_string)))
    }

    /// Add a signal strength item, with the same idempotence as `add_item`.
    pub fn add_signal_item(&mut self, key: &str) -> &mut Control {
        self.insert_item(key, || Control::signal(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn widget(&self, key: &str) -> Result<&Control> {
        self.position(key)
            .map(|idx| &self.controls[idx])
            .ok_or_else(|| TitleBarError::KeyNotFound(key.to_string()))
    }

    pub fn widget_mut(&mut self, key: &str) -> Result<&mut Control> {
        match self.position(key) {
            Some(idx) => Ok(&mut self.controls[idx]),
            None => Err(TitleBarError::KeyNotFound(key.to_string())),
        }
    }

    fn system_index(&self, button: SystemButton) -> usize {
        let base = self.controls.len() - SYSTEM_BUTTONS;
        match button {
            SystemButton::Minimize => base,
            SystemButton::Maximize => base + 1,
            SystemButton::Close => base + 2,
        }
    }

    pub fn system(&self, button: SystemButton) -> &Control {
        &self.controls[self.system_index(button)]
    }

    pub fn system_mut(&mut self, button: SystemButton) -> &mut Control {
        let idx = self.system_index(button);
        &mut self.controls[idx]
    }

    pub fn index_of(&self, id: &ControlId) -> Option<usize> {
        self.controls.iter().position(|c| c.id() == *id)
    }

    pub fn get(&self, idx: usize) -> Option<&Control> {
        self.controls.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Control> {
        self.controls.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Control> {
        self.controls.iter_mut()
    }

    /// Tool items only, leftmost first.
    pub fn items(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter().filter(|c| c.key().is_some())
    }

    /// Width reserved by visible controls; hidden ones contribute nothing.
    pub fn visible_width(&self) -> f32 {
        self.controls
            .iter()
            .filter(|c| c.is_visible())
            .map(Control::width)
            .sum()
    }

    pub fn any_pressed(&self) -> bool {
        self.controls.iter().any(Control::is_pressed)
    }

    /// Rects of visible controls, right-aligned in `bar` and vertically
    /// centered. Returns `(registry index, rect)` pairs in visual order.
    pub fn layout(&self, bar: Size) -> Vec<(usize, RectF)> {
        let mut x = bar.width - self.visible_width();
        let mut rects = Vec::with_capacity(self.controls.len());
        for (idx, control) in self.controls.iter().enumerate() {
            if control.is_hidden() {
                continue;
            }
            let size = control.size();
            let y = ((bar.height - size.height) / 2.0).max(0.0);
            rects.push((idx, RectF::new(x, y, size.width, size.height)));
            x += size.width;
        }
        rects
    }

    /// Registry index of the visible control under `pos`.
    pub fn index_at(&self, bar: Size, pos: Point) -> Option<usize> {
        self.layout(bar)
            .into_iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(idx, _)| idx)
    }

    /// Drain every control's redraw request; true if any was pending.
    pub fn take_redraw(&mut self) -> bool {
        self.controls
            .iter_mut()
            .fold(false, |acc, c| c.take_redraw() | acc)
    }
}

impl Default for ControlRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR: Size = Size::new(300.0, 32.0);

    #[test]
    fn add_item_is_idempotent() {
        let mut reg = ControlRegistry::new();
        reg.add_item("net", Some("Net"));
        reg.add_item("net", Some("Other"));
        assert_eq!(reg.items().count(), 1);
        assert_eq!(reg.widget("net").map(|c| c.text()), Ok(Some("Net")));
    }

    #[test]
    fn missing_key_is_a_lookup_error() {
        let reg = ControlRegistry::new();
        assert_eq!(
            reg.widget("missing").map(|_| ()),
            Err(TitleBarError::KeyNotFound("missing".into()))
        );
    }

    #[test]
    fn items_land_on_the_leading_edge() {
        let mut reg = ControlRegistry::new();
        reg.add_item("a", None);
        reg.add_item("b", None);
        let ids: Vec<ControlId> = reg.iter().map(Control::id).collect();
        assert_eq!(
            ids,
            vec![
                ControlId::Item("b".into()),
                ControlId::Item("a".into()),
                ControlId::System(SystemButton::Minimize),
                ControlId::System(SystemButton::Maximize),
                ControlId::System(SystemButton::Close),
            ]
        );
        assert_eq!(
            reg.system(SystemButton::Close).id(),
            ControlId::System(SystemButton::Close)
        );
    }

    #[test]
    fn layout_skips_hidden_controls() {
        let mut reg = ControlRegistry::new();
        assert_eq!(reg.visible_width(), 138.0);
        reg.system_mut(SystemButton::Maximize).set_hidden(true);
        assert_eq!(reg.visible_width(), 92.0);
        let rects = reg.layout(BAR);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].1, RectF::new(208.0, 0.0, 46.0, 32.0));
        assert_eq!(rects[1].1, RectF::new(254.0, 0.0, 46.0, 32.0));
        assert_eq!(reg.index_at(BAR, Point::new(260.0, 5.0)), Some(2));
        assert_eq!(reg.index_at(BAR, Point::new(100.0, 5.0)), None);
    }
}

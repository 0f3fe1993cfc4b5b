//! Transient per-tile annotations used while a turn is being built
//!
//! Selection, passive targets and hover previews live here, keyed by tile,
//! so they can never leak into a persisted `GameState`.

use crate::board::{Content, StoneCoordinates};
use rustc_hash::FxHashMap;

/// Annotations on one tile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileMarks {
    pub selected: bool,
    pub passive_target: bool,
    /// Content the tile would hold if the hovered aggressive move were played
    pub preview: Option<Content>,
}

impl TileMarks {
    fn is_blank(&self) -> bool {
        *self == TileMarks::default()
    }
}

/// Sparse map of tile annotations
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overlay {
    marks: FxHashMap<StoneCoordinates, TileMarks>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks on a tile (all unset when the tile has none)
    pub fn get(&self, at: StoneCoordinates) -> TileMarks {
        self.marks.get(&at).copied().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Tiles flagged as passive targets, in board then row-major order
    pub fn passive_targets(&self) -> Vec<StoneCoordinates> {
        let mut targets: Vec<_> = self
            .marks
            .iter()
            .filter(|(_, marks)| marks.passive_target)
            .map(|(&at, _)| at)
            .collect();
        targets.sort_by_key(|at| (at.board_index, at.pos.y, at.pos.x));
        targets
    }

    /// Tiles carrying a preview, with the previewed content
    pub fn previews(&self) -> Vec<(StoneCoordinates, Content)> {
        let mut previews: Vec<_> = self
            .marks
            .iter()
            .filter_map(|(&at, marks)| marks.preview.map(|content| (at, content)))
            .collect();
        previews.sort_by_key(|(at, _)| (at.board_index, at.pos.y, at.pos.x));
        previews
    }

    pub(crate) fn mark_selected(&mut self, at: StoneCoordinates) {
        self.marks.entry(at).or_default().selected = true;
    }

    pub(crate) fn mark_target(&mut self, at: StoneCoordinates) {
        self.marks.entry(at).or_default().passive_target = true;
    }

    pub(crate) fn set_preview(&mut self, at: StoneCoordinates, content: Content) {
        self.marks.entry(at).or_default().preview = Some(content);
    }

    /// Drop every preview, keeping other marks
    pub fn clear_previews(&mut self) {
        for marks in self.marks.values_mut() {
            marks.preview = None;
        }
        self.marks.retain(|_, marks| !marks.is_blank());
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_default_to_blank() {
        let overlay = Overlay::new();
        assert_eq!(overlay.get(StoneCoordinates::new(0, 1, 1)), TileMarks::default());
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_clear_previews_keeps_selection() {
        let mut overlay = Overlay::new();
        let stone = StoneCoordinates::new(2, 0, 3);
        let other = StoneCoordinates::new(1, 1, 1);
        overlay.mark_selected(stone);
        overlay.set_preview(stone, Content::Empty);
        overlay.set_preview(other, Content::Black);

        overlay.clear_previews();
        assert!(overlay.previews().is_empty());
        assert!(overlay.get(stone).selected);
        assert_eq!(overlay.get(other), TileMarks::default());
    }

    #[test]
    fn test_passive_targets_sorted() {
        let mut overlay = Overlay::new();
        overlay.mark_target(StoneCoordinates::new(3, 1, 1));
        overlay.mark_target(StoneCoordinates::new(3, 0, 2));
        assert_eq!(
            overlay.passive_targets(),
            vec![StoneCoordinates::new(3, 1, 1), StoneCoordinates::new(3, 0, 2)]
        );
    }
}

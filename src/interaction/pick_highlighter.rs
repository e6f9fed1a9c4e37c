//! Press handler that picks under the cursor and highlights the result

use crate::{
    config::PickMode,
    gfx::{
        picking::{PickList, PickService, PropPicker},
        scene::Scene,
    },
    interaction::{
        highlight::{HighlightChange, HighlightController},
        style::{PressEvent, PrimaryPressHandler},
    },
};

pub struct PickHighlighter<P = PropPicker> {
    picker: P,
    controller: HighlightController,
    mode: PickMode,
    /// Candidates in [`PickMode::AssemblyParts`]
    parts: PickList,
}

impl<P: PickService> PickHighlighter<P> {
    pub fn new(picker: P, mode: PickMode, parts: PickList) -> Self {
        Self {
            picker,
            controller: HighlightController::new(),
            mode,
            parts,
        }
    }

    pub fn mode(&self) -> PickMode {
        self.mode
    }

    pub fn controller(&self) -> &HighlightController {
        &self.controller
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    /// Replaces the assembly-parts candidates
    pub fn set_pick_list(&mut self, parts: PickList) {
        self.parts = parts;
    }

    /// Switches mode, dropping any highlight so none survives from the old mode
    pub fn set_mode(&mut self, mode: PickMode, scene: &mut Scene) -> HighlightChange {
        self.mode = mode;
        self.controller.clear(scene)
    }

    pub fn toggle_mode(&mut self, scene: &mut Scene) -> HighlightChange {
        self.set_mode(self.mode.toggled(), scene)
    }

    /// Picks at the press position and updates the highlight
    pub fn pick(&mut self, event: &PressEvent, scene: &mut Scene) -> HighlightChange {
        let restrict = match self.mode {
            PickMode::Scene => None,
            PickMode::AssemblyParts => Some(&self.parts),
        };
        let path = self
            .picker
            .pick(event.position, event.viewport, scene, restrict);
        self.controller.on_pick(path.as_ref(), scene)
    }
}

impl<P: PickService> PrimaryPressHandler for PickHighlighter<P> {
    fn on_primary_press(&mut self, event: &PressEvent, scene: &mut Scene) -> bool {
        self.pick(event, scene).is_visible()
    }
}

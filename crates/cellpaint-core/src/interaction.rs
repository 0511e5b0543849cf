//! Gesture state machine gating tool actions and camera orbit.
//!
//! [`transition`] is a pure function of the current state, one pointer event,
//! a read-only view of the grid and a lazily evaluated pick. It returns the
//! next state plus the effects the caller has to apply; nothing here mutates
//! the grid or the camera directly.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::CellPaintError;
use crate::grid::GridModel;
use crate::picker::Intersection;
use crate::viewport::Button;

/// Tool selected in the host toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    #[default]
    Pencil,
    /// Reserved slot: selecting it performs no cell action.
    Fill,
    Check,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Fill => "fill",
            Tool::Check => "check",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = CellPaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pencil" => Ok(Tool::Pencil),
            "fill" => Ok(Tool::Fill),
            "check" => Ok(Tool::Check),
            other => Err(CellPaintError::UnknownTool(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Editing(Tool),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub active_tool: Tool,
    pub pointer_down: bool,
    pub over_grid: bool,
    /// Last cell the pencil wrote during this gesture.
    pub previous_painted: Option<usize>,
}

impl InteractionState {
    pub fn phase(&self) -> Phase {
        if self.pointer_down && self.over_grid {
            Phase::Editing(self.active_tool)
        } else {
            Phase::Idle
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEvent {
    PointerDown { button: Button },
    PointerMove,
    PointerUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Paint(usize),
    Check(usize),
    SetOrbitEnabled(bool),
}

pub type Effects = SmallVec<[Effect; 4]>;

pub fn transition(
    state: InteractionState,
    event: GestureEvent,
    tool: Tool,
    grid: &GridModel,
    pick: impl FnOnce() -> Option<Intersection>,
) -> (InteractionState, Effects) {
    let mut next = state;
    let mut effects = Effects::new();
    match event {
        GestureEvent::PointerDown { button } => {
            if button != Button::Primary {
                return (state, effects);
            }
            next.active_tool = tool;
            next.pointer_down = true;
            next.previous_painted = None;
            match hit_cell(grid, pick()) {
                Some(index) => {
                    log::debug!("[gesture] begin {} on cell {}", tool, index);
                    next.over_grid = true;
                    effects.push(Effect::SetOrbitEnabled(false));
                    act(&mut next, index, grid, &mut effects);
                }
                None => {
                    next.over_grid = false;
                }
            }
        }
        GestureEvent::PointerMove => {
            if !(state.pointer_down && state.over_grid) {
                return (state, effects);
            }
            next.active_tool = tool;
            if let Some(index) = hit_cell(grid, pick()) {
                act(&mut next, index, grid, &mut effects);
            }
        }
        GestureEvent::PointerUp => {
            if state.pointer_down {
                log::debug!("[gesture] end");
            }
            next.pointer_down = false;
            next.over_grid = false;
            next.previous_painted = None;
            effects.push(Effect::SetOrbitEnabled(true));
        }
    }
    (next, effects)
}

/// Both layers index instances by cell, so either resolves to a cell.
fn hit_cell(grid: &GridModel, hit: Option<Intersection>) -> Option<usize> {
    let hit = hit?;
    match grid.cell_at(hit.instance_index) {
        Ok(_) => Some(hit.instance_index),
        Err(e) => {
            log::warn!("[gesture] pick on {} layer ignored: {}", hit.layer.name(), e);
            None
        }
    }
}

fn act(state: &mut InteractionState, index: usize, grid: &GridModel, effects: &mut Effects) {
    let Ok(cell) = grid.cell_at(index) else {
        return;
    };
    match state.active_tool {
        Tool::Pencil => {
            if state.previous_painted != Some(index) && cell.usable {
                effects.push(Effect::Paint(index));
                state.previous_painted = Some(index);
            }
        }
        Tool::Check => {
            if cell.usable && !cell.is_checked() {
                effects.push(Effect::Check(index));
            }
        }
        Tool::Fill => {}
    }
}

/// Owns the gesture state between pointer events.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn handle(
        &mut self,
        event: GestureEvent,
        tool: Tool,
        grid: &GridModel,
        pick: impl FnOnce() -> Option<Intersection>,
    ) -> Effects {
        let (next, effects) = transition(self.state, event, tool, grid, pick);
        self.state = next;
        effects
    }
}

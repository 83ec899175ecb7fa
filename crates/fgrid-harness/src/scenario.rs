#![forbid(unsafe_code)]

//! Scripted scenario replay.
//!
//! A [`Scenario`] is an item list plus a sequence of host inputs. Replaying
//! it drives a real [`GridEngine`] with a [`RecordingHost`], checks the
//! committed grid after every step, and logs one JSONL line per step through
//! a [`GoldenLogger`]. Scenarios deserialize from JSON so they can live next
//! to the tests as fixtures:
//!
//! ```json
//! {
//!   "name": "grow_first",
//!   "items": [{"layoutColSpan": 6}, {"layoutColSpan": 6}],
//!   "events": [
//!     {"event": "pointer_down_right_edge", "item": 0, "x": 600.0},
//!     {"event": "pointer_move", "x": 700.0},
//!     {"event": "pointer_up", "x": 700.0}
//!   ]
//! }
//! ```

use fgrid_core::{DropTarget, GridCommand, LayoutHints, LayoutItem};
use fgrid_layout::GridInvariantError;
use fgrid_runtime::{EngineConfig, GridEngine, GridHost, GridTransition};
use serde::{Deserialize, Serialize};

use crate::golden::{GoldenLogger, GoldenOutcome, layout_checksum};
use crate::render::render_grid;

/// Container width used when a scenario does not set one.
pub const DEFAULT_CONTAINER_WIDTH: f32 = 1200.0;

/// One host input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScenarioEvent {
    PointerDownRightEdge { item: usize, x: f32 },
    PointerDownLeftEdge { item: usize, x: f32 },
    PointerMove { x: f32 },
    PointerUp { x: f32 },
    PointerCancel,
    DragStart { item: usize },
    DragOver { target: DropTarget },
    DragLeave,
    Drop,
    DragEnd,
    Command { command: GridCommand },
    Remove { item: usize },
    Select { item: usize },
    SetItems { items: Vec<LayoutHints> },
    ForceCancel,
}

impl ScenarioEvent {
    /// Stable snake_case label used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PointerDownRightEdge { .. } => "pointer_down_right_edge",
            Self::PointerDownLeftEdge { .. } => "pointer_down_left_edge",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerUp { .. } => "pointer_up",
            Self::PointerCancel => "pointer_cancel",
            Self::DragStart { .. } => "drag_start",
            Self::DragOver { .. } => "drag_over",
            Self::DragLeave => "drag_leave",
            Self::Drop => "drop",
            Self::DragEnd => "drag_end",
            Self::Command { .. } => "command",
            Self::Remove { .. } => "remove",
            Self::Select { .. } => "select",
            Self::SetItems { .. } => "set_items",
            Self::ForceCancel => "force_cancel",
        }
    }
}

fn default_container_width() -> f32 {
    DEFAULT_CONTAINER_WIDTH
}

/// A named item list and the inputs to replay against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_container_width")]
    pub container_width: f32,
    #[serde(default)]
    pub config: EngineConfig,
    pub items: Vec<LayoutHints>,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, items: Vec<LayoutHints>) -> Self {
        Self {
            name: name.into(),
            container_width: DEFAULT_CONTAINER_WIDTH,
            config: EngineConfig::default(),
            items,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_container_width(mut self, width: f32) -> Self {
        self.container_width = width;
        self
    }

    #[must_use]
    pub fn then(mut self, event: ScenarioEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Host that records everything the engine publishes.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingHost<T> {
    /// Every published item list, oldest first.
    pub changes: Vec<Vec<T>>,
    /// Every selected index, oldest first.
    pub selections: Vec<usize>,
}

impl<T> Default for RecordingHost<T> {
    fn default() -> Self {
        Self {
            changes: Vec::new(),
            selections: Vec::new(),
        }
    }
}

impl<T> RecordingHost<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently published item list.
    pub fn last(&self) -> Option<&[T]> {
        self.changes.last().map(Vec::as_slice)
    }
}

impl<T> GridHost<T> for RecordingHost<T> {
    fn on_items_change(&mut self, items: Vec<T>) {
        self.changes.push(items);
    }

    fn on_item_select(&mut self, index: usize) {
        self.selections.push(index);
    }
}

/// One replayed input.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioStep {
    pub event: ScenarioEvent,
    /// `None` when the input produced no transition (an idle `force_cancel`
    /// or a `set_items` with no active gesture).
    pub transition: Option<GridTransition>,
    pub checksum: String,
}

/// Result of a full replay.
#[derive(Debug)]
pub struct ScenarioRun {
    pub name: String,
    pub steps: Vec<ScenarioStep>,
    pub items: Vec<LayoutHints>,
    pub render: String,
    pub host: RecordingHost<LayoutHints>,
}

impl ScenarioRun {
    /// Layout checksum after each step.
    pub fn checksums(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.checksum.clone()).collect()
    }

    /// Effect names in step order, `"none"` for steps without a transition.
    pub fn effect_names(&self) -> Vec<&'static str> {
        self.steps
            .iter()
            .map(|step| step.transition.map_or("none", |t| t.effect.name()))
            .collect()
    }
}

/// Feed one input to an engine.
pub fn dispatch<T, H>(
    engine: &mut GridEngine<T, H>,
    event: &ScenarioEvent,
    container_width: f32,
) -> Option<GridTransition>
where
    T: LayoutItem + Clone + From<LayoutHints>,
    H: GridHost<T>,
{
    let transition = match event {
        ScenarioEvent::PointerDownRightEdge { item, x } => {
            engine.pointer_down_right_edge(*item, *x, container_width)
        }
        ScenarioEvent::PointerDownLeftEdge { item, x } => {
            engine.pointer_down_left_edge(*item, *x, container_width)
        }
        ScenarioEvent::PointerMove { x } => engine.pointer_move(*x),
        ScenarioEvent::PointerUp { x } => engine.pointer_up(*x),
        ScenarioEvent::PointerCancel => engine.pointer_cancel(),
        ScenarioEvent::DragStart { item } => engine.drag_start(*item),
        ScenarioEvent::DragOver { target } => engine.drag_over(*target),
        ScenarioEvent::DragLeave => engine.drag_leave(),
        ScenarioEvent::Drop => engine.drop_item(),
        ScenarioEvent::DragEnd => engine.drag_end(),
        ScenarioEvent::Command { command } => engine.apply(*command),
        ScenarioEvent::Remove { item } => engine.remove(*item),
        ScenarioEvent::Select { item } => engine.select(*item),
        ScenarioEvent::SetItems { items } => {
            return engine.set_items(items.iter().copied().map(T::from).collect());
        }
        ScenarioEvent::ForceCancel => return engine.force_cancel(),
    };
    Some(transition)
}

/// Replay a scenario, logging each step.
///
/// Fails on the first step whose committed grid breaks a structural
/// invariant; the logger records the error before returning.
pub fn run_scenario(
    scenario: &Scenario,
    logger: &mut GoldenLogger,
) -> Result<ScenarioRun, GridInvariantError> {
    let _span = tracing::debug_span!(
        target: "fgrid.harness",
        "scenario",
        name = %scenario.name,
        events = scenario.events.len()
    )
    .entered();

    logger.log_start(&scenario.name, scenario.items.len(), 0);
    let mut engine = GridEngine::with_config(
        scenario.items.clone(),
        RecordingHost::new(),
        scenario.config.clone(),
    );
    let mut steps = Vec::with_capacity(scenario.events.len());

    for (index, event) in scenario.events.iter().enumerate() {
        let transition = dispatch(&mut engine, event, scenario.container_width);
        if let Err(err) = engine.committed_grid().validate(Some(engine.items().len())) {
            tracing::warn!(
                target: "fgrid.harness",
                step = index,
                %err,
                "scenario broke an invariant"
            );
            logger.log_error(&format!("step {index}: {err}"));
            logger.log_complete(GoldenOutcome::Fail);
            return Err(err);
        }

        let checksum = layout_checksum(engine.grid());
        let fields = transition.map_or(serde_json::Value::Null, |t| {
            serde_json::json!({
                "transition_id": t.transition_id,
                "from": t.from.name(),
                "to": t.to.name(),
                "effect": t.effect.name(),
            })
        });
        logger.log_step(index, event.name(), fields, &checksum);
        steps.push(ScenarioStep {
            event: event.clone(),
            transition,
            checksum,
        });
    }

    logger.log_complete(GoldenOutcome::Pass);
    let render = render_grid(engine.committed_grid());
    let items = engine.items().to_vec();
    let host = std::mem::take(engine.host_mut());
    Ok(ScenarioRun {
        name: scenario.name.clone(),
        steps,
        items,
        render,
        host,
    })
}

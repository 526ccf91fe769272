//! Kindred is a spatial genealogy canvas engine.
//!
//! It keeps a growing, branching set of generated images positioned in a
//! continuous 2D or 3D coordinate space derived from semantic embeddings,
//! and renders their ancestry interactively: which image was generated from
//! which, drawn as curved edges over the artwork itself.
//!
//! # Engine overview
//!
//! 1. **Model**: collaborator snapshots replace the [`SceneModel`] wholesale
//!    (nodes, lineage links, history groups); the model is pure data.
//! 2. **Project**: [`StableBounds`] freezes the data-to-screen mapping once
//!    computed, and a [`Projector`] backend (planar scales or orbit camera)
//!    turns coordinates into drawable positions.
//! 3. **Render**: the dual-pass [`RenderPipeline`] rebuilds geometry only
//!    for structural changes and answers selection/hover with cheap
//!    attribute updates plus the lineage overlay.
//! 4. **Paint**: [`build_plan`] compiles the retained scene into
//!    backend-agnostic ops; [`CpuBackend`] rasterizes them to premultiplied
//!    RGBA8.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Stable layouts**: appending artifacts never rescales what the user
//!   has already placed in spatial memory; only an explicit axis change may
//!   recompute the bounds.
//! - **No IO in renderers**: payload decode is front-loaded in
//!   [`ThumbnailStore`]; backends only consume prepared pixels.
//! - **Single-threaded**: all state is owned by one logical store mutated
//!   on the UI event loop; collaborators communicate through snapshots and
//!   push messages.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod bridge;
mod engine;
mod foundation;
mod interaction;
mod lineage;
mod projection;
mod render;
mod scene;
mod viewport;

pub use assets::thumbs::{PreparedThumb, THUMB_MAX_PX, ThumbnailStore, decode_thumbnail};
pub use bridge::axis::{AxisChange, PendingAxisChange, WireAxisRequest};
pub use bridge::progress::{ProgressEstimate, RequestGate};
pub use bridge::snapshot::{
    AxisLabels, PushMessage, StateData, StateSnapshot, WireGroup, WireNode, convert_state,
    group_from_wire, node_from_wire,
};
pub use engine::{CanvasEngine, EngineConfig, PushEvent, ViewState};
pub use foundation::core::{
    Affine, BezPath, CanvasSize, Coord, GroupId, NodeId, Point, QuadBez, Rect, Rgba8, SceneDim,
    Vec2,
};
pub use foundation::error::{KindredError, KindredResult};
pub use interaction::hover::{HoverState, focus_nodes};
pub use interaction::selection::{
    AnchorDirective, SelectionSet, SelectionTransition, anchor_for_transition,
};
pub use lineage::curves::{EdgeRole, EdgeStyle, LineageEdge, Overlay, bow_curve, build_overlay};
pub use projection::bounds::{AxisExtent, Bounds, BoundsConfig, StableBounds};
pub use projection::project::{DrawRegion, PlanarProjector, Projector, SpatialProjector};
pub use render::backend::{FrameRgba, PaintBackend};
pub use render::cpu::CpuBackend;
pub use render::pipeline::{PassCounters, RenderPipeline, VisualSettings};
pub use render::plan::{PaintOp, PaintPlan, build_plan, method_tint};
pub use render::scene::{Highlight, NodeSprite, SceneGeometry};
pub use scene::model::{
    CanvasStats, GenMethod, HistoryGroup, Node, Provenance, SceneModel,
};
pub use scene::store::{ChangeHub, Signal};
pub use viewport::camera::{
    CameraPose, OrbitCamera, PSEUDO_ORTHO_FOV, SNAP_DURATION_SECS, SnapAnimation, SnapPlane, Vec3,
};
pub use viewport::ease::Ease;
pub use viewport::transform::ViewTransform;

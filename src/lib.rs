//! Canvas element model for the manga page editor.
//!
//! Pages hold positioned, resizable, z-ordered elements (panels, images,
//! text, dialogue bubbles). The [`store::CanvasStore`] is the single source
//! of truth for the project, selection, viewport, and active tool; the
//! [`controller::WorkspaceController`] turns raw pointer, wheel, and key
//! events into store mutations and reports [`controller::Action`]s back to
//! the host. Rendering is the host's job.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Project, selection, viewport, and tool state with every mutation |
//! | [`controller`] | Gesture state machine driving the store from input events |
//! | [`doc`] | Pages and projects, JSON persistence and validation |
//! | [`element`] | Element types, per-kind properties, and patches |
//! | [`geometry`] | Positions, sizes, and transforms |
//! | [`viewport`] | Pan/zoom and screen/page conversions |
//! | [`input`] | Tools, modifiers, keys, and the interaction state enum |
//! | [`hit`] | Hit-testing bodies and resize handles |
//! | [`bubble`] | Dialogue bubble outline paths |
//! | [`script`] | Headless replay of scripted input events |
//! | [`config`] | Tunables with environment overrides |
//! | [`error`] | Error type for the fallible edges |
//! | [`consts`] | Default numeric constants |

pub mod bubble;
pub mod config;
pub mod consts;
pub mod controller;
pub mod doc;
pub mod element;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod script;
pub mod store;
pub mod viewport;

//! SketchPad Core Library
//!
//! Drawing-document engine for a multi-page sketch pad: shapes, per-page
//! undo/redo, the pointer-driven tool state machine and JSON persistence.
//! Rendering and storage are pluggable collaborators.

pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod input;
pub mod page;
pub mod render;
pub mod shapes;
pub mod sketchpad;
pub mod storage;
pub mod tools;

pub use codec::{DeserializationError, decode, encode};
pub use config::EngineConfig;
pub use document::Document;
pub use error::{EngineError, EngineResult};
pub use history::{Command, History};
pub use input::PointerEvent;
pub use page::Page;
pub use render::{RenderFrame, Renderer};
pub use shapes::{ObjectId, SerializableColor, Shape, ShapeStyle};
pub use sketchpad::SketchPad;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use tools::{Outcome, ToolKind, ToolManager, ToolState};

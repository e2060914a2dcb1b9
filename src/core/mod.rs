//! # Core Module
//!
//! Crate-wide plumbing shared by every subsystem of the editor.
//!
//! ## Key Components
//! - `EditorConfig`: serde-backed tunables, loadable from JSON
//! - `EngineError`: the single error type for construction and configuration
//!
//! ## Usage
//! ```rust
//! use voxel_editor::core::EditorConfig;
//!
//! let config = EditorConfig::from_json_str(r#"{ "cell_size": 16 }"#).unwrap();
//! assert_eq!(config.cell_size, 16);
//! ```

pub mod config;
pub mod error;

pub use config::{CameraConfig, DemoWorld, EditorConfig, MeshingStrategy};
pub use error::{EngineError, Result};

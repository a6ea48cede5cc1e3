// src/config/mod.rs

//! Configuration loading and precedence for compose-deploy.
//!
//! Responsibilities:
//! - Define the TOML-backed override layer and resolved settings (`model.rs`).
//! - Stack layers over the defaults (`layers.rs`).
//! - Load the optional config file from disk (`loader.rs`).
//! - Validate the resolved settings (`validate.rs`).

pub mod layers;
pub mod loader;
pub mod model;
pub mod validate;

pub use layers::merge_layers;
pub use loader::{load_and_resolve, load_file_layer, load_from_path};
pub use model::{ConfigOverrides, DeploySettings};
pub use validate::validate_settings;

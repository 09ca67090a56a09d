//! Nemesix Page Runtime
//!
//! Wires the reveal engine, the form validation engine and the page
//! effects to one window, driven by a TOML configuration.
//!
//! # Features
//!
//! - **Configuration**: `nemesix.toml` with defaults for every field
//! - **Bootstrap**: everything attaches on `DOMContentLoaded`
//! - **Intro Sequencing**: the intro follows the loading overlay
//! - **Teardown**: one call disposes every registration
//! - **Logging**: `tracing-subscriber` setup for embedding binaries
//!
//! # Example
//!
//! ```rust
//! use nemesix_app::{PageConfig, PageRuntime};
//! use nemesix_core::Window;
//!
//! let window = Window::new(1280.0, 720.0);
//! let config = PageConfig::from_toml_str("[effects.enabled]\nparticles = false")?;
//! let page = PageRuntime::install(&window, config, || 0.5)?;
//!
//! window.fire_dom_ready();
//! assert!(page.is_attached());
//! # Ok::<(), nemesix_app::AppError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod page;


pub use config::{parse_easing, EffectToggles, EffectsConfig, FormsConfig, PageConfig, RevealConfig};
pub use error::{AppError, Result};
pub use logging::init_logging;
pub use page::PageRuntime;

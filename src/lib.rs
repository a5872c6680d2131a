//! # modelgen
//!
//! Renders an in-memory tree of source constructs (files, classes, methods,
//! fields, documentation, annotations, literal values) as source text.
//!
//! Rendering is driven by a [`renderer::Generator`]: it looks up the
//! [`renderer::Transform`] registered for each node's kind, keeps the chain of
//! nodes being rendered on a [`renderer::RenderStack`] and tracks the names a
//! file needs to import in a [`renderer::DependencyManager`]. The rendering
//! rules themselves live in per-language factories; [`java`] and [`markup`]
//! ship with the crate.
//!
//! ```
//! use modelgen::model::{Class, Field, File, Type};
//!
//! let file = File::of("com/acme/Widget.java").add(
//!     Class::of("Widget")
//!         .public()
//!         .field(Field::of("tags", Type::of("java.util.List")).private()),
//! );
//! let text = modelgen::java::generator().render(&file).unwrap();
//! assert!(text.contains("import java.util.List;"));
//! assert!(text.contains("    private List tags;"));
//! ```

pub mod error;
pub mod java;
pub mod markup;
pub mod model;
pub mod renderer;
pub mod settings;

pub use error::{ModelError, SettingsError};
pub use renderer::{Generator, Meta, RenderContext, Transform, TransformFactory};

#[cfg(test)]
mod tests;

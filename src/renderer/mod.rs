pub mod components;
pub mod dependencies;
pub mod factory;
pub mod renderer;
pub mod stack;
pub mod traits;

pub use components::*;
pub use dependencies::*;
pub use factory::{resolve, Candidate, Key, TransformFactory};
pub use renderer::*;
pub use stack::*;
pub use traits::*;

pub mod declarations;
pub mod markup;
pub mod node;
pub mod types;

pub use declarations::*;
pub use markup::*;
pub use node::*;
pub use types::*;

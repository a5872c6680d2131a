use std::fmt;

use crate::model::Node;
use crate::renderer::RenderContext;

/// Renders one kind of node to text.
///
/// `None` means "nothing to render here" and is not an error: the caller
/// simply omits it. Transforms reach children, the dependency manager and the
/// render stack through `ctx`.
pub trait Transform: Send + Sync {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String>;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl fmt::Debug for dyn Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.name()).finish()
    }
}

/// Adapts a closure into a [`Transform`].
pub struct FnTransform<F> {
    name: String,
    function: F,
}

impl<F> FnTransform<F>
where
    F: Fn(&mut RenderContext<'_>, Node<'_>) -> Option<String> + Send + Sync,
{
    pub fn new(name: impl Into<String>, function: F) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }
}

impl<F> Transform for FnTransform<F>
where
    F: Fn(&mut RenderContext<'_>, Node<'_>) -> Option<String> + Send + Sync,
{
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        (self.function)(ctx, node)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

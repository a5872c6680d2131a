use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::model::Node;
use crate::renderer::factory::{Candidate, DispatchTable};
use crate::renderer::{DependencyManager, Format, RenderStack, Transform, TransformFactory};

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// One rendering session: the factories to dispatch through, the dependency
/// state of the file being rendered and the layout settings.
///
/// A generator is not meant to be shared. Build a new one (or call
/// [`Generator::fresh`]) per output file.
#[derive(Debug, Clone)]
pub struct Generator {
    factories: Vec<Arc<TransformFactory>>,
    table: DispatchTable,
    dependencies: DependencyManager,
    format: Format,
    max_depth: usize,
}

impl Generator {
    pub fn new(factory: impl Into<Arc<TransformFactory>>, dependencies: DependencyManager) -> Self {
        let factories = vec![factory.into()];
        let table = DispatchTable::build(&factories);
        Self {
            factories,
            table,
            dependencies,
            format: Format::current(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Consults `factory` after the ones already installed.
    pub fn with_factory(mut self, factory: impl Into<Arc<TransformFactory>>) -> Self {
        self.factories.push(factory.into());
        self.table = DispatchTable::build(&self.factories);
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Same factories and settings, clean dependency state.
    pub fn fresh(&self) -> Self {
        Self {
            factories: self.factories.clone(),
            table: self.table.clone(),
            dependencies: self.dependencies.fresh(),
            format: self.format.clone(),
            max_depth: self.max_depth,
        }
    }

    pub fn factories(&self) -> &[Arc<TransformFactory>] {
        &self.factories
    }

    pub fn dependencies(&self) -> &DependencyManager {
        &self.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut DependencyManager {
        &mut self.dependencies
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// A context with an empty render stack.
    pub fn context(&mut self) -> RenderContext<'_> {
        RenderContext {
            generator: self,
            stack: RenderStack::new(),
        }
    }

    pub fn render<'n>(&mut self, node: impl Into<Node<'n>>) -> Option<String> {
        self.context().render(node)
    }

    pub fn render_each<'n, I>(&mut self, nodes: I) -> RenderEach<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<Node<'n>>,
    {
        RenderEach {
            ctx: self.context(),
            nodes: nodes.into_iter(),
        }
    }

    pub fn render_with_provenance<'n>(&mut self, node: impl Into<Node<'n>>) -> Option<Meta<'n>> {
        let node = node.into();
        let (candidate, result) = self
            .context()
            .dispatch(node, |candidate, text| Some((candidate.clone(), text)))?;
        Some(Meta::new(node, result, candidate, Vec::new()))
    }

    pub fn render_all<'n>(&mut self, node: impl Into<Node<'n>>) -> Vec<Meta<'n>> {
        let node = node.into();
        let mut metas = Vec::new();
        self.context().dispatch(node, |candidate, text| {
            metas.push(Meta::new(node, text, candidate.clone(), Vec::new()));
            None::<()>
        });
        metas
    }
}

/// Handle passed to every transform.
///
/// Rendering a child through the context pushes it on the stack for the
/// duration of its transform, so the stack always holds the chain from the
/// root to the node being rendered.
pub struct RenderContext<'g> {
    generator: &'g mut Generator,
    stack: RenderStack<'g>,
}

impl<'g> RenderContext<'g> {
    pub fn dependencies(&self) -> &DependencyManager {
        &self.generator.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut DependencyManager {
        &mut self.generator.dependencies
    }

    pub fn stack(&self) -> RenderStack<'g> {
        self.stack
    }

    pub fn format(&self) -> &Format {
        &self.generator.format
    }

    /// Renders `node` with the first candidate transform that produces text.
    pub fn render<'n>(&mut self, node: impl Into<Node<'n>>) -> Option<String> {
        self.dispatch(node.into(), |_, text| Some(text))
    }

    /// Renders each node in turn, skipping those that produce nothing.
    pub fn render_each<'n, I>(&mut self, nodes: I) -> RenderEach<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<Node<'n>>,
    {
        RenderEach {
            ctx: self.reborrow(),
            nodes: nodes.into_iter(),
        }
    }

    pub fn render_with_provenance<'n>(&mut self, node: impl Into<Node<'n>>) -> Option<Meta<'n>>
    where
        'g: 'n,
    {
        let node = node.into();
        let ancestors = self.stack.snapshot();
        let (candidate, result) =
            self.dispatch(node, |candidate, text| Some((candidate.clone(), text)))?;
        Some(Meta::new(node, result, candidate, ancestors))
    }

    /// A [`Meta`] for every candidate that produces text, best first.
    pub fn render_all<'n>(&mut self, node: impl Into<Node<'n>>) -> Vec<Meta<'n>>
    where
        'g: 'n,
    {
        let node = node.into();
        let ancestors = self.stack.snapshot();
        let mut metas = Vec::new();
        self.dispatch(node, |candidate, text| {
            metas.push(Meta::new(node, text, candidate.clone(), ancestors.clone()));
            None::<()>
        });
        metas
    }

    fn reborrow(&mut self) -> RenderContext<'_> {
        RenderContext {
            generator: &mut *self.generator,
            stack: self.stack,
        }
    }

    // Pushes `node`, runs candidates until `each` accepts one, and pops by
    // leaving scope.
    fn dispatch<R>(
        &mut self,
        node: Node<'_>,
        mut each: impl FnMut(&Candidate, String) -> Option<R>,
    ) -> Option<R> {
        let kind = node.kind();
        if self.stack.len() >= self.generator.max_depth {
            warn!(%kind, max_depth = self.generator.max_depth, "maximum render depth exceeded");
            return None;
        }
        let candidates = self.generator.table.candidates(kind);
        if candidates.is_empty() {
            debug!(%kind, "no transform registered");
            return None;
        }

        let parent: RenderStack<'_> = self.stack;
        let frame = parent.frame(node);
        let mut child = RenderContext {
            generator: &mut *self.generator,
            stack: parent.push(&frame),
        };
        candidates.iter().find_map(|candidate| {
            trace!(%kind, transform = candidate.transform.name(), "dispatch");
            let text = candidate.transform.transform(&mut child, node)?;
            each(candidate, text)
        })
    }
}

/// Lazy sequence of rendered nodes; nodes rendering to nothing are skipped.
pub struct RenderEach<'g, I> {
    ctx: RenderContext<'g>,
    nodes: I,
}

impl<'g, 'n, I> Iterator for RenderEach<'g, I>
where
    I: Iterator,
    I::Item: Into<Node<'n>>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for node in self.nodes.by_ref() {
            if let Some(text) = self.ctx.render(node) {
                return Some(text);
            }
        }
        None
    }
}

/// Rendered text together with where it came from.
#[derive(Debug, Clone)]
pub struct Meta<'a> {
    pub model: Node<'a>,
    pub result: String,
    pub transform: Arc<dyn Transform>,
    pub factory: Arc<TransformFactory>,
    /// Ancestors of `model` at render time, outermost first.
    pub stack: Vec<Node<'a>>,
}

impl<'a> Meta<'a> {
    fn new(model: Node<'a>, result: String, candidate: Candidate, stack: Vec<Node<'a>>) -> Self {
        Self {
            model,
            result,
            transform: candidate.transform,
            factory: candidate.factory,
            stack,
        }
    }
}

use crate::model::{Node, NodeKind};

/// One entry of the render stack. Frames live on the call stack of
/// [`crate::renderer::RenderContext::render`], so a frame is popped exactly
/// when the call that pushed it returns.
#[derive(Debug)]
pub struct Frame<'a> {
    node: Node<'a>,
    parent: Option<&'a Frame<'a>>,
}

/// Chain of nodes currently being rendered, innermost first.
///
/// While a transform runs, the node it was handed is on top.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStack<'a> {
    top: Option<&'a Frame<'a>>,
    len: usize,
}

impl<'a> RenderStack<'a> {
    pub fn new() -> Self {
        Self { top: None, len: 0 }
    }

    /// New frame for `node` whose parent is the current top.
    pub(crate) fn frame(&self, node: Node<'a>) -> Frame<'a> {
        Frame {
            node,
            parent: self.top,
        }
    }

    pub(crate) fn push(&self, frame: &'a Frame<'a>) -> RenderStack<'a> {
        RenderStack {
            top: Some(frame),
            len: self.len + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn top(&self) -> Option<Node<'a>> {
        self.top.map(|frame| frame.node)
    }

    /// The node directly enclosing the top.
    pub fn parent(&self) -> Option<Node<'a>> {
        self.iter().nth(1)
    }

    /// Innermost first.
    pub fn iter(&self) -> Iter<'a> {
        Iter { next: self.top }
    }

    /// Innermost node of `kind`, the top included.
    pub fn nearest(&self, kind: NodeKind) -> Option<Node<'a>> {
        self.iter().find(|node| node.kind() == kind)
    }

    /// Innermost class, interface, enum or annotation enclosing the top.
    pub fn enclosing_declaration(&self) -> Option<Node<'a>> {
        self.iter().skip(1).find(Node::is_class_or_interface)
    }

    /// Copy of the chain, outermost first.
    pub fn snapshot(&self) -> Vec<Node<'a>> {
        let mut nodes: Vec<_> = self.iter().collect();
        nodes.reverse();
        nodes
    }
}

pub struct Iter<'a> {
    next: Option<&'a Frame<'a>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next?;
        self.next = frame.parent;
        Some(frame.node)
    }
}

use crate::model::Node;
use crate::renderer::{RenderContext, Transform};

/// `/** ... */` block. Tags follow the text after an empty ` *` line.
pub struct JavadocTransform;

impl Transform for JavadocTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Javadoc(javadoc) = node else {
            return None;
        };
        if javadoc.is_empty() {
            return None;
        }
        let tags: Vec<_> = ctx.render_each(&javadoc.tags).collect();
        let text = javadoc.text.trim();

        let mut lines = vec!["/**".to_string()];
        lines.extend(text.lines().map(comment_line));
        if !text.is_empty() && !tags.is_empty() {
            lines.push(" *".to_string());
        }
        for tag in &tags {
            lines.extend(tag.lines().map(comment_line));
        }
        lines.push(" */".to_string());
        Some(ctx.format().lines(&lines))
    }
}

fn comment_line(line: &str) -> String {
    let line = line.trim_end();
    if line.is_empty() {
        " *".to_string()
    } else {
        format!(" * {}", line)
    }
}

/// `@name value text`, each part present only when set.
pub struct JavadocTagTransform;

impl Transform for JavadocTagTransform {
    fn transform(&self, _ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::JavadocTag(tag) = node else {
            return None;
        };
        let mut output = format!("@{}", tag.name);
        for part in [&tag.value, &tag.text].into_iter().flatten() {
            output.push(' ');
            output.push_str(part);
        }
        Some(output)
    }
}

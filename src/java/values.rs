use crate::java::components::{arguments, Members};
use crate::model::{Node, Number, Value};
use crate::renderer::{RenderContext, Transform};

/// Every literal value kind. Registered once for the whole value family.
pub struct ValueTransform;

impl Transform for ValueTransform {
    fn transform(&self, ctx: &mut RenderContext<'_>, node: Node<'_>) -> Option<String> {
        let Node::Value(value) = node else {
            return None;
        };
        let output = match value {
            Value::Array(values) => format!("{{{}}}", arguments(ctx, values)),
            Value::Boolean(value) => value.to_string(),
            Value::Enum { ty, constant } => format!("{}.{}", ctx.render(ty)?, constant),
            Value::Number(number) => number_literal(*number),
            Value::Reference(expression) => expression.clone(),
            Value::Text(text) => quote(text),
            Value::Null => "null".to_string(),
            Value::Invocation { ty, name, args } => {
                let target = match ty {
                    Some(ty) => format!("{}.", ctx.render(ty)?),
                    None => String::new(),
                };
                format!("{}{}({})", target, name, arguments(ctx, args))
            }
            Value::Anonymous(anonymous) => {
                let ty = ctx.render(&anonymous.ty)?;
                let args = arguments(ctx, &anonymous.args);
                let body = Members {
                    fields: &anonymous.fields,
                    methods: &anonymous.methods,
                    ..Members::default()
                }
                .render(ctx);
                format!("new {}({}) {}", ty, args, ctx.format().block(&body))
            }
        };
        Some(output)
    }
}

fn number_literal(number: Number) -> String {
    match number {
        Number::Int(value) => value.to_string(),
        Number::Long(value) => format!("{}L", value),
        Number::Float(value) if value.is_finite() => format!("{:?}f", value),
        Number::Float(value) => non_finite("Float", value.is_nan(), value > 0.0),
        Number::Double(value) if value.is_finite() => format!("{:?}", value),
        Number::Double(value) => non_finite("Double", value.is_nan(), value > 0.0),
    }
}

fn non_finite(class: &str, nan: bool, positive: bool) -> String {
    let constant = match (nan, positive) {
        (true, _) => "NaN",
        (false, true) => "POSITIVE_INFINITY",
        (false, false) => "NEGATIVE_INFINITY",
    };
    format!("{}.{}", class, constant)
}

/// Java string literal with the usual escapes.
pub fn quote(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 2);
    output.push('"');
    for c in text.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c => output.push(c),
        }
    }
    output.push('"');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_suffixes() {
        assert_eq!(number_literal(Number::Int(42)), "42");
        assert_eq!(number_literal(Number::Long(42)), "42L");
        assert_eq!(number_literal(Number::Float(1.5)), "1.5f");
        assert_eq!(number_literal(Number::Double(2.0)), "2.0");
    }

    #[test]
    fn non_finite_numbers_use_the_wrapper_constants() {
        assert_eq!(number_literal(Number::Float(f32::NAN)), "Float.NaN");
        assert_eq!(
            number_literal(Number::Float(f32::INFINITY)),
            "Float.POSITIVE_INFINITY"
        );
        assert_eq!(
            number_literal(Number::Double(f64::NEG_INFINITY)),
            "Double.NEGATIVE_INFINITY"
        );
        assert_eq!(number_literal(Number::Double(f64::NAN)), "Double.NaN");
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(quote("say \"hi\"\n"), r#""say \"hi\"\n""#);
        assert_eq!(quote(r"C:\tmp"), r#""C:\\tmp""#);
    }
}

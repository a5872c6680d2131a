#[cfg(test)]
mod formatting_tests {
    use crate::java;
    use crate::model::*;

    fn list_of(element: &str) -> Type {
        Type::of("java.util.List").with_generic(Type::of(element))
    }

    #[test]
    fn test_class_file_layout() {
        let file = File::of("com/acme/Widget.java")
            .javadoc(Javadoc::of("Generated file."))
            .add(
                Class::of("Widget")
                    .public()
                    .javadoc(Javadoc::of("A widget.").tag(JavadocTag::author("modelgen")))
                    .annotate(
                        AnnotationUsage::of(Type::of("javax.annotation.Generated"))
                            .with_value(Value::text("modelgen")),
                    )
                    .extends(Type::of("com.acme.base.Component"))
                    .implements(Type::of("java.io.Serializable"))
                    .field(
                        Field::of("serialVersionUID", Type::of("long"))
                            .private()
                            .modifiers([Modifier::Static, Modifier::Final])
                            .set(Value::Number(Number::Long(1))),
                    )
                    .field(Field::of("tags", list_of("java.lang.String")).private())
                    .constructor(
                        Constructor::new()
                            .public()
                            .param(Field::of("tags", list_of("java.lang.String")))
                            .line("this.tags = tags;"),
                    )
                    .method(
                        Method::of("getTags", list_of("java.lang.String"))
                            .public()
                            .line("return tags;"),
                    ),
            );

        let expected = r#"/**
 * Generated file.
 */

package com.acme;

import com.acme.base.Component;
import java.io.Serializable;
import java.util.List;
import javax.annotation.Generated;

/**
 * A widget.
 *
 * @author modelgen
 */
@Generated("modelgen")
public class Widget extends Component implements Serializable {
    private static final long serialVersionUID = 1L;
    private List<String> tags;

    public Widget(List<String> tags) {
        this.tags = tags;
    }

    public List<String> getTags() {
        return tags;
    }
}
"#;
        assert_eq!(java::generator().render(&file).as_deref(), Some(expected));
    }

    #[test]
    fn test_interface_members_omit_implied_modifiers() {
        let file = File::of("com/acme/Shape.java").add(
            Interface::of("Shape")
                .public()
                .field(
                    Field::of("SIDES", Type::of("int"))
                        .public()
                        .modifiers([Modifier::Static, Modifier::Final])
                        .set(Value::int(0)),
                )
                .method(
                    Method::of("area", Type::of("double"))
                        .public()
                        .modifier(Modifier::Abstract),
                )
                .method(
                    Method::of("describe", Type::of("java.lang.String"))
                        .modifier(Modifier::Default)
                        .line("return \"shape\";"),
                )
                .nested(
                    Enum::of("Kind")
                        .public()
                        .modifier(Modifier::Static)
                        .constant(EnumConstant::of("ROUND"))
                        .constant(EnumConstant::of("ANGULAR")),
                ),
        );

        let expected = r#"package com.acme;

public interface Shape {
    int SIDES = 0;

    double area();

    default String describe() {
        return "shape";
    }

    enum Kind {
        ROUND,
        ANGULAR
    }
}
"#;
        assert_eq!(java::generator().render(&file).as_deref(), Some(expected));
    }

    #[test]
    fn test_enum_constants_bodies_and_constructor() {
        let file = File::of("Level.java").add(
            Enum::of("Level")
                .public()
                .constant(EnumConstant::of("LOW").value(Value::int(1)))
                .constant(
                    EnumConstant::of("HIGH").value(Value::int(9)).method(
                        Method::of("isUrgent", Type::of("boolean"))
                            .public()
                            .line("return true;"),
                    ),
                )
                .field(
                    Field::of("weight", Type::of("int"))
                        .private()
                        .modifier(Modifier::Final),
                )
                .constructor(
                    Constructor::new()
                        .private()
                        .param(Field::of("weight", Type::of("int")))
                        .line("this.weight = weight;"),
                ),
        );

        let expected = "\
public enum Level {
    LOW(1),
    HIGH(9) {
        public boolean isUrgent() {
            return true;
        }
    };

    private final int weight;

    Level(int weight) {
        this.weight = weight;
    }
}
";
        assert_eq!(java::generator().render(&file).as_deref(), Some(expected));
    }

    #[test]
    fn test_annotation_declaration_elements() {
        let annotation = AnnotationDecl::of("Audit")
            .public()
            .element(Field::of("value", Type::of("java.lang.String")))
            .element(Field::of("level", Type::of("int")).set(Value::int(1)))
            .element(
                Field::of("tags", Type::of("java.lang.String").array())
                    .public()
                    .modifier(Modifier::Abstract)
                    .set(Value::Array(Vec::new())),
            );

        let expected = "\
public @interface Audit {
    String value();
    int level() default 1;
    String[] tags() default {};
}";
        assert_eq!(
            java::generator().render(&annotation).as_deref(),
            Some(expected)
        );
    }

    fn widgets(params: Vec<Field>) -> Method {
        params
            .into_iter()
            .fold(Method::of("all", Type::of("void")), Method::param)
    }

    #[test]
    fn test_varargs_only_for_last_array_parameter() {
        let widget = || Type::of("com.acme.Widget");
        let method = widgets(vec![
            Field::of("a", widget()),
            Field::of("b", widget()),
            Field::of("c", widget().array()),
        ])
        .use_triple_dot();
        let text = java::generator().render(&method).unwrap();
        assert_eq!(text, "void all(Widget a, Widget b, Widget... c) {}");
        assert_eq!(text.matches("...").count(), 1);

        let not_last = widgets(vec![
            Field::of("c", widget().array()),
            Field::of("a", widget()),
            Field::of("b", widget()),
        ])
        .use_triple_dot();
        assert_eq!(
            java::generator().render(&not_last).as_deref(),
            Some("void all(Widget[] c, Widget a, Widget b) {}")
        );

        let twin = Field::of("rest", widget().array());
        let twins = widgets(vec![twin.clone(), twin]).use_triple_dot();
        assert_eq!(
            java::generator().render(&twins).as_deref(),
            Some("void all(Widget[] rest, Widget... rest) {}")
        );

        let disabled = widgets(vec![Field::of("c", widget().array())]);
        assert_eq!(
            java::generator().render(&disabled).as_deref(),
            Some("void all(Widget[] c) {}")
        );
    }

    #[test]
    fn test_repeated_reference_imports_once() {
        let file = File::of("app/Main.java").add(
            Class::of("Main")
                .field(Field::of("first", Type::of("pkg.Bar")))
                .field(Field::of("second", Type::of("pkg.Bar"))),
        );
        let text = java::generator().render(&file).unwrap();
        assert_eq!(
            text,
            "package app;\n\nimport pkg.Bar;\n\nclass Main {\n    Bar first;\n    Bar second;\n}\n"
        );
        assert_eq!(text.matches("import pkg.Bar;").count(), 1);
    }

    #[test]
    fn test_primitives_and_implicit_names_are_never_loaded() {
        let mut generator = java::generator();
        let fields = vec![
            Field::of("count", Type::of("int")),
            Field::of("name", Type::of("java.lang.String")),
            Field::of("item", Type::of("T").array()),
        ];
        let rendered: Vec<_> = generator.render_each(&fields).collect();
        assert_eq!(
            rendered,
            vec!["int count;", "String name;", "T[] item;"]
        );
        assert_eq!(generator.dependencies().loaded().count(), 0);
        assert!(generator.dependencies().is_ignored("int"));
    }

    #[test]
    fn test_short_name_collisions_stay_qualified() {
        let file = File::of("com/acme/Date.java").add(
            Class::of("Date")
                .field(Field::of("when", Type::of("java.util.Date")))
                .field(Field::of("items", Type::of("java.util.List")))
                .field(Field::of("menu", Type::of("java.awt.List")))
                .field(Field::of("other", Type::of("com.acme.Widget"))),
        );
        let expected = "\
package com.acme;

import java.util.List;

class Date {
    java.util.Date when;
    List items;
    java.awt.List menu;
    Widget other;
}
";
        assert_eq!(java::generator().render(&file).as_deref(), Some(expected));
    }

    #[test]
    fn test_same_package_names_claim_their_short_name() {
        let helpers = |first: &str, second: &str| {
            File::of("com/acme/Widget.java").add(
                Class::of("Widget")
                    .field(Field::of("a", Type::of(first)))
                    .field(Field::of("b", Type::of(second))),
            )
        };

        let local_first = helpers("com.acme.Helper", "org.other.Helper");
        assert_eq!(
            java::generator().render(&local_first).as_deref(),
            Some("package com.acme;\n\nclass Widget {\n    Helper a;\n    org.other.Helper b;\n}\n")
        );

        let foreign_first = helpers("org.other.Helper", "com.acme.Helper");
        assert_eq!(
            java::generator().render(&foreign_first).as_deref(),
            Some(
                "package com.acme;\n\nimport org.other.Helper;\n\nclass Widget {\n    Helper a;\n    com.acme.Helper b;\n}\n"
            )
        );
    }

    #[test]
    fn test_implicit_names_claim_their_short_name() {
        let strings = |first: &str, second: &str| {
            File::of("com/acme/Widget.java").add(
                Class::of("Widget")
                    .field(Field::of("a", Type::of(first)))
                    .field(Field::of("b", Type::of(second))),
            )
        };

        let implicit_first = strings("java.lang.String", "org.other.String");
        assert_eq!(
            java::generator().render(&implicit_first).as_deref(),
            Some("package com.acme;\n\nclass Widget {\n    String a;\n    org.other.String b;\n}\n")
        );

        let foreign_first = strings("org.other.String", "java.lang.String");
        assert_eq!(
            java::generator().render(&foreign_first).as_deref(),
            Some(
                "package com.acme;\n\nimport org.other.String;\n\nclass Widget {\n    String a;\n    java.lang.String b;\n}\n"
            )
        );
    }

    #[test]
    fn test_wildcard_type_arguments() {
        let numbers = Type::of("java.util.List")
            .with_generic(Generic::wildcard().extends(Type::of("java.lang.Number")));
        let sink = Type::of("java.util.Comparator")
            .with_generic(Generic::wildcard().super_bound(Type::of("com.acme.model.Widget")));
        let any = Type::of("java.util.Map")
            .with_generic(Type::of("java.lang.String"))
            .with_generic(Generic::wildcard());

        let mut generator = java::generator();
        assert_eq!(
            generator.render(&numbers).as_deref(),
            Some("List<? extends Number>")
        );
        assert_eq!(
            generator.render(&sink).as_deref(),
            Some("Comparator<? super Widget>")
        );
        assert_eq!(generator.render(&any).as_deref(), Some("Map<String, ?>"));
        assert_eq!(
            generator.dependencies().loaded().collect::<Vec<_>>(),
            vec![
                "com.acme.model.Widget",
                "java.util.Comparator",
                "java.util.List",
                "java.util.Map",
            ]
        );
    }

    #[test]
    fn test_explicit_and_static_imports() {
        let file = File::of("com/acme/Util.java")
            .import(Import::of(Type::of("java.util.Map")))
            .import(Import::of(Type::of("java.lang.String")))
            .import(Import::of(Type::of("com.acme.Widget")))
            .import(Import::static_member(
                Type::of("java.util.Objects"),
                "requireNonNull",
            ))
            .add(Class::of("Util").public());
        let expected = "\
package com.acme;

import java.util.Map;
import static java.util.Objects.requireNonNull;

public class Util {}
";
        assert_eq!(java::generator().render(&file).as_deref(), Some(expected));
    }

    #[test]
    fn test_generics_initializers_and_anonymous_values() {
        let strings = || Type::of("java.util.Comparator").with_generic(Type::of("java.lang.String"));
        let class = Class::of("Cache")
            .public()
            .modifier(Modifier::Abstract)
            .generic(Generic::of("K"))
            .generic(
                Generic::of("V")
                    .extends(Type::of("java.lang.Comparable").with_generic(Type::of("V"))),
            )
            .field(
                Field::of("ORDER", strings())
                    .modifiers([Modifier::Static, Modifier::Final])
                    .set(
                        Anonymous::of(strings())
                            .method(
                                Method::of("compare", Type::of("int"))
                                    .public()
                                    .param(Field::of("a", Type::of("java.lang.String")))
                                    .param(Field::of("b", Type::of("java.lang.String")))
                                    .line("return a.compareTo(b);"),
                            )
                            .into(),
                    ),
            )
            .initializer(Initializer::static_block().line("init();"))
            .method(
                Method::of("load", Type::of("V"))
                    .protected()
                    .modifier(Modifier::Abstract)
                    .param(Field::of("key", Type::of("K")))
                    .throws(Type::of("java.io.IOException")),
            )
            .method(
                Method::of(
                    "copy",
                    Type::of("java.util.List").with_generic(Type::of("T")),
                )
                .public()
                .modifier(Modifier::Static)
                .generic(Generic::of("T"))
                .param(Field::of(
                    "items",
                    Type::of("java.util.Collection").with_generic(Type::of("T")),
                ))
                .line("return new java.util.ArrayList<>(items);"),
            )
            .nested(
                Interface::of("Listener")
                    .public()
                    .modifier(Modifier::Static)
                    .method(
                        Method::of("onEvict", Type::of("void"))
                            .param(Field::of("key", Type::of("K"))),
                    ),
            );

        let expected = "\
public abstract class Cache<K, V extends Comparable<V>> {
    static final Comparator<String> ORDER = new Comparator<String>() {
        public int compare(String a, String b) {
            return a.compareTo(b);
        }
    };

    static {
        init();
    }

    protected abstract V load(K key) throws IOException;

    public static <T> List<T> copy(Collection<T> items) {
        return new java.util.ArrayList<>(items);
    }

    public interface Listener {
        void onEvict(K key);
    }
}";
        let mut generator = java::generator();
        assert_eq!(generator.render(&class).as_deref(), Some(expected));
        assert_eq!(
            generator.dependencies().loaded().collect::<Vec<_>>(),
            vec![
                "java.io.IOException",
                "java.util.Collection",
                "java.util.Comparator",
                "java.util.List",
            ]
        );
    }

    #[test]
    fn test_javadoc_text_and_tags() {
        let javadoc = Javadoc::of("Loads a value.\n\nFalls back to the default.")
            .tag(JavadocTag::param("key", "the key"))
            .tag(JavadocTag::returns("the value"));
        let expected = "\
/**
 * Loads a value.
 *
 * Falls back to the default.
 *
 * @param key the key
 * @return the value
 */";
        assert_eq!(java::generator().render(&javadoc).as_deref(), Some(expected));
        assert_eq!(java::generator().render(&Javadoc::of("  ")), None);
    }

    #[test]
    fn test_annotation_usages_and_values() {
        let column = AnnotationUsage::of(Type::of("javax.persistence.Column"))
            .with_named("name", Value::text("id"))
            .with_named("nullable", Value::Boolean(false));
        let field = Field::of("id", Type::of("long")).private().annotate(column);
        let class = Class::of("Entity").field(field).method(
            Method::of("rename", Type::of("void")).param(
                Field::of("name", Type::of("java.lang.String"))
                    .annotate(AnnotationUsage::of(Type::of("javax.annotation.Nonnull")))
                    .modifier(Modifier::Final),
            ),
        );
        let expected = "\
class Entity {
    @Column(name = \"id\", nullable = false)
    private long id;

    void rename(@Nonnull final String name) {}
}";
        assert_eq!(java::generator().render(&class).as_deref(), Some(expected));

        let mut generator = java::generator();
        let unit = Value::enum_constant(Type::of("java.util.concurrent.TimeUnit"), "SECONDS");
        assert_eq!(generator.render(&unit).as_deref(), Some("TimeUnit.SECONDS"));
        let empty = Value::invocation(Some(Type::of("java.util.Collections")), "emptyList", vec![]);
        assert_eq!(
            generator.render(&empty).as_deref(),
            Some("Collections.emptyList()")
        );
        let call = Value::invocation(None, "of", vec![Value::int(1), Value::Null]);
        assert_eq!(generator.render(&call).as_deref(), Some("of(1, null)"));
        assert_eq!(
            generator.render(&Value::reference("this.name")).as_deref(),
            Some("this.name")
        );
    }

    #[test]
    fn test_empty_and_package_only_files() {
        assert_eq!(
            java::generator().render(&File::of("Empty.java")).as_deref(),
            Some("")
        );
        assert_eq!(
            java::generator()
                .render(&File::of("com/acme/package-info.java"))
                .as_deref(),
            Some("package com.acme;\n")
        );
    }

    #[test]
    fn test_constructor_needs_an_enclosing_declaration() {
        let constructor = Constructor::new().public();
        assert_eq!(java::generator().render(&constructor), None);
    }

    #[test]
    fn test_current_package_is_released_after_the_file() {
        let file = File::of("com/acme/Widget.java").add(Class::of("Widget"));
        let mut generator = java::generator();
        generator.render(&file);
        assert_eq!(generator.dependencies().current_package(), None);

        let mut busy = java::generator();
        busy.dependencies_mut().set_current_package("org.other");
        let text = busy.render(&file).unwrap();
        assert!(text.starts_with("package com.acme;"));
        assert_eq!(busy.dependencies().current_package(), Some("org.other"));
    }

    #[test]
    fn test_values_dispatch_through_the_family_registration() {
        let mut generator = java::generator();
        let null = Value::Null;
        let meta = generator.render_with_provenance(&null).unwrap();
        assert_eq!(meta.result, "null");
        assert_eq!(meta.factory.name(), "java");
        assert!(meta.transform.name().ends_with("ValueTransform"));
    }

    #[test]
    fn test_fresh_sessions_are_deterministic() {
        let file = File::of("com/acme/Report.java").add(
            Class::of("Report")
                .field(Field::of("rows", list_of("com.acme.data.Row")))
                .field(Field::of("created", Type::of("java.time.Instant")))
                .method(Method::of("size", Type::of("int")).line("return rows.size();")),
        );
        let generator = java::generator();
        let first = generator.fresh().render(&file);
        let second = generator.fresh().render(&file);
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}

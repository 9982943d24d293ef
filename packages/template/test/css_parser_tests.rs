//! Stylesheet parser integration tests.

use angular_template::css_parser::{parse_stylesheet, CssNode, CssVisitor};

#[test]
fn should_parse_a_small_stylesheet() {
    let source = ":host { display: block; }\n.title, h1 { font-size: 2rem; }";
    let result = parse_stylesheet(source, "cmp.css");
    assert!(result.errors.is_empty());
    assert_eq!(result.stylesheet.rules.len(), 2);
    let CssNode::Rule(title) = &result.stylesheet.rules[1] else { panic!() };
    assert_eq!(title.selectors[0].text, ".title");
    assert_eq!(title.selectors[1].text, "h1");
}

#[test]
fn should_keep_url_parentheses_in_values() {
    let result = parse_stylesheet(".bg { background: url(a;b.png); }", "cmp.css");
    assert!(result.errors.is_empty());
    let CssNode::Rule(rule) = &result.stylesheet.rules[0] else { panic!() };
    let CssNode::Declaration(decl) = &rule.body[0] else { panic!() };
    assert_eq!(decl.value, "url(a;b.png)");
}

#[test]
fn should_visit_declarations_through_nested_rules() {
    struct DeclCounter {
        properties: Vec<String>,
    }
    impl CssVisitor for DeclCounter {
        fn visit_declaration(&mut self, declaration: &angular_template::css_parser::CssDeclaration) {
            self.properties.push(declaration.property.clone());
        }
    }

    let source = "@media screen { .a { color: red; .b { margin: 0; } } }";
    let result = parse_stylesheet(source, "cmp.scss");
    let mut counter = DeclCounter { properties: Vec::new() };
    counter.visit_stylesheet(&result.stylesheet);
    assert_eq!(counter.properties, vec!["color", "margin"]);
}

#[test]
fn should_parse_scss_variables_as_declarations() {
    let result = parse_stylesheet("$accent: #ff4081;\n.a { color: $accent; }", "cmp.scss");
    assert!(result.errors.is_empty());
    let CssNode::Declaration(var) = &result.stylesheet.rules[0] else { panic!() };
    assert_eq!(var.property, "$accent");
}

//! Tree to CSS text.

use crate::core::ast::{AtRule, Declaration, Node, Root, Rule};

/// Serialize a tree back to CSS, writing every raw slot verbatim.
pub fn stringify(root: &Root) -> String {
    let mut out = String::new();
    write_body(&mut out, &root.nodes, root.raws.semicolon);
    out.push_str(&root.raws.after);
    out
}

fn write_body(out: &mut String, nodes: &[Node], semicolon: bool) {
    let last = nodes.iter().rposition(|node| !node.is_comment());
    for (i, node) in nodes.iter().enumerate() {
        write_node(out, node);
        if node.is_statement() && (Some(i) != last || semicolon) {
            out.push(';');
        }
    }
}

fn write_node(out: &mut String, node: &Node) {
    out.push_str(node.before());
    match node {
        Node::Rule(rule) => write_rule(out, rule),
        Node::AtRule(at_rule) => write_at_rule(out, at_rule),
        Node::Declaration(decl) => write_declaration(out, decl),
        Node::Comment(comment) => {
            out.push_str("/*");
            out.push_str(&comment.text);
            out.push_str("*/");
        }
    }
}

fn write_rule(out: &mut String, rule: &Rule) {
    out.push_str(&rule.selector);
    out.push_str(&rule.raws.between);
    out.push('{');
    write_body(out, &rule.nodes, rule.raws.semicolon);
    out.push_str(&rule.raws.after);
    out.push('}');
}

fn write_at_rule(out: &mut String, at_rule: &AtRule) {
    out.push('@');
    out.push_str(&at_rule.name);
    out.push_str(&at_rule.raws.after_name);
    out.push_str(&at_rule.params);
    out.push_str(&at_rule.raws.between);
    if let Some(nodes) = &at_rule.nodes {
        out.push('{');
        write_body(out, nodes, at_rule.raws.semicolon);
        out.push_str(&at_rule.raws.after);
        out.push('}');
    }
}

fn write_declaration(out: &mut String, decl: &Declaration) {
    out.push_str(&decl.prop);
    out.push_str(&decl.raws.between);
    out.push_str(&decl.value);
    if decl.important {
        out.push_str(decl.raws.important.as_deref().unwrap_or("!important"));
    }
}

#[cfg(test)]
mod tests {
    use crate::core::ast::*;
    use crate::core::stringify::*;
    use insta::assert_snapshot;

    #[test]
    fn test_stringify_built_tree() {
        let mut important = Declaration::new("font-weight", "700");
        important.important = true;
        let root = Root {
            nodes: vec![
                Node::Comment(Comment::new("!license")),
                Node::Rule(Rule::new(
                    "h1",
                    vec![
                        Node::Declaration(Declaration::new("color", "#000")),
                        Node::Comment(Comment::new(" note ")),
                        Node::Declaration(important),
                    ],
                )),
            ],
            raws: ContainerRaws::default(),
        };
        assert_snapshot!(stringify(&root), @"/*!license*/h1{color:#000;/* note */font-weight:700!important}");
    }

    #[test]
    fn test_stringify_trailing_semicolon_skips_comments() {
        let root = Root {
            nodes: vec![Node::Rule(Rule {
                selector: "a".to_string(),
                nodes: vec![
                    Node::Declaration(Declaration::new("b", "c")),
                    Node::Comment(Comment::new("x")),
                ],
                raws: RuleRaws {
                    semicolon: true,
                    ..Default::default()
                },
            })],
            raws: ContainerRaws::default(),
        };
        assert_snapshot!(stringify(&root), @"a{b:c;/*x*/}");
    }

    #[test]
    fn test_stringify_blockless_at_rule() {
        let root = Root {
            nodes: vec![
                Node::AtRule(AtRule {
                    name: "import".to_string(),
                    params: "'a.css'".to_string(),
                    raws: AtRuleRaws {
                        after_name: " ".to_string(),
                        ..Default::default()
                    },
                    ..Default::default()
                }),
                Node::Rule(Rule::new("a", Vec::new())),
            ],
            raws: ContainerRaws::default(),
        };
        assert_snapshot!(stringify(&root), @"@import 'a.css';a{}");
    }
}

//! CSS syntax tree.
//!
//! The tree is lossless: every byte of the source lives either in a node value
//! (selector, params, declaration value, comment text) or in a raw slot
//! (`before`, `between`, `after`, ...). Serializing the tree with
//! [`crate::core::stringify`] reproduces the input exactly.
//!
//! Comments show up in two ways:
//! - as standalone [`Comment`] children of a container;
//! - embedded in raw text, e.g. the selector `h1/*x*/` or the declaration
//!   between `margin/*x*/:`.

/// Top-level node. Owns the stylesheet's statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Root {
    pub nodes: Vec<Node>,
    pub raws: ContainerRaws,
}

/// Raw slots shared by every node that owns a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRaws {
    /// Whitespace (and stray semicolons) before the closing `}` or end of input.
    pub after: String,
    /// Whether the last non-comment child is followed by `;`.
    pub semicolon: bool,
}

/// A child of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
    Comment(Comment),
}

impl Node {
    /// Statements that are terminated by `;` rather than a block.
    pub fn is_statement(&self) -> bool {
        match self {
            Node::Declaration(_) => true,
            Node::AtRule(at_rule) => at_rule.nodes.is_none(),
            Node::Rule(_) | Node::Comment(_) => false,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }

    /// Whitespace preceding the node inside its container.
    pub fn before(&self) -> &str {
        match self {
            Node::Rule(rule) => &rule.raws.before,
            Node::AtRule(at_rule) => &at_rule.raws.before,
            Node::Declaration(decl) => &decl.raws.before,
            Node::Comment(comment) => &comment.raws.before,
        }
    }
}

/// `selector { ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    /// Raw selector text, including any embedded comments.
    pub selector: String,
    pub nodes: Vec<Node>,
    pub raws: RuleRaws,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleRaws {
    pub before: String,
    /// Text between the selector and `{`.
    pub between: String,
    pub after: String,
    pub semicolon: bool,
}

/// `@name params;` or `@name params { ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtRule {
    pub name: String,
    /// Raw prelude, including any embedded comments.
    pub params: String,
    /// `None` for block-less at-rules such as `@import`.
    pub nodes: Option<Vec<Node>>,
    pub raws: AtRuleRaws,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtRuleRaws {
    pub before: String,
    /// Text between the name and the params.
    pub after_name: String,
    /// Text between the params and `{` or `;`.
    pub between: String,
    pub after: String,
    pub semicolon: bool,
}

/// `prop: value`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    pub prop: String,
    /// Raw value, including any embedded comments.
    pub value: String,
    pub important: bool,
    pub raws: DeclarationRaws,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationRaws {
    pub before: String,
    /// Everything from the end of the property through the colon and any
    /// whitespace or comments that lead the value.
    pub between: String,
    /// Source text of the `!important` flag when it differs from `!important`.
    pub important: Option<String>,
}

/// `/* text */`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    /// Content between `/*` and `*/`, untrimmed.
    pub text: String,
    pub raws: CommentRaws,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentRaws {
    pub before: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raws: CommentRaws::default(),
        }
    }
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            important: false,
            raws: DeclarationRaws {
                between: ":".to_string(),
                ..Default::default()
            },
        }
    }
}

impl Rule {
    pub fn new(selector: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            selector: selector.into(),
            nodes,
            raws: RuleRaws::default(),
        }
    }
}

impl Root {
    /// Number of standalone comment nodes anywhere in the tree.
    pub fn comment_node_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    Node::Comment(_) => 1,
                    Node::Rule(rule) => count(&rule.nodes),
                    Node::AtRule(at_rule) => at_rule.nodes.as_deref().map_or(0, count),
                    Node::Declaration(_) => 0,
                })
                .sum()
        }
        count(&self.nodes)
    }
}

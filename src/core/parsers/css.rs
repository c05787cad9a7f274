use anyhow::Result;

use crate::core::ast::{
    AtRule, AtRuleRaws, Comment, CommentRaws, ContainerRaws, Declaration, DeclarationRaws, Node,
    Root, Rule, RuleRaws,
};
use crate::core::parsers::scanner::{Scanner, Segment, line_col, split_comments};

/// Parse CSS source into a lossless tree.
///
/// This is not a CSS grammar parser. It only finds statement and block
/// boundaries, so anything that looks structurally sound is accepted and
/// reproduced byte for byte by [`crate::core::stringify`].
pub fn parse_css(css: &str) -> Result<Root> {
    let mut parser = Parser {
        scanner: Scanner::new(css),
    };
    let (nodes, raws) = parser.parse_block(None)?;
    Ok(Root { nodes, raws })
}

struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    fn error_at(&self, message: &str, offset: usize) -> anyhow::Error {
        let (line, col) = line_col(self.scanner.src(), offset);
        anyhow::anyhow!("{} at {}:{}", message, line, col)
    }

    /// Whitespace plus stray semicolons.
    fn skip_spacing(&mut self) -> String {
        let start = self.scanner.pos();
        loop {
            self.scanner.skip_whitespace();
            if self.scanner.peek() == Some(';') {
                self.scanner.bump();
            } else {
                break;
            }
        }
        self.scanner.src()[start..self.scanner.pos()].to_string()
    }

    /// Parse children up to the `}` matching `open`, or to end of input for the root.
    fn parse_block(&mut self, open: Option<usize>) -> Result<(Vec<Node>, ContainerRaws)> {
        let mut nodes = Vec::new();
        let mut semicolon = false;

        loop {
            let before = self.skip_spacing();
            match self.scanner.peek() {
                None => {
                    if let Some(open) = open {
                        return Err(self.error_at("Unclosed block", open));
                    }
                    return Ok((
                        nodes,
                        ContainerRaws {
                            after: before,
                            semicolon,
                        },
                    ));
                }
                Some('}') => {
                    if open.is_none() {
                        return Err(self.error_at("Unexpected }", self.scanner.pos()));
                    }
                    self.scanner.bump();
                    return Ok((
                        nodes,
                        ContainerRaws {
                            after: before,
                            semicolon,
                        },
                    ));
                }
                Some('/') if self.scanner.starts_with("/*") => {
                    let text = self.scanner.skip_comment()?;
                    nodes.push(Node::Comment(Comment {
                        text: text.to_string(),
                        raws: CommentRaws { before },
                    }));
                }
                Some('@') => {
                    let (node, terminated) = self.parse_at_rule(before)?;
                    semicolon = terminated;
                    nodes.push(node);
                }
                Some(_) => {
                    let (node, terminated) = self.parse_statement(before)?;
                    semicolon = terminated;
                    nodes.push(node);
                }
            }
        }
    }

    fn parse_at_rule(&mut self, before: String) -> Result<(Node, bool)> {
        let src = self.scanner.src();
        self.scanner.bump();

        let name_start = self.scanner.pos();
        while let Some(c) = self.scanner.peek() {
            if c.is_whitespace()
                || matches!(c, '{' | ';' | '}' | '(' | '"' | '\'')
                || self.scanner.starts_with("/*")
            {
                break;
            }
            self.scanner.bump();
        }
        let name = src[name_start..self.scanner.pos()].to_string();
        let after_name = self.scanner.skip_whitespace().to_string();

        let params_start = self.scanner.pos();
        let stop = self.scanner.scan_until(&['{', ';', '}'])?;
        let params_raw = &src[params_start..self.scanner.pos()];
        let params = params_raw.trim_end();
        let between = params_raw[params.len()..].to_string();

        let mut at_rule = AtRule {
            name,
            params: params.to_string(),
            nodes: None,
            raws: AtRuleRaws {
                before,
                after_name,
                between,
                ..Default::default()
            },
        };

        let terminated = match stop {
            Some('{') => {
                let open = self.scanner.pos();
                self.scanner.bump();
                let (nodes, raws) = self.parse_block(Some(open))?;
                at_rule.nodes = Some(nodes);
                at_rule.raws.after = raws.after;
                at_rule.raws.semicolon = raws.semicolon;
                false
            }
            Some(';') => {
                self.scanner.bump();
                true
            }
            _ => false,
        };

        Ok((Node::AtRule(at_rule), terminated))
    }

    /// A rule or a declaration, decided by whether `{` comes before `;` or `}`.
    fn parse_statement(&mut self, before: String) -> Result<(Node, bool)> {
        let src = self.scanner.src();
        let start = self.scanner.pos();
        let stop = self.scanner.scan_until(&['{', ';', '}'])?;
        let end = self.scanner.pos();

        if stop == Some('{') {
            let selector_raw = &src[start..end];
            let selector = selector_raw.trim_end();
            self.scanner.bump();
            let (nodes, raws) = self.parse_block(Some(end))?;
            let rule = Rule {
                selector: selector.to_string(),
                nodes,
                raws: RuleRaws {
                    before,
                    between: selector_raw[selector.len()..].to_string(),
                    after: raws.after,
                    semicolon: raws.semicolon,
                },
            };
            return Ok((Node::Rule(rule), false));
        }

        let text = &src[start..end];
        let terminated = stop == Some(';');
        let text = if terminated {
            self.scanner.bump();
            text
        } else {
            // Trailing whitespace before `}` belongs to the container.
            let trimmed = text.trim_end();
            self.scanner.set_pos(start + trimmed.len());
            trimmed
        };

        let decl = self.parse_declaration(text, start, before)?;
        Ok((Node::Declaration(decl), terminated))
    }

    fn parse_declaration(&self, text: &str, start: usize, before: String) -> Result<Declaration> {
        let prop_end = text
            .char_indices()
            .find(|&(i, c)| c == ':' || c.is_whitespace() || text[i..].starts_with("/*"))
            .map_or(text.len(), |(i, _)| i);
        if prop_end == 0 {
            return Err(self.error_at("Unknown word", start));
        }

        let mut cursor = Scanner::new(&text[prop_end..]);
        let mut seen_colon = false;
        loop {
            cursor.skip_whitespace();
            if cursor.starts_with("/*") {
                cursor.skip_comment()?;
            } else if !seen_colon && cursor.peek() == Some(':') {
                cursor.bump();
                seen_colon = true;
            } else {
                break;
            }
        }
        if !seen_colon {
            return Err(self.error_at("Unknown word", start));
        }

        let value_start = prop_end + cursor.pos();
        let mut decl = Declaration {
            prop: text[..prop_end].to_string(),
            value: text[value_start..].to_string(),
            important: false,
            raws: DeclarationRaws {
                before,
                between: text[prop_end..value_start].to_string(),
                important: None,
            },
        };

        if let Some(bang) = important_flag_start(&decl.value) {
            let value = decl.value[..bang].trim_end().to_string();
            let flag = decl.value[value.len()..].to_string();
            decl.value = value;
            decl.important = true;
            if flag != "!important" {
                decl.raws.important = Some(flag);
            }
        }

        Ok(decl)
    }
}

/// Offset of the `!` of a trailing `!important` flag. Comments and whitespace
/// may sit between `!` and `important`.
fn important_flag_start(value: &str) -> Option<usize> {
    let mut scanner = Scanner::new(value);
    let mut last_bang = None;
    let mut depth = 0usize;
    while let Some(c) = scanner.peek() {
        if let Some(end) = scanner.url_end() {
            scanner.set_pos(end);
            continue;
        }
        match c {
            '/' if scanner.starts_with("/*") => {
                scanner.skip_comment().ok()?;
                continue;
            }
            '"' | '\'' => {
                scanner.skip_string();
                continue;
            }
            '\\' => {
                scanner.bump();
            }
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '!' if depth == 0 => last_bang = Some(scanner.pos()),
            _ => {}
        }
        scanner.bump();
    }

    let bang = last_bang?;
    let word: String = split_comments(&value[bang + 1..])
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Text(text) => Some(text),
            Segment::Comment(_) => None,
        })
        .collect::<String>()
        .split_whitespace()
        .collect();
    word.eq_ignore_ascii_case("important").then_some(bang)
}

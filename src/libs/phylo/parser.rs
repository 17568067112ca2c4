use super::error::TreeError;
use super::node::NodeId;
use super::tree::Tree;
use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while},
    character::complete::{char, digit1, multispace0},
    combinator::{cut, map, map_res, opt, recognize},
    error::{context, ContextError, ErrorKind, FromExternalError, ParseError},
    multi::{many1, separated_list1},
    sequence::{delimited, preceded},
    IResult, Offset, Parser,
};
use std::collections::BTreeMap;

//----------------------------
// Errors
//----------------------------

/// Failure trail of the Newick grammar: where the innermost rule gave up and
/// why, plus every named rule it was nested in, innermost first.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail<'a> {
    pub failed_at: &'a str,
    pub kind: ErrorKind,
    pub rules: Vec<&'static str>,
}

impl<'a> ParseError<&'a str> for Trail<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Trail {
            failed_at: input,
            kind,
            rules: vec![],
        }
    }

    fn append(_: &'a str, _: ErrorKind, trail: Self) -> Self {
        trail
    }
}

impl<'a> ContextError<&'a str> for Trail<'a> {
    fn add_context(_: &'a str, rule: &'static str, mut trail: Self) -> Self {
        trail.rules.push(rule);
        trail
    }
}

impl<'a, E> FromExternalError<&'a str, E> for Trail<'a> {
    fn from_external_error(input: &'a str, kind: ErrorKind, _: E) -> Self {
        Trail::from_error_kind(input, kind)
    }
}

type PResult<'a, O> = IResult<&'a str, O, Trail<'a>>;

//----------------------------
// Recursive clade, flattened into the arena once parsing succeeds
//----------------------------

#[derive(Debug, Default)]
struct Clade {
    name: Option<String>,
    length: Option<f64>,
    properties: Option<BTreeMap<String, String>>,
    children: Vec<Clade>,
}

impl Clade {
    fn into_arena(self, tree: &mut Tree) -> NodeId {
        let id = tree.add_node();
        for child in self.children {
            let child_id = child.into_arena(tree);
            // Both ids are fresh and the child has no parent yet
            let _ = tree.add_child(id, child_id);
        }
        if let Some(node) = tree.get_node_mut(id) {
            node.name = self.name;
            node.length = self.length;
            node.properties = self.properties;
        }
        id
    }

    fn into_tree(self) -> Tree {
        let mut tree = Tree::new();
        let root = self.into_arena(&mut tree);
        tree.set_root(root);
        tree
    }
}

//----------------------------
// Grammar
//----------------------------

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

// Unquoted labels stop at Newick punctuation and are trimmed.
// Quoted labels keep inner spaces; a doubled quote is an escaped quote.
fn label(input: &str) -> PResult<'_, String> {
    let unquoted = map(take_while(|c: char| !"():;,[]".contains(c)), |s: &str| {
        s.trim().to_string()
    });
    let single_quoted = delimited(
        char('\''),
        map(is_not("'"), |s: &str| s.replace("''", "'")),
        char('\''),
    );
    let double_quoted = delimited(
        char('"'),
        map(is_not("\""), |s: &str| s.replace("\"\"", "\"")),
        char('"'),
    );

    context("label", alt((single_quoted, double_quoted, unquoted))).parse(input)
}

fn length(input: &str) -> PResult<'_, f64> {
    let number = recognize((
        opt(char('-')),
        digit1,
        opt((char('.'), digit1)),
        opt((
            alt((char('e'), char('E'))),
            opt(alt((char('+'), char('-')))),
            digit1,
        )),
    ));

    context(
        "length",
        preceded(ws(char(':')), cut(map_res(number, |s: &str| s.parse::<f64>()))),
    )
    .parse(input)
}

// `[&&NHX:B=95:S=frog]` or `[key=value key=value]`; other comments are dropped.
fn comment(input: &str) -> PResult<'_, Option<BTreeMap<String, String>>> {
    let body = delimited(ws(char('[')), is_not("]"), char(']'));

    context(
        "comment",
        map(opt(body), |content: Option<&str>| {
            let content = content?;
            let parts: Vec<&str> = match content.strip_prefix("&&NHX") {
                Some(rest) => rest.split(':').collect(),
                None => content.split_whitespace().collect(),
            };

            let props: BTreeMap<String, String> = parts
                .into_iter()
                .filter_map(|part| part.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();

            if props.is_empty() {
                None
            } else {
                Some(props)
            }
        }),
    )
    .parse(input)
}

// (child,child,...)label:length[comment]
fn clade(input: &str) -> PResult<'_, Clade> {
    let (input, children) = context(
        "children",
        opt(delimited(
            ws(char('(')),
            separated_list1(ws(char(',')), clade),
            ws(char(')')),
        )),
    )
    .parse(input)?;

    let (input, name) = opt(label).parse(input)?;
    // Comments may sit on either side of the branch length
    let (input, before) = comment(input)?;
    let (input, len) = opt(length).parse(input)?;
    let (input, after) = comment(input)?;

    let properties = match (before, after) {
        (None, None) => None,
        (a, b) => {
            let mut props = a.unwrap_or_default();
            props.extend(b.unwrap_or_default());
            Some(props)
        }
    };

    Ok((
        input,
        Clade {
            name: name.filter(|s| !s.is_empty()),
            length: len,
            properties,
            children: children.unwrap_or_default(),
        },
    ))
}

//----------------------------
// Entry points
//----------------------------

/// Parses a single Newick tree terminated by `;`.
pub fn parse_newick(input: &str) -> Result<Tree, TreeError> {
    let mut parser = (ws(clade), ws(char(';')));

    match parser.parse(input) {
        Ok((_, (root, _))) => Ok(root.into_tree()),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(to_tree_error(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(incomplete()),
    }
}

/// Parses every tree in `input`. Top-level `[...]` blocks between trees, such
/// as headers written by some programs, are skipped.
pub fn parse_newick_multi(input: &str) -> Result<Vec<Tree>, TreeError> {
    let tree = map((ws(clade), ws(char(';'))), |(root, _)| Some(root));
    let header = map(
        ws(delimited(char('['), take_while(|c| c != ']'), char(']'))),
        |_| None,
    );

    match many1(alt((tree, header))).parse(input) {
        Ok((_, items)) => Ok(items.into_iter().flatten().map(Clade::into_tree).collect()),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(to_tree_error(input, e)),
        Err(nom::Err::Incomplete(_)) => Err(incomplete()),
    }
}

fn incomplete() -> TreeError {
    TreeError::ParseError {
        message: "Incomplete input".to_string(),
        line: 0,
        column: 0,
        snippet: String::new(),
    }
}

fn to_tree_error(input: &str, trail: Trail) -> TreeError {
    let consumed = &input[..input.offset(trail.failed_at)];
    let line = consumed.matches('\n').count() + 1;
    let column = consumed.rsplit('\n').next().map_or(0, |s| s.len()) + 1;

    // Outermost rule first, e.g. "children > length: Digit"
    let mut message = trail.rules.iter().rev().copied().collect::<Vec<_>>().join(" > ");
    if !message.is_empty() {
        message.push_str(": ");
    }
    message.push_str(&format!("{:?}", trail.kind));

    TreeError::ParseError {
        message,
        line,
        column,
        snippet: trail.failed_at.chars().take(50).collect(),
    }
}

impl Tree {
    /// Parse a Newick string into a Tree.
    ///
    /// ```
    /// use monophy::libs::phylo::Tree;
    ///
    /// let tree = Tree::from_newick("((A,B)95,(C,D)80);").unwrap();
    /// assert_eq!(tree.get_leaves().len(), 4);
    ///
    /// assert!(Tree::from_newick("((A,B),(C,D)").is_err());
    /// ```
    pub fn from_newick(input: &str) -> Result<Self, TreeError> {
        parse_newick(input)
    }

    pub fn from_newick_multi(input: &str) -> Result<Vec<Self>, TreeError> {
        parse_newick_multi(input)
    }
}

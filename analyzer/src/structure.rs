//! Structuring pass: flat member path → token tree.
//!
//! One left-to-right pass with an explicit stack of open brackets. A name token stays pending
//! while it may still claim a group (`<...>` for methods, then `(...)`, then `[...]`); a
//! bracket it claims pushes a group frame, and the matching close moves the collected children
//! into the anchor. `<` opens a group only right after a `Method` token and `>` closes one
//! only right after a `Type` token; anywhere else they are comparison operators. That is the
//! whole generic/comparison disambiguation, so a generic *type* used on its own
//! (`List<int>` without a call) reads as two comparisons.
//!
//! Claimed brackets and whitespace are dropped from the tree. A group still open at the end
//! of the path keeps everything after its bracket.

use std::mem;

use crate::resolver::BracketKind;
use crate::symbol::{SymbolKind, Token};
use crate::tokenizer;

/// One extracted bracket group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupScan {
    /// Tokens strictly inside the brackets, commas and whitespace included.
    pub tokens: Vec<Token>,
    /// Index just past the closing bracket, or the path length for an open group.
    pub end: usize,
    /// The closing bracket has not been typed yet.
    pub capturing: bool,
}

/// `(...)` group following the token at `anchor`.
pub fn parameter_group(path: &[Token], anchor: usize) -> Option<GroupScan> {
    scan(path, anchor + 1, BracketKind::Paren)
}

/// `<...>` group following the token at `anchor`.
pub fn generic_group(path: &[Token], anchor: usize) -> Option<GroupScan> {
    scan(path, anchor + 1, BracketKind::Angle)
}

/// `[...]` group following the token at `anchor`.
pub fn indexer_group(path: &[Token], anchor: usize) -> Option<GroupScan> {
    scan(path, anchor + 1, BracketKind::Square)
}

/// Scans from `start` for a group of `kind`. Gives up at the first significant token at
/// depth 0 that does not open such a group.
fn scan(path: &[Token], start: usize, kind: BracketKind) -> Option<GroupScan> {
    let mut open: Vec<BracketKind> = Vec::new();
    let mut tokens = Vec::new();

    for idx in start..path.len() {
        let token = &path[idx];
        if open.is_empty() {
            if token.is_whitespace() {
                continue;
            }
            if opening(path, idx) != Some(kind) {
                return None;
            }
            open.push(kind);
            continue;
        }

        if let Some(inner) = opening(path, idx) {
            open.push(inner);
        } else if let Some(close) = closing(path, idx)
            && open.last() == Some(&close)
        {
            open.pop();
            if open.is_empty() {
                return Some(GroupScan {
                    tokens,
                    end: idx + 1,
                    capturing: false,
                });
            }
        }
        tokens.push(token.clone());
    }

    if open.is_empty() {
        return None;
    }
    Some(GroupScan {
        tokens,
        end: path.len(),
        capturing: true,
    })
}

fn previous_significant(path: &[Token], idx: usize) -> Option<&Token> {
    path[..idx].iter().rev().find(|token| !token.is_whitespace())
}

fn opening(path: &[Token], idx: usize) -> Option<BracketKind> {
    let token = &path[idx];
    if !token.is_symbol() {
        return None;
    }
    let kind = BracketKind::from_open(&token.text)?;
    if kind == BracketKind::Angle {
        let after_method = previous_significant(path, idx)
            .is_some_and(|prev| prev.kind == SymbolKind::Method);
        return after_method.then_some(kind);
    }
    Some(kind)
}

fn closing(path: &[Token], idx: usize) -> Option<BracketKind> {
    let token = &path[idx];
    if !token.is_symbol() {
        return None;
    }
    let kind = BracketKind::from_close(&token.text)?;
    if kind == BracketKind::Angle {
        let after_type = previous_significant(path, idx)
            .is_some_and(|prev| prev.kind == SymbolKind::Type);
        return after_type.then_some(kind);
    }
    Some(kind)
}

fn accepts_parameters(token: &Token) -> bool {
    matches!(
        token.kind,
        SymbolKind::Method | SymbolKind::Constructor | SymbolKind::GraphFunction | SymbolKind::Keyword
    )
}

fn is_operator(token: &Token) -> bool {
    token.is_symbol() && tokenizer::is_operator_text(&token.text)
}

/// Groups a pending anchor may still claim, in the order they can follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Generic,
    Parameters,
    Indexer,
    /// `is List<int>`: a keyword takes a following type together with its `<...>`.
    KeywordType,
    Done,
}

#[derive(Debug)]
struct Anchor {
    token: Token,
    stage: Stage,
    /// Coalesced operators only own a `(...)` group.
    operator: bool,
}

#[derive(Debug)]
struct Group {
    kind: BracketKind,
    /// `anchor.stage` is the slot the children go into.
    anchor: Anchor,
    /// Type token owning a keyword's `<...>`.
    owner: Option<Token>,
    /// Output of the enclosing level.
    outer: Vec<Token>,
}

#[derive(Debug)]
enum Open {
    /// Unclaimed bracket, kept so its close does not end an enclosing group.
    Plain(BracketKind),
    Group(Box<Group>),
}

impl Open {
    fn kind(&self) -> BracketKind {
        match self {
            Open::Plain(kind) => *kind,
            Open::Group(group) => group.kind,
        }
    }

    /// A keyword's `<...>` is invisible to enclosing groups: their closes end it too.
    fn is_keyword_type(&self) -> bool {
        matches!(self, Open::Group(group) if group.owner.is_some())
    }
}

struct TreeBuilder<'a> {
    path: &'a [Token],
    /// Output of the innermost open group.
    out: Vec<Token>,
    pending: Option<Anchor>,
    open: Vec<Open>,
}

/// Builds the token tree for a flat member path.
pub fn structure(path: &[Token]) -> Vec<Token> {
    let mut builder = TreeBuilder {
        path,
        out: Vec::new(),
        pending: None,
        open: Vec::new(),
    };
    let mut idx = 0;
    while idx < path.len() {
        idx = builder.step(idx);
    }
    builder.finish()
}

impl TreeBuilder<'_> {
    /// Handles the token at `idx` and returns the index of the next unhandled one.
    fn step(&mut self, idx: usize) -> usize {
        let path = self.path;
        let token = &path[idx];
        if token.is_whitespace() || self.close(idx) {
            return idx + 1;
        }
        if let Some(next) = self.claim(idx) {
            return next;
        }
        self.flush();

        if is_operator(token) {
            let mut token = token.clone();
            let mut next = idx + 1;
            while let Some(more) = path.get(next).filter(|more| is_operator(more)) {
                token.text.push_str(&more.text);
                next += 1;
            }
            self.pending = Some(Anchor {
                token,
                stage: Stage::Parameters,
                operator: true,
            });
            return next;
        }

        if let Some(kind) = opening(path, idx) {
            self.out.push(token.clone());
            self.open.push(Open::Plain(kind));
        } else if token.is_name() {
            self.pending = Some(Anchor {
                token: token.clone(),
                stage: Stage::Generic,
                operator: false,
            });
        } else {
            self.out.push(token.clone());
        }
        idx + 1
    }

    /// Ends the group the bracket at `idx` closes. `false` leaves the bracket as content.
    fn close(&mut self, idx: usize) -> bool {
        let Some(kind) = closing(self.path, idx) else {
            return false;
        };

        let mut target = None;
        for (depth, open) in self.open.iter().enumerate().rev() {
            if open.kind() == kind {
                target = Some(depth);
                break;
            }
            if !open.is_keyword_type() {
                break;
            }
        }
        let Some(depth) = target else {
            return false;
        };

        if let Open::Plain(_) = self.open[depth] {
            self.open.remove(depth);
            return false;
        }
        while self.open.len() > depth {
            self.pop();
        }
        true
    }

    /// Lets the pending anchor claim the bracket at `idx`. Returns the index after the
    /// claimed bracket.
    fn claim(&mut self, idx: usize) -> Option<usize> {
        let path = self.path;
        let anchor = self.pending.as_ref()?;
        let (stage, operator) = (anchor.stage, anchor.operator);
        let anchor_kind = anchor.token.kind;
        let has_parameters = anchor.token.parameter_args.is_some();
        let opens = opening(path, idx);

        let (slot, kind, owner, next) = if stage <= Stage::Generic
            && !operator
            && anchor_kind == SymbolKind::Method
            && opens == Some(BracketKind::Angle)
        {
            (Stage::Generic, BracketKind::Angle, None, idx + 1)
        } else if stage <= Stage::Parameters
            && (operator || accepts_parameters(&anchor.token))
            && opens == Some(BracketKind::Paren)
        {
            (Stage::Parameters, BracketKind::Paren, None, idx + 1)
        } else if stage <= Stage::Indexer && !operator && opens == Some(BracketKind::Square) {
            (Stage::Indexer, BracketKind::Square, None, idx + 1)
        } else if stage <= Stage::KeywordType
            && !operator
            && anchor_kind == SymbolKind::Keyword
            && !has_parameters
            && path[idx].kind == SymbolKind::Type
        {
            let angle = next_significant(path, idx + 1).filter(|at| {
                let token = &path[*at];
                token.is_symbol() && token.text == BracketKind::Angle.open()
            })?;
            (
                Stage::KeywordType,
                BracketKind::Angle,
                Some(path[idx].clone()),
                angle + 1,
            )
        } else {
            return None;
        };

        let mut anchor = self.pending.take()?;
        anchor.stage = slot;
        self.open.push(Open::Group(Box::new(Group {
            kind,
            anchor,
            owner,
            outer: mem::take(&mut self.out),
        })));
        Some(next)
    }

    /// Closes the innermost open bracket, moving a group's children into its anchor.
    fn pop(&mut self) {
        self.flush();
        let Some(Open::Group(group)) = self.open.pop() else {
            return;
        };
        let Group {
            mut anchor,
            owner,
            outer,
            ..
        } = *group;
        let children = mem::replace(&mut self.out, outer);

        let token = &mut anchor.token;
        anchor.stage = match anchor.stage {
            Stage::Generic => {
                token.generic_args = Some(children);
                Stage::Parameters
            }
            Stage::Parameters => {
                token.parameter_args = Some(children);
                Stage::Indexer
            }
            Stage::Indexer => {
                token.indexer_args = Some(children);
                Stage::KeywordType
            }
            Stage::KeywordType | Stage::Done => {
                if let Some(mut owner) = owner {
                    owner.generic_args = Some(children);
                    token.generic_args = Some(vec![owner]);
                }
                Stage::Done
            }
        };

        let done = anchor.stage == Stage::Done;
        self.pending = Some(anchor);
        if done {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if let Some(anchor) = self.pending.take() {
            self.out.push(anchor.token);
        }
    }

    /// Unclosed groups capture the rest of the path.
    fn finish(mut self) -> Vec<Token> {
        while !self.open.is_empty() {
            self.pop();
        }
        self.flush();
        self.out
    }
}

fn next_significant(path: &[Token], start: usize) -> Option<usize> {
    let offset = path.get(start..)?.iter().position(|token| !token.is_whitespace())?;
    Some(start + offset)
}

/// Splits a group into arguments on commas outside nested brackets. Whitespace is dropped;
/// an empty group has no arguments, a trailing comma yields a trailing empty argument.
pub fn split_arguments(group: &[Token]) -> Vec<Vec<Token>> {
    if group.iter().all(Token::is_whitespace) {
        return Vec::new();
    }

    let mut args = vec![Vec::new()];
    let mut depth = 0usize;
    for token in group {
        if token.is_whitespace() {
            continue;
        }
        if token.is_symbol() {
            match token.text.as_str() {
                "(" | "[" => depth += 1,
                ")" | "]" => depth = depth.saturating_sub(1),
                "," if depth == 0 => {
                    args.push(Vec::new());
                    continue;
                }
                _ => {}
            }
        }
        if let Some(current) = args.last_mut() {
            current.push(token.clone());
        }
    }
    args
}

/// Compact text form of a tree, e.g. `Mathf . Max(a , 1)`.
pub fn render_tree(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut work = Vec::new();
    push_level(&mut work, tokens);

    while let Some(piece) = work.pop() {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Token(token) => {
                out.push_str(&token.text);
                let groups = [
                    (&token.generic_args, BracketKind::Angle),
                    (&token.parameter_args, BracketKind::Paren),
                    (&token.indexer_args, BracketKind::Square),
                ];
                for (group, kind) in groups.into_iter().rev() {
                    if let Some(args) = group {
                        work.push(Piece::Text(kind.close()));
                        push_level(&mut work, args);
                        work.push(Piece::Text(kind.open()));
                    }
                }
            }
        }
    }
    out
}

enum Piece<'a> {
    Token(&'a Token),
    Text(&'static str),
}

/// Queues one level's tokens, space-separated, so that they pop in order.
fn push_level<'a>(work: &mut Vec<Piece<'a>>, tokens: &'a [Token]) {
    for (idx, token) in tokens.iter().enumerate().rev() {
        work.push(Piece::Token(token));
        if idx > 0 {
            work.push(Piece::Text(" "));
        }
    }
}

//! Path resolver: the main left-to-right loop.
//!
//! Every fragment is either consumed into the member path (when more fragments follow) or,
//! for the last fragment, turned into completion candidates. A name right after a dot
//! continues a member-access chain; anything else starts a fresh chain.
//!
//! Brackets drive a small stack machine: an opening bracket pushes a frame holding the token
//! it follows, the matching closing bracket pops the frame into the pending slot, and a
//! following `.` continues member access off that pending token
//! (`GetComponent<Rigidbody>().velocity`, `items[0].name`). Closing a call group also picks
//! the overload its arguments fit, so `Mathf.Abs(count).` lists the members of `int`.

use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;

use crate::catalogue::{Catalogue, TypeId};
use crate::config::ResolverConfig;
use crate::context::{AccessTarget, ResolutionContext};
use crate::overload::{select_overload_by_types, token_value_type};
use crate::providers::{
    self, FRESH_CHAIN, MemberProvider, SymbolProvider, UnknownNameProvider, call_value_type,
};
use crate::scope::GraphScope;
use crate::span::Span;
use crate::symbol::{KeywordKind, ResolvedMember, SymbolKind, Token};
use crate::tokenizer;

/// Result of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Terminal candidates, sorted case-insensitively by name.
    pub completions: Vec<Token>,
    /// Flat member path of every consumed fragment; `structure` turns it into a tree.
    pub path: Vec<Token>,
    /// Byte span of the fragment the completions replace.
    pub replace: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketKind {
    Paren,
    Square,
    Angle,
}

impl BracketKind {
    pub fn from_open(text: &str) -> Option<BracketKind> {
        match text {
            "(" => Some(BracketKind::Paren),
            "[" => Some(BracketKind::Square),
            "<" => Some(BracketKind::Angle),
            _ => None,
        }
    }

    pub fn from_close(text: &str) -> Option<BracketKind> {
        match text {
            ")" => Some(BracketKind::Paren),
            "]" => Some(BracketKind::Square),
            ">" => Some(BracketKind::Angle),
            _ => None,
        }
    }

    pub fn open(self) -> &'static str {
        match self {
            BracketKind::Paren => "(",
            BracketKind::Square => "[",
            BracketKind::Angle => "<",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            BracketKind::Paren => ")",
            BracketKind::Square => "]",
            BracketKind::Angle => ">",
        }
    }
}

#[derive(Debug)]
struct Frame {
    kind: BracketKind,
    anchor: Option<AccessTarget>,
    /// Index in the member path of the first token inside the bracket.
    start: usize,
}

/// Open brackets awaiting their close. Empty means idle.
#[derive(Debug, Default)]
struct DeepMemberStack {
    frames: Vec<Frame>,
}

impl DeepMemberStack {
    fn push(&mut self, kind: BracketKind, anchor: Option<AccessTarget>, start: usize) {
        self.frames.push(Frame {
            kind,
            anchor,
            start,
        });
    }

    /// Pops the top frame when it matches `kind`.
    fn pop(&mut self, kind: BracketKind) -> Option<Frame> {
        if self.frames.last()?.kind != kind {
            return None;
        }
        self.frames.pop()
    }
}

/// Resolves `input` against the catalogue and scope.
pub fn evaluate(
    input: &str,
    catalogue: &Catalogue,
    scope: &GraphScope,
    config: &ResolverConfig,
) -> Evaluation {
    evaluate_cancellable(input, catalogue, scope, config, None).unwrap_or_default()
}

/// Like [`evaluate`], but polls `cancel` before every fragment and returns `None` once it
/// is cancelled.
pub fn evaluate_cancellable(
    input: &str,
    catalogue: &Catalogue,
    scope: &GraphScope,
    config: &ResolverConfig,
    cancel: Option<&CancellationToken>,
) -> Option<Evaluation> {
    let mut fragments = tokenizer::tokenize(input);
    let spans = tokenizer::fragment_spans(&fragments);

    let mut replace = spans.last().copied().unwrap_or_default();
    let ends_in_separator = fragments
        .last()
        .is_some_and(|last| tokenizer::is_symbol(last) || tokenizer::is_whitespace(last));
    if ends_in_separator {
        fragments.push(String::new());
        replace = Span::empty(replace.end);
    }

    let mut resolver = Resolver {
        cx: ResolutionContext::new(catalogue, scope, config),
        stack: DeepMemberStack::default(),
        pending: None,
        call_types: FxHashMap::default(),
        groups: FxHashMap::default(),
    };

    let last = fragments.len() - 1;
    for (idx, fragment) in fragments.iter().enumerate() {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            tracing::debug!(fragment = idx, "resolution cancelled");
            return None;
        }
        resolver.step(fragment, idx == last);
    }

    let Resolver { mut cx, .. } = resolver;
    cx.completions
        .sort_by_cached_key(|token| token.text.to_lowercase());

    tracing::debug!(
        fragments = fragments.len(),
        path = cx.members.len(),
        completions = cx.completions.len(),
        "evaluated expression"
    );

    Some(Evaluation {
        completions: cx.completions,
        path: cx.members,
        replace,
    })
}

struct Resolver<'a> {
    cx: ResolutionContext<'a>,
    stack: DeepMemberStack,
    /// Token a closed bracket left for member access.
    pending: Option<AccessTarget>,
    /// Value type of each closed call, keyed by the path index of its `)`.
    call_types: FxHashMap<usize, TypeId>,
    /// Open-bracket index of each closed group, keyed by the index of its close.
    groups: FxHashMap<usize, usize>,
}

impl Resolver<'_> {
    fn step(&mut self, fragment: &str, is_last: bool) {
        if tokenizer::is_whitespace(fragment) {
            self.cx.members.push(Token::unresolved(fragment));
            return;
        }

        if !tokenizer::is_symbol(fragment)
            && let Some(target) = self.member_access()
        {
            self.cx.begin_fragment(fragment, is_last, target);
            providers::run_chain(&MEMBER_CHAIN, &mut self.cx);
            self.pending = None;
            return;
        }

        self.cx.begin_fragment(fragment, is_last, None);
        let before = self.cx.previous.clone();
        providers::run_chain(&FRESH_CHAIN, &mut self.cx);

        if !is_last && tokenizer::is_symbol(fragment) {
            self.track_bracket(fragment, before);
        } else {
            self.pending = None;
        }
    }

    /// `Some(target)` when the fragment follows a dot. The inner `None` is a dead end.
    fn member_access(&mut self) -> Option<Option<AccessTarget>> {
        let mut significant = self.cx.members.iter().rev().filter(|t| !t.is_whitespace());
        if !significant.next()?.is_dot() {
            return None;
        }

        if let Some(pending) = self.pending.take() {
            return Some(Some(pending).filter(|p| accepts_member_access(&p.token)));
        }

        let target = significant.next().filter(|token| accepts_member_access(token));
        Some(target.cloned().map(AccessTarget::new))
    }

    fn track_bracket(&mut self, fragment: &str, before: Option<Token>) {
        if let Some(kind) = BracketKind::from_open(fragment) {
            let anchor = self
                .pending
                .take()
                .or_else(|| before.filter(Token::is_name).map(AccessTarget::new));

            if kind == BracketKind::Angle
                && anchor
                    .as_ref()
                    .is_none_or(|a| a.token.kind != SymbolKind::Method)
            {
                return;
            }

            self.stack.push(kind, anchor, self.cx.members.len());
            self.cx.is_static = true;
            return;
        }

        if let Some(kind) = BracketKind::from_close(fragment) {
            let frame = self.stack.pop(kind);
            self.pending = frame.and_then(|frame| self.close_group(kind, frame));
            return;
        }

        if fragment != "." {
            self.pending = None;
        }
    }

    /// Finishes the anchor of a closed group. The closing symbol is the last path token.
    fn close_group(&mut self, kind: BracketKind, frame: Frame) -> Option<AccessTarget> {
        let close = self.cx.members.len().checked_sub(1)?;
        if let Some(open) = frame.start.checked_sub(1) {
            self.groups.insert(close, open);
        }

        let mut anchor = frame.anchor?;
        match kind {
            BracketKind::Angle => {
                let inner = self.cx.members.get(frame.start..).unwrap_or_default();
                anchor.generic_types = bound_types(inner);
            }
            BracketKind::Square => anchor.indexed = true,
            BracketKind::Paren => {
                if anchor.token.kind == SymbolKind::Method
                    && let Some(member) = anchor.token.member()
                {
                    let arg_types = self.argument_types(frame.start, close);
                    anchor.overload =
                        select_overload_by_types(self.cx.catalogue, member, &arg_types);
                }
                if let Some(ty) = call_value_type(self.cx.catalogue, &anchor) {
                    self.call_types.insert(close, ty);
                }
            }
        }
        Some(anchor)
    }

    /// Static types of the comma-separated arguments in `members[start..close]`. An argument
    /// is known when it is a plain chain ending in a name or a closed call. Walks backwards
    /// and jumps over closed groups, so each close costs only its own top-level tokens.
    fn argument_types(&self, start: usize, close: usize) -> Vec<Option<TypeId>> {
        let mut types = Vec::new();
        let mut plain = true;
        let mut last = None;
        let mut any = false;

        let mut idx = close;
        while idx > start {
            idx -= 1;
            let Some(token) = self.cx.members.get(idx) else {
                break;
            };
            if token.is_whitespace() {
                continue;
            }
            any = true;
            if token.is_symbol() {
                if token.text == "," {
                    types.push(self.argument_type(plain, last));
                    plain = true;
                    last = None;
                    continue;
                }
                if let Some(&open) = self.groups.get(&idx) {
                    last = last.or(Some(idx));
                    idx = open;
                    continue;
                }
                if !token.is_dot() {
                    plain = false;
                }
            }
            last = last.or(Some(idx));
        }

        if !any {
            return Vec::new();
        }
        types.push(self.argument_type(plain, last));
        types.reverse();
        types
    }

    fn argument_type(&self, plain: bool, last: Option<usize>) -> Option<TypeId> {
        let idx = last.filter(|_| plain)?;
        let token = self.cx.members.get(idx)?;
        if !token.is_symbol() {
            token_value_type(self.cx.catalogue, token)
        } else if token.text == ")" {
            self.call_types.get(&idx).copied()
        } else {
            None
        }
    }
}

static MEMBER_CHAIN: [&dyn SymbolProvider; 2] = [&MemberProvider, &UnknownNameProvider];

/// Tokens member access may continue from. Statement keywords, symbols and unresolved names
/// are dead ends.
fn accepts_member_access(token: &Token) -> bool {
    match token.kind {
        SymbolKind::Symbol | SymbolKind::None => false,
        SymbolKind::Keyword => token.keyword_kind != Some(KeywordKind::Statement),
        _ => true,
    }
}

/// Types named directly inside a closed generic-argument list, in order.
fn bound_types(inner: &[Token]) -> Vec<TypeId> {
    let mut depth = 0usize;
    let mut out = Vec::new();
    for token in inner {
        if token.is_symbol() {
            if BracketKind::from_open(&token.text).is_some() {
                depth += 1;
            } else if BracketKind::from_close(&token.text).is_some() {
                depth = depth.saturating_sub(1);
            }
            continue;
        }
        if depth == 0
            && token.kind == SymbolKind::Type
            && let Some(ResolvedMember::Type(ty)) = token.member_ref
        {
            out.push(ty);
        }
    }
    out
}

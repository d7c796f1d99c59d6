//! Shunting-yard expression parser: two stacks (operators, operands),
//! `last_was_value` to disambiguate unary/binary forms, and paren/bracket
//! depth counters that double as the expression's termination test.

use vire_lex::{Keyword, Token, TokenKind};

use crate::ast::{ArrayLeaf, BinOp, ConstLeaf, FnCall, Node, Range, StrLeaf, VarLeaf, VarId};
use crate::ParseResult;

use super::Parser;

/// One entry on the operator stack. `Open` brackets and `NameMarker`s are
/// never popped by the precedence-reduce loop (their effective precedence
/// is `i32::MIN`) — only by the matching `)`/`]` handler.
enum StackOp {
    Open(TokenKind),
    /// A `Name` that resolved to a callable (`is_array = false`) or
    /// indexable (`is_array = true`) `Var`, parked here until the matching
    /// `)`/`]` materializes it into a `FnCall`/`ArrayLeaf`.
    NameMarker { token: Token, var: VarId, arity: usize, is_array: bool },
    Oper { token: Token, arity: usize, prec: i32 },
}

impl<'a> Parser<'a> {
    /// Parses one expression, stopping (without consuming) at `;`, `{`,
    /// `}`, or an unmatched `)`/`]`.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Node> {
        let mut operands: Vec<Node> = Vec::new();
        let mut op_stack: Vec<StackOp> = Vec::new();
        let mut last_was_value = false;
        let mut paren_depth = 0usize;
        let mut bracket_depth = 0usize;

        loop {
            match self.cur.kind {
                TokenKind::Semi | TokenKind::LBrace | TokenKind::RBrace | TokenKind::EoF => break,
                TokenKind::RParen if paren_depth == 0 => break,
                TokenKind::RBracket if bracket_depth == 0 => break,
                _ => {}
            }

            if self.at_keyword(Keyword::Rng) {
                self.bump()?;
                let range = self.parse_range()?;
                operands.push(Node::Range(Box::new(range)));
                last_was_value = true;
                continue;
            }

            match self.cur.kind {
                TokenKind::LParen => {
                    self.bump()?;
                    op_stack.push(StackOp::Open(TokenKind::LParen));
                    paren_depth += 1;
                    last_was_value = false;
                }
                TokenKind::LBracket => {
                    self.bump()?;
                    op_stack.push(StackOp::Open(TokenKind::LBracket));
                    bracket_depth += 1;
                    last_was_value = false;
                }
                kind if vire_lex::is_number_token(kind) => {
                    let tok = self.bump()?;
                    operands.push(Node::Const(ConstLeaf { token: tok }));
                    last_was_value = true;
                }
                TokenKind::String => {
                    let tok = self.bump()?;
                    operands.push(Node::Str(StrLeaf { token: tok }));
                    last_was_value = true;
                }
                TokenKind::Comma => {
                    self.bump()?;
                }
                TokenKind::Name
                    if matches!(self.cur.keyword, Some(Keyword::True) | Some(Keyword::False) | Some(Keyword::Null)) =>
                {
                    let tok = self.bump()?;
                    operands.push(Node::Const(ConstLeaf { token: tok }));
                    last_was_value = true;
                }
                TokenKind::Name if self.cur.keyword.is_none() => {
                    self.parse_name_operand(&mut operands, &mut op_stack, &mut last_was_value)?;
                }
                TokenKind::RParen => {
                    self.bump()?;
                    self.reduce_until_open(&mut operands, &mut op_stack, TokenKind::LParen)?;
                    paren_depth -= 1;
                    self.maybe_materialize(&mut operands, &mut op_stack, true)?;
                    last_was_value = true;
                }
                TokenKind::RBracket => {
                    self.bump()?;
                    self.reduce_until_open(&mut operands, &mut op_stack, TokenKind::LBracket)?;
                    bracket_depth -= 1;
                    self.maybe_materialize(&mut operands, &mut op_stack, false)?;
                    last_was_value = true;
                }
                _ => {
                    let tok = self.cur.clone();
                    let unary = !last_was_value;
                    let prec = vire_lex::precedence(tok.kind, unary);
                    if prec == i32::MIN {
                        return Err(self.unexpected(format!("unexpected token '{}' in expression", tok.data)));
                    }
                    self.bump()?;

                    loop {
                        let should_reduce = match op_stack.last() {
                            Some(StackOp::Oper { prec: top_prec, .. }) => {
                                if vire_lex::is_assignment(tok.kind) {
                                    *top_prec > prec
                                } else {
                                    *top_prec >= prec
                                }
                            }
                            _ => false,
                        };
                        if !should_reduce {
                            break;
                        }
                        self.reduce_top(&mut operands, &mut op_stack)?;
                    }

                    let arity = if last_was_value { 2 } else { 1 };
                    op_stack.push(StackOp::Oper { token: tok, arity, prec });
                    last_was_value = false;
                }
            }
        }

        while let Some(top) = op_stack.last() {
            match top {
                StackOp::Open(_) => return Err(self.unexpected("mismatched bracket in expression")),
                StackOp::NameMarker { .. } => {
                    return Err(self.unexpected("unmatched function or array reference in expression"))
                }
                StackOp::Oper { .. } => self.reduce_top(&mut operands, &mut op_stack)?,
            }
        }

        operands.pop().ok_or_else(|| self.unexpected("expected an expression"))
    }

    fn parse_name_operand(
        &mut self,
        operands: &mut Vec<Node>,
        op_stack: &mut Vec<StackOp>,
        last_was_value: &mut bool,
    ) -> ParseResult<()> {
        let tok = self.bump()?;
        let var_id = self
            .resolve_name(&tok.data)?
            .ok_or_else(|| self.unexpected(format!("use of undeclared variable '{}'", tok.data)))?;

        let var = &self.program.vars[var_id];
        if var.var_type == Keyword::Fn {
            let arity = match var.initial.as_deref() {
                Some(Node::Lambda(lambda)) => lambda.params.len(),
                _ => 0,
            };
            op_stack.push(StackOp::NameMarker { token: tok, var: var_id, arity, is_array: false });
            *last_was_value = false;
        } else if var.is_arr {
            op_stack.push(StackOp::NameMarker { token: tok, var: var_id, arity: 2, is_array: true });
            *last_was_value = false;
        } else {
            operands.push(Node::VarRef(VarLeaf { var: var_id }));
            *last_was_value = true;
        }
        Ok(())
    }

    fn reduce_until_open(
        &mut self,
        operands: &mut Vec<Node>,
        op_stack: &mut Vec<StackOp>,
        open_kind: TokenKind,
    ) -> ParseResult<()> {
        loop {
            match op_stack.last() {
                Some(StackOp::Open(kind)) if *kind == open_kind => {
                    op_stack.pop();
                    return Ok(());
                }
                Some(StackOp::Open(_)) | Some(StackOp::NameMarker { .. }) => {
                    return Err(self.unexpected("mismatched bracket in expression"))
                }
                Some(StackOp::Oper { .. }) => self.reduce_top(operands, op_stack)?,
                None => return Err(self.unexpected("unmatched closing bracket")),
            }
        }
    }

    /// After a `)`/`]` has reduced down to its matching open bracket (now
    /// popped), checks whether a `NameMarker` sits underneath and, if its
    /// `is_array` flag matches the bracket kind that just closed,
    /// materializes the call or index.
    fn maybe_materialize(
        &mut self,
        operands: &mut Vec<Node>,
        op_stack: &mut Vec<StackOp>,
        closed_paren: bool,
    ) -> ParseResult<()> {
        let matches_marker = matches!(
            op_stack.last(),
            Some(StackOp::NameMarker { is_array, .. }) if *is_array != closed_paren
        );
        if !matches_marker {
            return Ok(());
        }
        if let Some(StackOp::NameMarker { token, var, arity, is_array }) = op_stack.pop() {
            if closed_paren && !is_array {
                let mut params = Vec::with_capacity(arity);
                for _ in 0..arity {
                    params.push(self.pop_operand(operands)?);
                }
                params.reverse();
                operands.push(Node::FnCall(Box::new(FnCall { fn_name: token, func: var, params })));
            } else if !closed_paren && is_array {
                let index = self.pop_operand(operands)?;
                operands.push(Node::ArrayRef(Box::new(ArrayLeaf { var, index })));
            }
        }
        Ok(())
    }

    fn pop_operand(&self, operands: &mut Vec<Node>) -> ParseResult<Node> {
        operands.pop().ok_or_else(|| self.unexpected("expression stack underflow"))
    }

    fn reduce_top(&mut self, operands: &mut Vec<Node>, op_stack: &mut Vec<StackOp>) -> ParseResult<()> {
        let entry = match op_stack.pop() {
            Some(entry) => entry,
            None => return Ok(()),
        };
        let StackOp::Oper { token, arity, .. } = entry else {
            op_stack.push(entry);
            return Ok(());
        };

        if arity == 2 {
            let r = self.pop_operand(operands)?;
            let l = self.pop_operand(operands)?;
            if vire_lex::is_assignment(token.kind) {
                if !l.is_lvalue() {
                    return Err(self.unexpected("left side of assignment must be a variable or array element"));
                }
                self.check_mutable(&l)?;
            }
            operands.push(Node::BinOp(Box::new(BinOp { oper: token, l, r })));
        } else {
            let operand = self.pop_operand(operands)?;
            operands.push(Node::UnOp(Box::new(crate::ast::UnOp { oper: token, operand })));
        }
        Ok(())
    }

    fn check_mutable(&self, node: &Node) -> ParseResult<()> {
        let var_id = match node {
            Node::VarRef(leaf) => leaf.var,
            Node::ArrayRef(leaf) => leaf.var,
            _ => return Ok(()),
        };
        if !self.program.vars[var_id].mutable {
            return Err(self.unexpected("Cannot assign to immutable variable"));
        }
        Ok(())
    }

    /// `rng`-introduced range expression: `[`/`(` sets the left-inclusivity
    /// flag, then delegates to the shared range-body parser.
    pub(crate) fn parse_range(&mut self) -> ParseResult<Range> {
        let left_inclusive = match self.cur.kind {
            TokenKind::LBracket => {
                self.bump()?;
                true
            }
            TokenKind::LParen => {
                self.bump()?;
                false
            }
            _ => return Err(self.unexpected("expected '[' or '(' opening a range")),
        };
        self.parse_range_body(left_inclusive)
    }
}

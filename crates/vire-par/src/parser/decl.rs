//! Declarations: `parse_var_decl`, the array/range bound forms it can
//! carry, parameter lists, and the `fn`-typed initializer (lambda) path.

use vire_lex::{Keyword, Token, TokenKind};
use vire_util::Symbol;

use crate::ast::{ConstLeaf, Lambda, Node, Range, RangeFlags, Var, VarId};
use crate::ParseResult;

use super::Parser;

fn is_decl_type_keyword(kw: Keyword) -> bool {
    use Keyword::*;
    matches!(kw, Let | I8 | I16 | I32 | I64 | U8 | U16 | U32 | U64 | F32 | F64 | Bool | Str16 | Ch16 | Fn)
}

fn is_terminator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Assign | TokenKind::Semi | TokenKind::Comma | TokenKind::Arrow | TokenKind::RParen
    )
}

impl<'a> Parser<'a> {
    pub(crate) fn is_decl_start(&self) -> bool {
        matches!(self.cur.keyword, Some(kw) if is_decl_type_keyword(kw))
    }

    /// Parses the head of a declaration — modifiers, type, optional array
    /// bound, optional type-parameter list, and the short name — stopping
    /// at `=`, `;`, `,`, `->`, or `)`. Never registers the resulting `Var`
    /// in scope itself; `add` only records the caller's intent so the two
    /// call sites (statement declarations, which must add the `fn` case
    /// *before* parsing its body, and parameter lists, which can add
    /// immediately) can each apply it at the right moment.
    pub(crate) fn parse_var_decl(&mut self, add: bool) -> ParseResult<VarId> {
        let start_span = self.cur.span;
        let mut var_type: Option<Keyword> = None;
        let mut mutable = false;
        let mut is_arr = false;
        let mut arr_range: Option<Range> = None;
        let mut template_params: Vec<Symbol> = Vec::new();
        let mut short_name: Option<String> = None;

        while !is_terminator(self.cur.kind) {
            if self.cur.kind == TokenKind::EoF {
                return Err(self.unexpected("unexpected end of file in variable declaration"));
            }
            if let Some(kw) = self.cur.keyword {
                if kw == Keyword::Mut {
                    mutable = true;
                    self.bump()?;
                    continue;
                }
                if is_decl_type_keyword(kw) {
                    if var_type.is_some() {
                        return Err(self.unexpected("multiple data types"));
                    }
                    var_type = Some(kw);
                    self.bump()?;
                    continue;
                }
            }
            match self.cur.kind {
                TokenKind::LBracket => {
                    self.bump()?;
                    is_arr = true;
                    arr_range = Some(self.parse_array_bound()?);
                }
                TokenKind::OperLess => {
                    self.bump()?;
                    loop {
                        let seg = self.expect(TokenKind::Name, "expected a type parameter name")?;
                        template_params.push(self.lexer_intern(&seg.data));
                        if self.cur.kind == TokenKind::Comma {
                            self.bump()?;
                            continue;
                        }
                        break;
                    }
                    self.expect(TokenKind::OperGreater, "expected '>' closing type parameter list")?;
                }
                TokenKind::Name if self.cur.keyword.is_none() => {
                    short_name = Some(self.cur.data.clone());
                    self.bump()?;
                }
                _ => return Err(self.unexpected("unexpected token in variable declaration")),
            }
        }

        let var_type = var_type
            .ok_or_else(|| self.unexpected("expected a type keyword in variable declaration"))?;
        let short_name =
            short_name.ok_or_else(|| self.unexpected("expected a variable name"))?;

        let qualified = if self.in_param_scope {
            self.lexer_intern(&short_name)
        } else {
            match self.current_namespace.clone() {
                Some(ns) => self.lexer_intern_qualified(&ns, &short_name),
                None => self.lexer_intern(&short_name),
            }
        };

        let mut var = Var::new(qualified, var_type, start_span);
        var.mutable = mutable;
        var.is_arr = is_arr;
        var.arr = arr_range;
        var.template_params = template_params;

        let id = self.program.vars.push(var);

        if add {
            self.register(id, &short_name)?;
        }

        Ok(id)
    }

    /// Adds `id` (already keyed by its fully-qualified `Var::name`) to the
    /// top scope frame, turning a collision into "duplicate variable".
    pub(crate) fn register(&mut self, id: VarId, short_name: &str) -> ParseResult<()> {
        let name = self.program.vars[id].name;
        if !self.scopes.add(name, id) {
            return Err(self.unexpected(format!("'{short_name}' is already defined in this scope")));
        }
        Ok(())
    }

    /// Permits exactly one bare param (`i32 x -> ...`) or a parenthesized,
    /// comma-separated list. Pushes (but does not pop) the parameter scope
    /// frame; the caller pops it once the lambda body has been parsed, so
    /// parameters stay resolvable for the whole body.
    pub(crate) fn parse_param_list(&mut self) -> ParseResult<Vec<VarId>> {
        self.scopes.push_scope();
        self.in_param_scope = true;
        let mut params = Vec::new();

        let result = (|| -> ParseResult<()> {
            if self.cur.kind == TokenKind::LParen {
                self.bump()?;
                if self.cur.kind != TokenKind::RParen {
                    loop {
                        params.push(self.parse_var_decl(true)?);
                        if self.cur.kind == TokenKind::Comma {
                            self.bump()?;
                            continue;
                        }
                        break;
                    }
                }
                self.expect(TokenKind::RParen, "expected ')' closing parameter list")?;
            } else {
                params.push(self.parse_var_decl(true)?);
            }
            Ok(())
        })();

        self.in_param_scope = false;
        result?;
        Ok(params)
    }

    /// A declaration's array bound, with the leading `[` already consumed.
    /// Accepts either an explicit `lo;hi)`/`lo;hi]` range, or a single
    /// upper-bound expression `expr]`, which widens to `[0; expr)`.
    fn parse_array_bound(&mut self) -> ParseResult<Range> {
        let first = self.parse_const_leaf()?;
        if self.cur.kind == TokenKind::Semi {
            self.bump()?;
            let hi = self.parse_const_leaf()?;
            let right_inclusive = match self.cur.kind {
                TokenKind::RBracket => {
                    self.bump()?;
                    true
                }
                TokenKind::RParen => {
                    self.bump()?;
                    false
                }
                _ => return Err(self.unexpected("expected ')' or ']' closing array range")),
            };
            Ok(Range { lo: first, hi, flags: RangeFlags { left_inclusive: true, right_inclusive } })
        } else {
            self.expect(TokenKind::RBracket, "expected ']' closing array bound")?;
            let zero = ConstLeaf { token: Token::new(TokenKind::Int32L, "0", first.token.span) };
            Ok(Range { lo: zero, hi: first, flags: RangeFlags { left_inclusive: true, right_inclusive: false } })
        }
    }

    /// Parses `[`/`(` lo `;` hi `]`/`)`, given the opening delimiter has
    /// already been consumed and classified into `left_inclusive`. Shared
    /// by the declaration array-bound form and the `rng`-keyword
    /// expression form (`parser::expr::parse_range`).
    pub(crate) fn parse_range_body(&mut self, left_inclusive: bool) -> ParseResult<Range> {
        let lo = self.parse_const_leaf()?;
        self.expect(TokenKind::Semi, "expected ';' in range")?;
        let hi = self.parse_const_leaf()?;
        let right_inclusive = match self.cur.kind {
            TokenKind::RBracket => {
                self.bump()?;
                true
            }
            TokenKind::RParen => {
                self.bump()?;
                false
            }
            _ => return Err(self.unexpected("expected ')' or ']' closing range")),
        };
        Ok(Range { lo, hi, flags: RangeFlags { left_inclusive, right_inclusive } })
    }

    /// A single constant-evaluable leaf: an optionally-negated numeric
    /// literal. Both ends of a `Range` must satisfy this.
    fn parse_const_leaf(&mut self) -> ParseResult<ConstLeaf> {
        let negative = if self.cur.kind == TokenKind::OperMin {
            self.bump()?;
            true
        } else {
            false
        };
        if !vire_lex::is_number_token(self.cur.kind) {
            return Err(self.unexpected("expected a constant numeric literal"));
        }
        let mut token = self.bump()?;
        if negative {
            token.data = format!("-{}", token.data);
        }
        Ok(ConstLeaf { token })
    }

    /// Statement-level declaration: parses the head via `parse_var_decl`
    /// (always deferring registration — `add = false` — since the `fn`
    /// case must register before its body, not after), then handles the
    /// optional initializer per the component design's rules for `fn`,
    /// `let`, and everything else.
    pub(crate) fn parse_var_decl_stmt(&mut self) -> ParseResult<VarId> {
        let id = self.parse_var_decl(false)?;
        let var_type = self.program.vars[id].var_type;
        let short_name = self.lexer_resolve(self.program.vars[id].name).rsplit('.').next().unwrap().to_string();

        if self.cur.kind == TokenKind::Assign {
            self.bump()?;
            if var_type == Keyword::Fn {
                // A `fn` initializer consumes its own terminator (the
                // lambda body's closing `}`, or the wrapped single
                // statement's own `;`) — no extra semicolon follows.
                self.parse_fn_initializer(id, &short_name)?;
            } else {
                self.register(id, &short_name)?;
                let init = self.parse_expr()?;
                if var_type == Keyword::Let {
                    let inferred = init.type_keyword(&self.program.vars);
                    self.program.vars[id].var_type = inferred;
                }
                self.program.vars[id].initial = Some(Box::new(init));
                self.expect(TokenKind::Semi, "expected ';' after variable declaration")?;
            }
        } else {
            if var_type == Keyword::Let {
                return Err(self.unexpected("'let' declaration requires an initializer"));
            }
            self.register(id, &short_name)?;
            self.expect(TokenKind::Semi, "expected ';' after variable declaration")?;
        }

        Ok(id)
    }

    /// Parses a `fn`-typed declaration's right-hand side: the `Var` for
    /// the function itself is added to scope *before* the parameter list
    /// and body are parsed, so the body can call its own name directly
    /// (recursion) without forward-declaration machinery.
    pub(crate) fn parse_fn_initializer(&mut self, id: VarId, short_name: &str) -> ParseResult<()> {
        self.register(id, short_name)?;

        let params = self.parse_param_list()?;
        self.expect(TokenKind::Arrow, "expected '->' in function declaration")?;
        let ret_type = match self.cur.keyword {
            Some(kw) => {
                self.bump()?;
                kw
            }
            None => return Err(self.unexpected("expected a return type keyword")),
        };

        let def = if self.cur.kind == TokenKind::LBrace {
            self.bump()?;
            Some(self.parse_block(true)?)
        } else {
            let span = self.cur.span;
            let stmt = self.parse_block_statement()?;
            let wrapped = if ret_type != Keyword::Null {
                let ret_tok = self.synthetic_keyword_token(Keyword::Ret, span);
                Node::UnOp(Box::new(crate::ast::UnOp { oper: ret_tok, operand: stmt }))
            } else {
                stmt
            };
            Some(crate::ast::StatementBlock { children: vec![wrapped], bytes: 0, is_fn: true })
        };

        self.scopes.pop_scope();
        self.program.vars[id].initial =
            Some(Box::new(Node::Lambda(Box::new(Lambda { params, ret_type, def }))));
        Ok(())
    }

    /// Resolves `short` per the scope/symbol table's fallback order: exact
    /// match, then `current_namespace.short`, then each `using` prefix in
    /// turn, then (if the token stream offers more dotted segments) a
    /// retry with the candidate extended by one more `.segment`.
    pub(crate) fn resolve_name(&mut self, short: &str) -> ParseResult<Option<VarId>> {
        let mut candidate = short.to_string();
        loop {
            if let Some(found) = self.try_resolve(&candidate) {
                return Ok(Some(found));
            }
            if self.cur.kind == TokenKind::Dot {
                self.bump()?;
                let seg = self.expect(TokenKind::Name, "expected a name after '.'")?;
                candidate.push('.');
                candidate.push_str(&seg.data);
                continue;
            }
            return Ok(None);
        }
    }

    fn try_resolve(&mut self, candidate: &str) -> Option<VarId> {
        let plain = self.lexer_intern(candidate);
        if let Some(v) = self.scopes.lookup(plain) {
            return Some(v);
        }
        if let Some(ns) = self.current_namespace.clone() {
            let qualified = self.lexer_intern_qualified(&ns, candidate);
            if let Some(v) = self.scopes.lookup(qualified) {
                return Some(v);
            }
        }
        for use_prefix in self.current_uses.clone() {
            let prefix_text = self.lexer_resolve(use_prefix).to_string();
            let qualified = self.lexer_intern_qualified(&prefix_text, candidate);
            if let Some(v) = self.scopes.lookup(qualified) {
                return Some(v);
            }
        }
        None
    }

    pub(crate) fn lexer_intern(&mut self, text: &str) -> Symbol {
        self.lexer.intern(text)
    }

    pub(crate) fn lexer_intern_qualified(&mut self, namespace: &str, short_name: &str) -> Symbol {
        self.lexer.intern_qualified(namespace, short_name)
    }

    pub(crate) fn lexer_resolve(&self, sym: Symbol) -> &str {
        self.lexer.resolve_symbol(sym)
    }
}

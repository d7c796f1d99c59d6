//! Top-level translation-unit parsing (`nspace`/`using`/`import`), block
//! and statement dispatch, and the preprocessor's one-shot `unsafe` flag.

use vire_lex::{Keyword, TokenKind};

use crate::ast::{IfStatement, Namespace, Node, StatementBlock, UnOp, WhileLoop};
use crate::ParseResult;

use super::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_using(&mut self) -> ParseResult<()> {
        self.bump()?; // 'using'
        let (_, dotted_symbol) = self.parse_dotted_name()?;
        if self.cur.kind == TokenKind::Semi {
            self.bump()?;
        }
        self.current_uses.push(dotted_symbol);
        Ok(())
    }

    pub(crate) fn parse_import(&mut self) -> ParseResult<()> {
        self.bump()?; // the 'import' name token itself
        self.parse_dotted_name()?;
        if self.cur.kind == TokenKind::Semi {
            self.bump()?;
        }
        Ok(())
    }

    pub(crate) fn parse_namespace(&mut self) -> ParseResult<()> {
        self.bump()?; // 'nspace'
        let (name_text, _) = self.parse_dotted_name()?;
        self.expect(TokenKind::LBrace, "expected '{' after namespace name")?;

        let previous_namespace = self.current_namespace.replace(name_text.clone());
        let uses = std::mem::take(&mut self.current_uses);

        let block = self.parse_block(false)?;

        self.current_namespace = previous_namespace;

        if !block.children.is_empty() {
            let name = self.lexer_intern(&name_text);
            self.program.namespaces.push(Namespace { name, block, uses });
        }
        Ok(())
    }

    /// Reads `Name (. Name)*`, returning both the concatenated text and its
    /// interned symbol.
    fn parse_dotted_name(&mut self) -> ParseResult<(String, vire_util::Symbol)> {
        let first = self.expect(TokenKind::Name, "expected a name")?;
        let mut text = first.data;
        while self.cur.kind == TokenKind::Dot {
            self.bump()?;
            let seg = self.expect(TokenKind::Name, "expected a name after '.'")?;
            text.push('.');
            text.push_str(&seg.data);
        }
        let sym = self.lexer_intern(&text);
        Ok((text, sym))
    }

    /// Parses `{ ... }` with the opening brace already consumed: pushes a
    /// fresh scope frame for this block's own locals, dispatches each
    /// statement, then computes `bytes` over exactly the `VarDecl`
    /// children recorded directly in this frame and pops it.
    pub(crate) fn parse_block(&mut self, is_fn: bool) -> ParseResult<StatementBlock> {
        self.scopes.push_scope();
        let mut children = Vec::new();

        while self.cur.kind != TokenKind::RBrace && self.cur.kind != TokenKind::EoF {
            if self.cur.kind == TokenKind::PPBegin {
                self.parse_preprocessor()?;
                continue;
            }
            children.push(self.parse_block_statement()?);
            self.unsafe_once = false;
        }
        self.expect(TokenKind::RBrace, "expected '}' closing block")?;

        let bytes = children
            .iter()
            .filter_map(|node| match node {
                Node::VarDecl(id) => {
                    let var = &self.program.vars[*id];
                    let multiplier = if var.is_arr {
                        var.arr.as_ref().map(|r| r.size()).unwrap_or(0)
                    } else {
                        1
                    };
                    Some(vire_lex::size_of_type(var.var_type) * multiplier)
                }
                _ => None,
            })
            .sum();

        self.scopes.pop_scope();
        Ok(StatementBlock { children, bytes, is_fn })
    }

    pub(crate) fn parse_block_statement(&mut self) -> ParseResult<Node> {
        match self.cur.keyword {
            Some(Keyword::If) => self.parse_if(),
            Some(Keyword::While) => self.parse_while(),
            Some(Keyword::Ret) => self.parse_ret(),
            Some(Keyword::Asm) => self.parse_asm(),
            Some(_) if self.is_decl_start() => {
                let id = self.parse_var_decl_stmt()?;
                Ok(Node::VarDecl(id))
            }
            _ if matches!(self.cur.kind, TokenKind::Name | TokenKind::OperInc | TokenKind::OperDec) => {
                self.parse_statement()
            }
            _ => Err(self.unexpected("unexpected token at start of statement")),
        }
    }

    /// `#!( unsafe )!`: the only recognized directive is `unsafe`, which
    /// arms the one-shot flag consumed by the next statement; any other
    /// directive text inside the section is silently discarded.
    fn parse_preprocessor(&mut self) -> ParseResult<()> {
        self.bump()?; // '#!('
        while self.cur.kind != TokenKind::PPEnd {
            if self.cur.kind == TokenKind::EoF {
                return Err(self.unexpected("unterminated preprocessor section"));
            }
            if self.cur.kind == TokenKind::Name && self.cur.keyword.is_none() && self.cur.data == "unsafe" {
                self.unsafe_once = true;
            }
            self.bump()?;
        }
        self.bump()?; // ')!'
        Ok(())
    }

    fn parse_if(&mut self) -> ParseResult<Node> {
        self.bump()?; // 'if'
        let condition = self.parse_expr()?;
        if condition.type_keyword(&self.program.vars) != Keyword::Bool {
            return Err(self.unexpected("expected a boolean expression in 'if' condition"));
        }
        self.expect(TokenKind::LBrace, "expected '{' after if condition")?;
        let then_b = self.parse_block(false)?;

        let else_b = if self.at_keyword(Keyword::Else) {
            self.bump()?;
            if self.at_keyword(Keyword::If) {
                let nested = self.parse_if()?;
                Some(StatementBlock { children: vec![nested], bytes: 0, is_fn: false })
            } else {
                self.expect(TokenKind::LBrace, "expected '{' after 'else'")?;
                Some(self.parse_block(false)?)
            }
        } else {
            None
        };

        Ok(Node::If(Box::new(IfStatement { condition, then_b, else_b })))
    }

    fn parse_while(&mut self) -> ParseResult<Node> {
        self.bump()?; // 'while'
        let condition = self.parse_expr()?;
        if condition.type_keyword(&self.program.vars) != Keyword::Bool {
            return Err(self.unexpected("expected a boolean expression in 'while' condition"));
        }
        self.expect(TokenKind::LBrace, "expected '{' after while condition")?;
        let body = self.parse_block(false)?;
        Ok(Node::While(Box::new(WhileLoop { condition, body })))
    }

    fn parse_ret(&mut self) -> ParseResult<Node> {
        let tok = self.bump()?; // 'ret'
        let operand = self.parse_expr()?;
        self.expect(TokenKind::Semi, "expected ';' after return statement")?;
        Ok(Node::UnOp(Box::new(UnOp { oper: tok, operand })))
    }

    /// `_asm { ... }` requires the one-shot `unsafe` flag and captures its
    /// body verbatim via [`vire_lex::Lexer::parse_raw_until`] rather than
    /// normal tokenization, so the assembly text cannot be mis-lexed as
    /// Vire source. The closing `}` is consumed directly off the lexer
    /// (bypassing `cur`), matching "the following token is the `}`,
    /// consumed by the driver".
    fn parse_asm(&mut self) -> ParseResult<Node> {
        if !self.unsafe_once {
            return Err(self.unexpected("inline assembly outside unsafe block"));
        }
        let tok = self.bump()?; // '_asm'
        if self.cur.kind != TokenKind::LBrace {
            return Err(self.unexpected("expected '{' after '_asm'"));
        }
        let raw = self.raw_asm_body()?;
        Ok(Node::UnOp(Box::new(UnOp { oper: tok, operand: Node::Str(crate::ast::StrLeaf { token: raw }) })))
    }

    fn raw_asm_body(&mut self) -> ParseResult<vire_lex::Token> {
        let raw = self.lexer.parse_raw_until('}')?;
        let rbrace = self.lexer.next()?;
        if rbrace.kind != TokenKind::RBrace {
            return Err(self.unexpected("expected '}' closing inline assembly"));
        }
        self.cur = self.lexer.next()?;
        Ok(raw)
    }

    fn parse_statement(&mut self) -> ParseResult<Node> {
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semi, "expected ';' after statement")?;
        Ok(expr)
    }
}

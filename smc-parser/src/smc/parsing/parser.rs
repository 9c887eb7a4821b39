//! The recursive descent parser

use super::freshness::FreshnessCheck;
use super::ParseOutcome;
use crate::smc::error::{Location, SyntaxError};
use crate::smc::lexing::Tokenizer;
use crate::smc::model::{
    Action, Argument, EndState, Fsm, Guard, Map, Parameter, Signature, StateId, Transition,
};
use crate::smc::token::{Keyword, Operator, Spanned, Token};

pub struct Parser<'s> {
    tokenizer: Tokenizer<'s>,
    peeked: Option<Spanned>,
    fsm: Fsm,
}

impl<'s> Parser<'s> {
    pub fn new(tokenizer: Tokenizer<'s>) -> Self {
        let fsm = Fsm {
            source_path: tokenizer.path().map(|path| path.to_path_buf()),
            ..Fsm::default()
        };
        Self {
            tokenizer,
            peeked: None,
            fsm,
        }
    }

    /// Parse the whole file, consulting `freshness` before the map body.
    pub fn parse(mut self, freshness: &dyn FreshnessCheck) -> Result<ParseOutcome, SyntaxError> {
        let map_token = self.parse_header()?;
        if freshness.is_up_to_date(&self.fsm) {
            tracing::info!("generated output is up to date, stopping before the map");
            return Ok(ParseOutcome::UpToDate);
        }
        self.finish(map_token).map(ParseOutcome::Model)
    }

    /// Parse the whole file unconditionally.
    pub fn parse_model(mut self) -> Result<Fsm, SyntaxError> {
        let map_token = self.parse_header()?;
        self.finish(map_token)
    }

    fn finish(mut self, map_token: Spanned) -> Result<Fsm, SyntaxError> {
        let map = self.parse_map(&map_token)?;
        self.fsm.maps.push(map);

        if let Some(extra) = self.advance()? {
            return Err(SyntaxError {
                found: Some(extra.token.to_string()),
                ..SyntaxError::new("additional tokens after end of map", self.location(&extra))
            });
        }

        let metadata = self.tokenizer.metadata();
        self.fsm.attributes = metadata.attributes().to_vec();
        self.fsm.package_comment = metadata.package().map(str::to_string);
        self.fsm.library_comment = metadata.library().map(str::to_string);
        Ok(self.fsm)
    }

    // Cursor

    pub(super) fn peek(&mut self) -> Result<Option<&Spanned>, SyntaxError> {
        if self.peeked.is_none() {
            self.peeked = self.tokenizer.next().transpose()?;
        }
        Ok(self.peeked.as_ref())
    }

    pub(super) fn advance(&mut self) -> Result<Option<Spanned>, SyntaxError> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.tokenizer.next().transpose(),
        }
    }

    /// Next token, or an error naming `expected` at end of input.
    pub(super) fn expect_token(&mut self, expected: &str) -> Result<Spanned, SyntaxError> {
        match self.advance()? {
            Some(token) => Ok(token),
            None => Err(SyntaxError::unexpected(
                expected,
                "end of input",
                self.tokenizer.end_location(),
            )),
        }
    }

    pub(super) fn expect_operator(&mut self, op: Operator) -> Result<Spanned, SyntaxError> {
        let expected = format!("'{}'", op);
        let token = self.expect_token(&expected)?;
        if token.token.is_operator(op) {
            Ok(token)
        } else {
            Err(self.unexpected(&token, &expected))
        }
    }

    pub(super) fn expect_identifier(&mut self, expected: &str) -> Result<(String, usize), SyntaxError> {
        let token = self.expect_token(expected)?;
        match token.token {
            Token::Identifier(name) => Ok((name, token.line)),
            _ => Err(self.unexpected(&token, expected)),
        }
    }

    pub(super) fn at_operator(&mut self, op: Operator) -> Result<bool, SyntaxError> {
        Ok(matches!(self.peek()?, Some(token) if token.token.is_operator(op)))
    }

    pub(super) fn eat_operator(&mut self, op: Operator) -> Result<bool, SyntaxError> {
        if self.at_operator(op)? {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(super) fn location(&self, token: &Spanned) -> Location {
        Location::new(self.tokenizer.path().map(|path| path.to_path_buf()), token.line)
    }

    pub(super) fn unexpected(&self, token: &Spanned, expected: &str) -> SyntaxError {
        SyntaxError::unexpected(expected, token.token.to_string(), self.location(token))
    }

    fn source_slice(&self, start: usize, end: usize) -> String {
        self.tokenizer.source()[start..end].trim().to_string()
    }

    // Header

    /// Parse directives up to and including `%map`, returning the `%map` token.
    fn parse_header(&mut self) -> Result<Spanned, SyntaxError> {
        loop {
            let token = self.expect_token("directive '%map'")?;
            if token.token.is_keyword(Keyword::Map) {
                return Ok(token);
            }
            match &token.token {
                Token::Keyword(keyword) => self.parse_directive(*keyword, &token)?,
                Token::RawCode(body) => self.fsm.raw_code.push(body.clone()),
                _ => return Err(self.unexpected(&token, "a directive")),
            }
        }
    }

    fn parse_directive(&mut self, keyword: Keyword, token: &Spanned) -> Result<(), SyntaxError> {
        tracing::trace!(directive = %keyword, line = token.line, "directive");
        match keyword {
            Keyword::Start => {
                let (first, _) = self.expect_identifier("start state")?;
                let start = if self.eat_operator(Operator::DoubleColon)? {
                    let (state, _) = self.expect_identifier("start state name")?;
                    format!("{}::{}", first, state)
                } else {
                    first
                };
                self.fsm.start = Some(start);
            }
            Keyword::Class => {
                self.fsm.documentation = self.tokenizer.take_documentation();
                let (name, _) = self.expect_identifier("class name")?;
                self.fsm.class_name = Some(name);
            }
            Keyword::FsmFile => {
                let (name, _) = self.expect_identifier("fsm file name")?;
                self.fsm.fsmfile = Some(name);
            }
            Keyword::FsmClass => {
                let (name, _) = self.expect_identifier("fsm class name")?;
                self.fsm.fsmclass = Some(name);
            }
            Keyword::Header => {
                let header = self.raw_until_directive(token, "header file")?;
                self.fsm.header = Some(unquote(&header).to_string());
            }
            Keyword::Declare => {
                let declare = self.raw_until_directive(token, "declaration")?;
                self.fsm.declares.push(declare);
            }
            Keyword::Include => loop {
                let include = self.parse_include()?;
                self.fsm.includes.push(include);
                if !self.eat_operator(Operator::Comma)? {
                    break;
                }
            },
            Keyword::Package => loop {
                let (name, _) = self.expect_identifier("package name")?;
                self.fsm.packages.push(name);
                if !self.eat_operator(Operator::DoubleColon)? {
                    break;
                }
            },
            Keyword::Import => {
                let (name, _) = self.expect_identifier("import name")?;
                self.fsm.imports.push(name);
            }
            Keyword::Access => {
                let (name, _) = self.expect_identifier("access level")?;
                self.fsm.access = Some(name);
            }
            Keyword::Return => {
                let (name, _) = self.expect_identifier("return type")?;
                self.fsm.return_type = Some(name);
            }
            Keyword::Map => {
                return Err(SyntaxError::new("unexpected directive '%map'", self.location(token)));
            }
        }
        Ok(())
    }

    fn parse_include(&mut self) -> Result<String, SyntaxError> {
        let token = self.expect_token("include file")?;
        match &token.token {
            Token::String(text) => Ok(unquote(text).to_string()),
            Token::Identifier(stem) => {
                self.expect_operator(Operator::Period)?;
                let (extension, _) = self.expect_identifier("include file extension")?;
                Ok(format!("{}.{}", stem, extension))
            }
            _ => Err(self.unexpected(&token, "include file")),
        }
    }

    /// Source text of every token up to the next directive or raw code block.
    fn raw_until_directive(&mut self, directive: &Spanned, what: &str) -> Result<String, SyntaxError> {
        let mut range: Option<(usize, usize)> = None;
        loop {
            let next = match self.peek()? {
                Some(token) if !matches!(token.token, Token::Keyword(_) | Token::RawCode(_)) => {
                    token.span.clone()
                }
                _ => break,
            };
            self.advance()?;
            let start = range.map_or(next.start, |(start, _)| start);
            range = Some((start, next.end));
        }

        match range {
            Some((start, end)) => Ok(self.source_slice(start, end)),
            None => Err(SyntaxError {
                expected: Some(what.to_string()),
                ..SyntaxError::new(
                    format!("{} needs a value", directive.token.text()),
                    self.location(directive),
                )
            }),
        }
    }

    // Map

    fn parse_map(&mut self, map_token: &Spanned) -> Result<Map, SyntaxError> {
        let (name, line) = self.expect_identifier("map name")?;
        let opener = self.expect_token("'{' or '%%'")?;
        let closer = match opener.token {
            Token::Operator(Operator::OpenBrace) => Operator::CloseBrace,
            Token::Operator(Operator::MapDelimiter) => Operator::MapDelimiter,
            _ => return Err(self.unexpected(&opener, "'{' or '%%'")),
        };

        tracing::debug!(map = %name, line, "parsing map");
        let mut map = Map::new(name, map_token.line);
        let expected = format!("state name or '{}'", closer);

        let close_line = loop {
            let token = self.expect_token(&expected)?;
            if token.token.is_operator(closer) {
                break token.line;
            }
            match token.token {
                Token::Identifier(ref state) => {
                    let state = state.clone();
                    self.parse_state(&mut map, &state, token.line)?;
                }
                _ => return Err(self.unexpected(&token, &expected)),
            }
        };

        map.ensure_default_state(close_line);
        for state in map.undeclared_states() {
            tracing::warn!(
                map = %map.name,
                state = %state.name,
                line = state.line,
                "state is a transition target but is never declared"
            );
        }
        Ok(map)
    }

    fn parse_state(&mut self, map: &mut Map, name: &str, line: usize) -> Result<(), SyntaxError> {
        let documentation = self.tokenizer.take_documentation();
        let id = map.declare(name, line);
        if map[id].documentation.is_none() {
            map[id].documentation = documentation;
        }

        loop {
            let hook = match self.peek()? {
                Some(Spanned {
                    token: Token::Identifier(word),
                    ..
                }) if word == "Entry" || word == "Exit" => word.clone(),
                _ => break,
            };
            self.advance()?;
            let actions = self.parse_action_block()?;
            let slot = if hook == "Entry" {
                &mut map[id].entry
            } else {
                &mut map[id].exit
            };
            slot.get_or_insert_with(Vec::new).extend(actions);
        }

        self.expect_operator(Operator::OpenBrace)?;
        loop {
            let token = self.expect_token("transition name or '}'")?;
            match token.token {
                Token::Operator(Operator::CloseBrace) => return Ok(()),
                Token::Identifier(ref transition) => {
                    let transition = transition.clone();
                    self.parse_transition(map, id, transition, token.line)?;
                }
                _ => return Err(self.unexpected(&token, "transition name or '}'")),
            }
        }
    }

    fn parse_transition(
        &mut self,
        map: &mut Map,
        state: StateId,
        name: String,
        line: usize,
    ) -> Result<(), SyntaxError> {
        let documentation = self.tokenizer.take_documentation();
        let parameters = if self.eat_operator(Operator::OpenParen)? {
            self.parse_parameters()?
        } else {
            Vec::new()
        };
        let condition = if self.eat_operator(Operator::OpenBracket)? {
            let condition = self.parse_condition()?;
            self.expect_operator(Operator::CloseBracket)?;
            Some(condition)
        } else {
            None
        };
        let end = self.parse_end_state(map)?;
        let actions = self.parse_action_block()?;

        let signature = Signature::new(name, parameters);
        let guard = Guard {
            condition,
            end,
            actions,
            line,
        };

        match map[state].find_transition(&signature) {
            Some(index) => {
                let state_name = map[state].name.clone();
                let transition = &mut map[state].transitions[index];
                if transition.fallback_guard().is_some() {
                    tracing::warn!(
                        state = %state_name,
                        transition = %transition.signature,
                        line,
                        "guard follows an unconditional guard; conditional guards are tried first"
                    );
                }
                transition.guards.push(guard);
            }
            None => {
                tracing::debug!(state = %map[state].name, transition = %signature, line, "created transition");
                map.register_signature(&signature);
                let mut transition = Transition::new(signature, line);
                transition.documentation = documentation;
                transition.guards.push(guard);
                map[state].transitions.push(transition);
            }
        }
        Ok(())
    }

    /// Parameters after the opening parenthesis, closing parenthesis included.
    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, SyntaxError> {
        let mut parameters = Vec::new();
        let first = self.expect_token("parameter name or ')'")?;
        let mut name = match first.token {
            Token::Operator(Operator::CloseParen) => return Ok(parameters),
            Token::Identifier(ref name) => name.clone(),
            _ => return Err(self.unexpected(&first, "parameter name or ')'")),
        };

        loop {
            self.expect_operator(Operator::Colon)?;
            let (type_name, closed) = self.parse_parameter_type()?;
            parameters.push(Parameter::new(name, type_name));
            if closed {
                return Ok(parameters);
            }
            name = self.expect_identifier("parameter name")?.0;
        }
    }

    /// Type text up to a top level `,` or `)`. Returns true when `)` ended it.
    ///
    /// Words are joined with single spaces; punctuation is glued on, giving `const char*`
    /// and `std::vector<int>`.
    fn parse_parameter_type(&mut self) -> Result<(String, bool), SyntaxError> {
        let mut text = String::new();
        let mut angles = 0usize;
        let mut parens = 0usize;
        let mut previous_word = false;

        loop {
            let token = self.expect_token("parameter type")?;
            if let Token::Operator(op) = token.token {
                let top_level = angles == 0 && parens == 0;
                match op {
                    Operator::Comma | Operator::CloseParen if top_level => {
                        if text.is_empty() {
                            return Err(self.unexpected(&token, "parameter type"));
                        }
                        return Ok((text, op == Operator::CloseParen));
                    }
                    Operator::Less => angles += 1,
                    Operator::Greater => angles = angles.saturating_sub(1),
                    Operator::ShiftRight => angles = angles.saturating_sub(2),
                    Operator::OpenParen => parens += 1,
                    Operator::CloseParen => parens = parens.saturating_sub(1),
                    Operator::OpenBrace | Operator::CloseBrace | Operator::Semicolon => {
                        return Err(self.unexpected(&token, "parameter type or ')'"));
                    }
                    _ => {}
                }
            } else if matches!(token.token, Token::Keyword(_) | Token::RawCode(_)) {
                return Err(self.unexpected(&token, "parameter type"));
            }

            let word = token.token.is_word();
            if word && previous_word {
                text.push(' ');
            }
            text.push_str(token.token.text());
            previous_word = word;
        }
    }

    fn parse_end_state(&mut self, map: &mut Map) -> Result<EndState, SyntaxError> {
        let token = self.expect_token("end state")?;
        let Token::Identifier(ref name) = token.token else {
            return Err(self.unexpected(&token, "end state"));
        };

        if name == "nil" {
            return Ok(EndState::Nil);
        }
        if (name == "push" || name == "pop") && self.at_operator(Operator::OpenParen)? {
            return Err(SyntaxError::new(
                "push/pop transitions are not supported",
                self.location(&token),
            ));
        }

        let state = if self.eat_operator(Operator::DoubleColon)? {
            let (state, _) = self.expect_identifier("state name")?;
            if *name != map.name {
                return Err(SyntaxError::new(
                    format!(
                        "end state '{}::{}' names another map; only '{}' is defined",
                        name, state, map.name
                    ),
                    self.location(&token),
                ));
            }
            state
        } else {
            name.clone()
        };

        Ok(EndState::State(map.intern(&state, token.line)))
    }

    // Actions

    fn parse_action_block(&mut self) -> Result<Vec<Action>, SyntaxError> {
        self.expect_operator(Operator::OpenBrace)?;
        let mut actions = Vec::new();
        loop {
            let token = self.expect_token("action or '}'")?;
            match token.token {
                Token::Operator(Operator::CloseBrace) => return Ok(actions),
                Token::Identifier(ref name) => {
                    let name = name.clone();
                    self.expect_operator(Operator::OpenParen)?;
                    let arguments = self.parse_arguments()?;
                    self.expect_operator(Operator::Semicolon)?;
                    actions.push(Action::new(name, arguments, token.line));
                }
                _ => return Err(self.unexpected(&token, "action or '}'")),
            }
        }
    }

    /// Raw-text arguments after the opening parenthesis, closing parenthesis included.
    ///
    /// Commas only separate arguments at the top level, so `f(g(a, b), c)` has two.
    pub(super) fn parse_arguments(&mut self) -> Result<Vec<Argument>, SyntaxError> {
        let mut arguments = Vec::new();
        let mut current: Option<(usize, usize)> = None;
        let mut depth = 0usize;

        loop {
            let token = self.expect_token("')'")?;
            match token.token {
                Token::Operator(Operator::CloseParen) if depth == 0 => {
                    match current {
                        Some((start, end)) => arguments.push(Argument::new(self.source_slice(start, end))),
                        None if !arguments.is_empty() => {
                            return Err(self.unexpected(&token, "argument"));
                        }
                        None => {}
                    }
                    return Ok(arguments);
                }
                Token::Operator(Operator::Comma) if depth == 0 => match current.take() {
                    Some((start, end)) => {
                        arguments.push(Argument::new(self.source_slice(start, end)));
                        continue;
                    }
                    None => return Err(self.unexpected(&token, "argument")),
                },
                Token::Operator(Operator::OpenParen) => depth += 1,
                Token::Operator(Operator::CloseParen) => depth -= 1,
                Token::Operator(Operator::OpenBrace | Operator::CloseBrace | Operator::Semicolon)
                | Token::Keyword(_)
                | Token::RawCode(_) => return Err(self.unexpected(&token, "')'")),
                _ => {}
            }
            let start = current.map_or(token.span.start, |(start, _)| start);
            current = Some((start, token.span.end));
        }
    }
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}

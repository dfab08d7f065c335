use super::error::{ErrorKind, SyntaxError};
use super::lang::{Bounds, Lexeme, Text, Token};
use super::symbols::collect_symbols;
use log::{debug, trace};

/// Longest first, so `<--` is never read as `<-` followed by `-`.
const ASSIGN_OPS: [&str; 3] = ["<--", "<-", "←"];

type Parsed = Result<Lexeme, ErrorKind>;

struct Rule {
	name: &'static str,
	applies: fn(&str) -> bool,
	parse: fn(&str) -> Parsed,
}

/// Checked top to bottom, first applicable rule decides the line.
const RULES: [Rule; 16] = [
	Rule {
		name: "FOR",
		applies: |s| s.starts_with("FOR"),
		parse: parse_for,
	},
	Rule {
		name: "NEXT",
		applies: |s| keyword(s, "NEXT").is_some(),
		parse: parse_next,
	},
	Rule {
		name: "WHILE",
		applies: |s| operand(s, "WHILE").is_some(),
		parse: |s| {
			operand(s, "WHILE")
				.map(|condition| Lexeme::WhileStart { condition })
				.ok_or(ErrorKind::UnknownStatement)
		},
	},
	Rule {
		name: "ENDWHILE",
		applies: |s| s == "ENDWHILE",
		parse: |_| Ok(Lexeme::WhileEnd),
	},
	Rule {
		name: "REPEAT",
		applies: |s| s == "REPEAT",
		parse: |_| Ok(Lexeme::RepeatStart),
	},
	Rule {
		name: "UNTIL",
		applies: |s| operand(s, "UNTIL").is_some(),
		parse: |s| {
			operand(s, "UNTIL")
				.map(|condition| Lexeme::RepeatEnd { condition })
				.ok_or(ErrorKind::UnknownStatement)
		},
	},
	Rule {
		name: "DECLARE ARRAY",
		applies: |s| keyword(s, "DECLARE").map_or(false, |rest| has_word(rest, "ARRAY")),
		parse: parse_declare_array,
	},
	Rule {
		name: "DECLARE",
		applies: |s| keyword(s, "DECLARE").is_some(),
		parse: parse_declare,
	},
	Rule {
		name: "assignment",
		applies: |s| split_assignment(s).is_some(),
		parse: |s| match split_assignment(s) {
			Some((left, right)) => Ok(Lexeme::Assign {
				left: left.to_owned(),
				right: right.to_owned(),
			}),
			None => Err(ErrorKind::UnknownStatement),
		},
	},
	Rule {
		name: "OUTPUT",
		applies: |s| operand(s, "OUTPUT").is_some(),
		parse: |s| {
			operand(s, "OUTPUT")
				.map(|value| Lexeme::Output { value })
				.ok_or(ErrorKind::UnknownStatement)
		},
	},
	Rule {
		name: "INPUT",
		applies: |s| operand(s, "INPUT").is_some(),
		parse: |s| {
			operand(s, "INPUT")
				.map(|variable| Lexeme::Input { variable })
				.ok_or(ErrorKind::UnknownStatement)
		},
	},
	Rule {
		name: "FUNCTION",
		applies: |s| keyword(s, "FUNCTION").is_some(),
		parse: parse_function,
	},
	Rule {
		name: "ENDFUNCTION",
		applies: |s| s == "ENDFUNCTION",
		parse: |_| Ok(Lexeme::FunctionEnd),
	},
	Rule {
		name: "PROCEDURE",
		applies: |s| keyword(s, "PROCEDURE").is_some(),
		parse: parse_procedure,
	},
	Rule {
		name: "ENDPROCEDURE",
		applies: |s| s == "ENDPROCEDURE",
		parse: |_| Ok(Lexeme::ProcedureEnd),
	},
	Rule {
		name: "RETURN",
		applies: |s| operand(s, "RETURN").is_some(),
		parse: |s| {
			operand(s, "RETURN")
				.map(|value| Lexeme::Return { value })
				.ok_or(ErrorKind::UnknownStatement)
		},
	},
];

pub struct Lexer {
	tokens: Vec<Token>,
}

impl Lexer {
	/// Classifies every statement line of `text`, stopping at the first line
	/// that fits no statement shape.
	pub fn tokenize(text: &str) -> Result<Vec<Token>, SyntaxError> {
		let mut lexer = Self { tokens: Vec::new() };
		for (line, raw, statement) in lines(text) {
			lexer.next(line, raw, statement)?;
		}
		debug!("tokenized {} statements", lexer.tokens.len());
		Ok(lexer.tokens)
	}

	pub fn parse(text: &str) -> Result<Text, SyntaxError> {
		let tokens = Self::tokenize(text)?;
		let symbols = collect_symbols(&tokens);
		Ok(Text::new(tokens, symbols))
	}

	fn next(&mut self, line: usize, raw: &str, statement: &str) -> Result<(), SyntaxError> {
		let parsed = match RULES.iter().find(|rule| (rule.applies)(statement)) {
			Some(rule) => {
				trace!("line {}: {}", line, rule.name);
				(rule.parse)(statement)
			}
			None => Err(ErrorKind::UnknownStatement),
		};
		match parsed {
			Ok(lexeme) => {
				self.tokens.push(Token::new(lexeme, line));
				Ok(())
			}
			Err(kind) => {
				debug!("line {}: {}", line, kind);
				Err(SyntaxError::new(line, raw, kind))
			}
		}
	}
}

/// Statement lines of `text` as `(line number, statement)`, with `//` comments
/// cut off and blank lines skipped. A `//` inside quotes still starts a comment.
pub fn preprocess(text: &str) -> impl Iterator<Item = (usize, &str)> {
	lines(text).map(|(line, _, statement)| (line, statement))
}

fn lines(text: &str) -> impl Iterator<Item = (usize, &str, &str)> {
	text.split('\n').enumerate().filter_map(|(index, raw)| {
		let code = match raw.find("//") {
			Some(end) => &raw[..end],
			None => raw,
		};
		let statement = code.trim();
		if statement.is_empty() {
			None
		} else {
			Some((index + 1, raw.trim_end_matches('\r'), statement))
		}
	})
}

fn parse_for(s: &str) -> Parsed {
	let rest = s
		.strip_prefix("FOR")
		.filter(|rest| rest.starts_with(char::is_whitespace))
		.ok_or(ErrorKind::MalformedFor)?;
	let (op, len) = find_assignment_op(rest).ok_or(ErrorKind::MalformedFor)?;
	let variable = rest[..op].trim();
	let range = &rest[op + len..];
	let to = find_word(range, "TO").ok_or(ErrorKind::MalformedFor)?;
	let from = range[..to].trim();
	let upper = range[to + "TO".len()..].trim();
	if !is_ident(variable) || from.is_empty() || upper.is_empty() {
		return Err(ErrorKind::MalformedFor);
	}
	Ok(Lexeme::ForLoopStart {
		variable: variable.to_owned(),
		from: from.to_owned(),
		to: upper.to_owned(),
	})
}

fn parse_next(s: &str) -> Parsed {
	match keyword(s, "NEXT") {
		Some(variable) if is_ident(variable) => Ok(Lexeme::ForLoopEnd {
			variable: variable.to_owned(),
		}),
		_ => Err(ErrorKind::MalformedNext),
	}
}

fn parse_declare_array(s: &str) -> Parsed {
	let rest = keyword(s, "DECLARE").ok_or(ErrorKind::MalformedDeclare)?;
	let (name, ty) = rest
		.split_once(':')
		.ok_or(ErrorKind::MalformedArray("expected `:` after the name"))?;
	let name = name.trim();
	if !is_ident(name) {
		return Err(ErrorKind::MalformedArray("invalid array name"));
	}
	let ty = keyword(ty.trim(), "ARRAY")
		.ok_or(ErrorKind::MalformedArray("expected ARRAY after `:`"))?;
	let (dims, element) = ty
		.strip_prefix('[')
		.and_then(|ty| ty.split_once(']'))
		.ok_or(ErrorKind::MalformedArray("expected `[lower:upper]`"))?;
	let element = keyword(element.trim(), "OF")
		.filter(|element| is_ident(element))
		.ok_or(ErrorKind::MalformedArray("expected `OF <type>` after the bounds"))?;
	let dimensions = dims
		.split(',')
		.map(parse_bounds)
		.collect::<Result<Vec<_>, _>>()?;
	Ok(Lexeme::DeclareArray {
		name: name.to_owned(),
		dimensions,
		element_type: element.to_owned(),
	})
}

fn parse_bounds(dim: &str) -> Result<Bounds, ErrorKind> {
	let (lower, upper) = dim
		.split_once(':')
		.ok_or(ErrorKind::MalformedArray("bounds must be `lower:upper`"))?;
	let bound = |text: &str| {
		text.trim()
			.parse::<i64>()
			.map_err(|_| ErrorKind::MalformedArray("bounds must be integers"))
	};
	Ok(Bounds {
		lower: bound(lower)?,
		upper: bound(upper)?,
	})
}

fn parse_declare(s: &str) -> Parsed {
	let (name, datatype) = keyword(s, "DECLARE")
		.and_then(|rest| rest.split_once(':'))
		.map(|(name, datatype)| (name.trim(), datatype.trim()))
		.ok_or(ErrorKind::MalformedDeclare)?;
	if !is_ident(name) || !is_ident(datatype) {
		return Err(ErrorKind::MalformedDeclare);
	}
	Ok(Lexeme::Declare {
		name: name.to_owned(),
		datatype: datatype.to_owned(),
	})
}

fn parse_function(s: &str) -> Parsed {
	let rest = keyword(s, "FUNCTION").ok_or(ErrorKind::MalformedFunction)?;
	let returns = find_word(rest, "RETURNS").ok_or(ErrorKind::MalformedFunction)?;
	let return_type = rest[returns + "RETURNS".len()..].trim();
	if !is_ident(return_type) {
		return Err(ErrorKind::MalformedFunction);
	}
	let (name, params) = header(&rest[..returns]).ok_or(ErrorKind::MalformedFunction)?;
	Ok(Lexeme::FunctionStart {
		name: name.to_owned(),
		params: params.to_owned(),
		return_type: return_type.to_owned(),
	})
}

fn parse_procedure(s: &str) -> Parsed {
	let (name, params) = keyword(s, "PROCEDURE")
		.and_then(header)
		.ok_or(ErrorKind::MalformedProcedure)?;
	Ok(Lexeme::ProcedureStart {
		name: name.to_owned(),
		params: params.to_owned(),
	})
}

/// Splits `name(params)` into its trimmed parts.
fn header(s: &str) -> Option<(&str, &str)> {
	let (name, params) = s.trim().strip_suffix(')')?.split_once('(')?;
	let name = name.trim();
	is_ident(name).then(|| (name, params.trim()))
}

/// Text after `kw`. A bare keyword has no operand and is no statement.
fn operand(s: &str, kw: &str) -> Option<String> {
	keyword(s, kw)
		.filter(|rest| !rest.is_empty())
		.map(str::to_owned)
}

/// `x ← expr`: exactly one operator with text on both sides.
fn split_assignment(s: &str) -> Option<(&str, &str)> {
	let (op, len) = find_assignment_op(s)?;
	let left = s[..op].trim();
	let right = &s[op + len..];
	if find_assignment_op(right).is_some() {
		return None;
	}
	let right = right.trim();
	(!left.is_empty() && !right.is_empty()).then_some((left, right))
}

fn find_assignment_op(s: &str) -> Option<(usize, usize)> {
	s.char_indices().find_map(|(index, _)| {
		ASSIGN_OPS
			.iter()
			.find(|op| s[index..].starts_with(*op))
			.map(|op| (index, op.len()))
	})
}

/// Remainder after a leading keyword, trimmed. The keyword must not run on
/// into an identifier.
fn keyword<'s>(s: &'s str, kw: &str) -> Option<&'s str> {
	let rest = s.strip_prefix(kw)?;
	match rest.chars().next() {
		Some(c) if is_ident_char(c) => None,
		_ => Some(rest.trim()),
	}
}

/// Last standalone occurrence of `word`, so a trailing `TO <expr>` or
/// `RETURNS <type>` wins over an earlier one.
fn find_word(s: &str, word: &str) -> Option<usize> {
	s.rmatch_indices(word).map(|(index, _)| index).find(|&index| {
		let before = s[..index].chars().next_back();
		let after = s[index + word.len()..].chars().next();
		!before.map_or(false, is_ident_char) && !after.map_or(false, is_ident_char)
	})
}

fn has_word(s: &str, word: &str) -> bool {
	s.split(|c: char| !is_ident_char(c)).any(|w| w == word)
}

fn is_ident_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

fn is_ident(s: &str) -> bool {
	let mut chars = s.chars();
	match chars.next() {
		Some(c) if c.is_alphabetic() || c == '_' => chars.all(is_ident_char),
		_ => false,
	}
}

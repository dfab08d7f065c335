use serde::Serialize;
use std::fmt;

/// Tokens of a whole source together with the names they introduce.
#[derive(Debug, Serialize)]
pub struct Text {
	pub tokens: Vec<Token>,
	pub symbols: Symbols,
}

/// One classified source line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
	#[serde(flatten)]
	lexeme: Lexeme,
	line: usize,
}

/// Statement shapes. Expression and parameter fields hold the trimmed source
/// text as written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lexeme {
	ForLoopStart {
		variable: String,
		from: String,
		to: String,
	},
	ForLoopEnd {
		variable: String,
	},
	WhileStart {
		condition: String,
	},
	WhileEnd,
	RepeatStart,
	RepeatEnd {
		condition: String,
	},
	DeclareArray {
		name: String,
		dimensions: Vec<Bounds>,
		#[serde(rename = "elementType")]
		element_type: String,
	},
	Declare {
		name: String,
		datatype: String,
	},
	Assign {
		left: String,
		right: String,
	},
	Output {
		value: String,
	},
	Input {
		variable: String,
	},
	FunctionStart {
		name: String,
		params: String,
		#[serde(rename = "returnType")]
		return_type: String,
	},
	FunctionEnd,
	ProcedureStart {
		name: String,
		params: String,
	},
	ProcedureEnd,
	Return {
		value: String,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Bounds {
	pub lower: i64,
	pub upper: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
	ForLoopStart,
	ForLoopEnd,
	WhileStart,
	WhileEnd,
	RepeatStart,
	RepeatEnd,
	DeclareArray,
	Declare,
	Assign,
	Output,
	Input,
	FunctionStart,
	FunctionEnd,
	ProcedureStart,
	ProcedureEnd,
	Return,
}

/// Names introduced by a token stream, grouped by role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Symbols {
	pub declared: SymbolSet,
	pub funcs: SymbolSet,
	pub procs: SymbolSet,
}

/// Set of distinct names. Equality ignores order.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct SymbolSet {
	names: Vec<String>,
}

impl Text {
	pub fn new(tokens: Vec<Token>, symbols: Symbols) -> Self {
		Self { tokens, symbols }
	}
}

impl Token {
	pub fn new(lexeme: Lexeme, line: usize) -> Self {
		Self { lexeme, line }
	}

	/// 1-based number of the source line the token came from.
	pub fn line(&self) -> usize {
		self.line
	}

	pub fn lexeme(&self) -> &Lexeme {
		&self.lexeme
	}

	pub fn kind(&self) -> TokenKind {
		self.lexeme.kind()
	}

	/// Name introduced by a declaration, function or procedure header.
	pub fn name(&self) -> Option<&str> {
		match &self.lexeme {
			Lexeme::DeclareArray { name, .. }
			| Lexeme::Declare { name, .. }
			| Lexeme::FunctionStart { name, .. }
			| Lexeme::ProcedureStart { name, .. } => Some(name),
			_ => None,
		}
	}
}

impl Lexeme {
	pub fn kind(&self) -> TokenKind {
		match self {
			Lexeme::ForLoopStart { .. } => TokenKind::ForLoopStart,
			Lexeme::ForLoopEnd { .. } => TokenKind::ForLoopEnd,
			Lexeme::WhileStart { .. } => TokenKind::WhileStart,
			Lexeme::WhileEnd => TokenKind::WhileEnd,
			Lexeme::RepeatStart => TokenKind::RepeatStart,
			Lexeme::RepeatEnd { .. } => TokenKind::RepeatEnd,
			Lexeme::DeclareArray { .. } => TokenKind::DeclareArray,
			Lexeme::Declare { .. } => TokenKind::Declare,
			Lexeme::Assign { .. } => TokenKind::Assign,
			Lexeme::Output { .. } => TokenKind::Output,
			Lexeme::Input { .. } => TokenKind::Input,
			Lexeme::FunctionStart { .. } => TokenKind::FunctionStart,
			Lexeme::FunctionEnd => TokenKind::FunctionEnd,
			Lexeme::ProcedureStart { .. } => TokenKind::ProcedureStart,
			Lexeme::ProcedureEnd => TokenKind::ProcedureEnd,
			Lexeme::Return { .. } => TokenKind::Return,
		}
	}
}

impl TokenKind {
	pub fn as_str(self) -> &'static str {
		match self {
			TokenKind::ForLoopStart => "FOR_LOOP_START",
			TokenKind::ForLoopEnd => "FOR_LOOP_END",
			TokenKind::WhileStart => "WHILE_START",
			TokenKind::WhileEnd => "WHILE_END",
			TokenKind::RepeatStart => "REPEAT_START",
			TokenKind::RepeatEnd => "REPEAT_END",
			TokenKind::DeclareArray => "DECLARE_ARRAY",
			TokenKind::Declare => "DECLARE",
			TokenKind::Assign => "ASSIGN",
			TokenKind::Output => "OUTPUT",
			TokenKind::Input => "INPUT",
			TokenKind::FunctionStart => "FUNCTION_START",
			TokenKind::FunctionEnd => "FUNCTION_END",
			TokenKind::ProcedureStart => "PROCEDURE_START",
			TokenKind::ProcedureEnd => "PROCEDURE_END",
			TokenKind::Return => "RETURN",
		}
	}
}

impl fmt::Display for TokenKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl SymbolSet {
	/// `names` must already be distinct.
	pub(crate) fn new(names: Vec<String>) -> Self {
		Self { names }
	}

	pub fn contains(&self, name: &str) -> bool {
		self.names.iter().any(|n| n == name)
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.names.iter().map(String::as_str)
	}
}

impl PartialEq for SymbolSet {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && other.iter().all(|name| self.contains(name))
	}
}

impl Eq for SymbolSet {}

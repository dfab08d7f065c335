use thiserror::Error;

/// First line that could not be classified. Tokenizing stops there.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("line {line}: {kind}: {raw_text}")]
pub struct SyntaxError {
	pub line: usize,
	/// The physical source line, comment and indentation included.
	pub raw_text: String,
	pub kind: ErrorKind,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
	#[error("malformed FOR, expected `FOR <name> ← <expr> TO <expr>`")]
	MalformedFor,
	#[error("malformed NEXT, expected `NEXT <name>`")]
	MalformedNext,
	#[error("malformed DECLARE, expected `DECLARE <name> : <type>`")]
	MalformedDeclare,
	#[error("malformed array declaration: {0}")]
	MalformedArray(&'static str),
	#[error("malformed FUNCTION, expected `FUNCTION <name>(<params>) RETURNS <type>`")]
	MalformedFunction,
	#[error("malformed PROCEDURE, expected `PROCEDURE <name>(<params>)`")]
	MalformedProcedure,
	#[error("unknown statement")]
	UnknownStatement,
}

impl SyntaxError {
	pub fn new(line: usize, raw_text: impl Into<String>, kind: ErrorKind) -> Self {
		Self {
			line,
			raw_text: raw_text.into(),
			kind,
		}
	}

	pub fn message(&self) -> String {
		self.kind.to_string()
	}
}

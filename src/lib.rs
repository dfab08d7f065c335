//! Line-oriented tokenizer for the teaching pseudocode shown in the course
//! code editor, plus the symbol pass that feeds its highlighter.

pub mod error;
pub mod lang;
pub mod lexer;
pub mod symbols;

pub use error::{ErrorKind, SyntaxError};
pub use lang::{Bounds, Lexeme, SymbolSet, Symbols, Text, Token, TokenKind};
pub use lexer::{preprocess, Lexer};
pub use symbols::collect_symbols;

/// One token per statement line, or the first line that fails to classify.
pub fn tokenize(text: &str) -> Result<Vec<Token>, SyntaxError> {
	Lexer::tokenize(text)
}

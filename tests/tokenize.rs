use pretty_assertions::assert_eq;
use pseudocode_lex::{collect_symbols, tokenize, ErrorKind, Lexeme, Lexer, Token, TokenKind};
use serde_json::json;

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
	tokens.iter().map(Token::kind).collect()
}

fn lines(tokens: &[Token]) -> Vec<usize> {
	tokens.iter().map(Token::line).collect()
}

#[test]
fn for_loop_scenario() {
	let tokens = tokenize("FOR i ← 1 TO 10\n  OUTPUT i\nNEXT i").unwrap();
	assert_eq!(
		tokens,
		vec![
			Token::new(
				Lexeme::ForLoopStart {
					variable: "i".to_owned(),
					from: "1".to_owned(),
					to: "10".to_owned(),
				},
				1,
			),
			Token::new(
				Lexeme::Output {
					value: "i".to_owned()
				},
				2,
			),
			Token::new(
				Lexeme::ForLoopEnd {
					variable: "i".to_owned()
				},
				3,
			),
		]
	);
}

#[test]
fn every_statement_kind() {
	let source = "\
DECLARE n : INTEGER
DECLARE marks : ARRAY[1:10] OF REAL
FUNCTION Square(x : INTEGER) RETURNS INTEGER
  RETURN x * x
ENDFUNCTION
PROCEDURE Report(total : REAL)
  OUTPUT \"Total \", total
ENDPROCEDURE
INPUT n
FOR i <- 1 TO n
  marks[i] <-- Square(i)
NEXT i
WHILE n > 0
  n ← n - 1
ENDWHILE
REPEAT
  INPUT n
UNTIL n = 0
";
	let tokens = tokenize(source).unwrap();
	assert_eq!(
		kinds(&tokens),
		vec![
			TokenKind::Declare,
			TokenKind::DeclareArray,
			TokenKind::FunctionStart,
			TokenKind::Return,
			TokenKind::FunctionEnd,
			TokenKind::ProcedureStart,
			TokenKind::Output,
			TokenKind::ProcedureEnd,
			TokenKind::Input,
			TokenKind::ForLoopStart,
			TokenKind::Assign,
			TokenKind::ForLoopEnd,
			TokenKind::WhileStart,
			TokenKind::Assign,
			TokenKind::WhileEnd,
			TokenKind::RepeatStart,
			TokenKind::Input,
			TokenKind::RepeatEnd,
		]
	);
	assert_eq!(lines(&tokens), (1..=18).collect::<Vec<_>>());
}

#[test]
fn trailing_comment_is_ignored() {
	assert_eq!(tokenize("X ← 1 // comment"), tokenize("X ← 1"));
}

#[test]
fn blank_lines_shift_line_numbers_only() {
	let dense = tokenize("x ← 1\nOUTPUT x").unwrap();
	let sparse = tokenize("\nx ← 1\n\n   \n// note\nOUTPUT x\n").unwrap();
	assert_eq!(kinds(&dense), kinds(&sparse));
	assert_eq!(lines(&dense), vec![1, 2]);
	assert_eq!(lines(&sparse), vec![2, 6]);
}

#[test]
fn tokenizing_twice_gives_equal_tokens() {
	let source = "DECLARE a : ARRAY[0:3, 0:3] OF BOOLEAN\na[0, 0] ← TRUE";
	assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
}

#[test]
fn array_declaration_is_never_scalar() {
	let tokens = tokenize("DECLARE arr : ARRAY[1:5] OF INTEGER").unwrap();
	assert_eq!(kinds(&tokens), vec![TokenKind::DeclareArray]);
}

#[test]
fn stops_at_first_bad_line() {
	let err = tokenize("OUTPUT 1\nIF x THEN\nDECLARE y INTEGER").unwrap_err();
	assert_eq!(err.line, 2);
	assert_eq!(err.raw_text, "IF x THEN");
	assert_eq!(err.kind, ErrorKind::UnknownStatement);
}

#[test]
fn missing_colon_fails_on_line_one() {
	let err = tokenize("DECLARE x INTEGER").unwrap_err();
	assert_eq!(err.line, 1);
	assert_eq!(err.raw_text, "DECLARE x INTEGER");
	assert_eq!(
		err.to_string(),
		format!("line 1: {}: DECLARE x INTEGER", err.message())
	);
}

#[test]
fn symbols_from_source() {
	let tokens = tokenize(
		"DECLARE x : INTEGER\nDECLARE x : INTEGER\nFUNCTION f(a) RETURNS INTEGER\nENDFUNCTION\nPROCEDURE p(b)\nENDPROCEDURE",
	)
	.unwrap();
	let symbols = collect_symbols(&tokens);
	assert_eq!(symbols.declared.len(), 1);
	assert!(symbols.declared.contains("x"));
	assert_eq!(symbols.funcs.iter().collect::<Vec<_>>(), vec!["f"]);
	assert_eq!(symbols.procs.iter().collect::<Vec<_>>(), vec!["p"]);
}

#[test]
fn text_serializes_for_the_editor() {
	let text = Lexer::parse("FUNCTION f(a) RETURNS INTEGER\n  RETURN a\nENDFUNCTION").unwrap();
	assert_eq!(
		serde_json::to_value(&text).unwrap(),
		json!({
			"tokens": [
				{"type": "FUNCTION_START", "name": "f", "params": "a", "returnType": "INTEGER", "line": 1},
				{"type": "RETURN", "value": "a", "line": 2},
				{"type": "FUNCTION_END", "line": 3},
			],
			"symbols": {"declared": [], "funcs": ["f"], "procs": []},
		})
	);
}

use super::lang::{Lexeme, SymbolSet, Symbols, Token};
use fsm::Symbols as Table;

/// Gathers declared variable, function and procedure names for highlighting.
pub fn collect_symbols(tokens: &[Token]) -> Symbols {
	let mut declared = Table::new();
	let mut funcs = Table::new();
	let mut procs = Table::new();
	for token in tokens {
		let table = match token.lexeme() {
			Lexeme::Declare { .. } | Lexeme::DeclareArray { .. } => &mut declared,
			Lexeme::FunctionStart { .. } => &mut funcs,
			Lexeme::ProcedureStart { .. } => &mut procs,
			_ => continue,
		};
		if let Some(name) = token.name() {
			table.get_or_create_id(name.to_owned());
		}
	}
	Symbols {
		declared: into_set(declared),
		funcs: into_set(funcs),
		procs: into_set(procs),
	}
}

fn into_set(table: Table<String>) -> SymbolSet {
	SymbolSet::new(table.into_table())
}

use clap::{Parser, ValueEnum};
use pseudocode_lex::{collect_symbols, Lexer, Symbols, Token};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::{fs, io, process};

#[derive(Parser)]
#[command(about = "Tokenize pseudocode one statement per line")]
struct Args {
	/// Source file, read from stdin when omitted
	file: Option<PathBuf>,
	#[arg(long, value_enum, default_value_t = Format::Debug)]
	format: Format,
	/// Also print declared variable, function and procedure names
	#[arg(long)]
	symbols: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
	Debug,
	Json,
}

#[derive(Debug, Serialize)]
struct Output {
	tokens: Vec<Token>,
	#[serde(skip_serializing_if = "Option::is_none")]
	symbols: Option<Symbols>,
}

fn main() {
	env_logger::init();
	let args = Args::parse();
	let program = match read_source(args.file.as_ref()) {
		Ok(program) => program,
		Err(err) => {
			eprintln!("Error: {}", err);
			process::exit(1);
		}
	};
	let tokens = match Lexer::tokenize(&program) {
		Ok(tokens) => tokens,
		Err(err) => {
			eprintln!("Syntax error: {}", err);
			process::exit(1);
		}
	};
	let symbols = args.symbols.then(|| collect_symbols(&tokens));
	let output = Output { tokens, symbols };
	match args.format {
		Format::Debug => println!("{:#?}", output),
		Format::Json => match serde_json::to_string_pretty(&output) {
			Ok(json) => println!("{}", json),
			Err(err) => {
				eprintln!("Error: {}", err);
				process::exit(1);
			}
		},
	}
}

fn read_source(file: Option<&PathBuf>) -> io::Result<String> {
	match file {
		Some(path) => fs::read_to_string(path),
		None => {
			let mut program = String::new();
			io::stdin().read_to_string(&mut program)?;
			Ok(program)
		}
	}
}

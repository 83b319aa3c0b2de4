use std::{env, io::{self, Write}, process::ExitCode};

use mathscript::{
    ast::printer::print_program,
    errors::errors::Status,
    format_status,
    lexer::{lexer::scan_into, token_list::TokenList},
    parser::{config::ParserConfig, parser::Parser},
    read_source,
};
use tracing_subscriber::EnvFilter;

/// Dumps the token kinds of each file given on the command line. With
/// `--ast` the files are parsed instead and the tree is printed back.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut print_ast = false;
    let mut paths = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--ast" {
            print_ast = true;
        } else {
            paths.push(arg);
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for path in &paths {
        let source = match read_source(path) {
            Ok(source) => source,
            Err(_) => {
                let _ = writeln!(out, "ERROR: cannot read file {}", path);
                return ExitCode::SUCCESS;
            }
        };

        let result = if print_ast {
            show_ast(&mut out, &source)
        } else {
            show_tokens(&mut out, &source)
        };

        match result {
            Ok(true) => {}
            Ok(false) => return ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("{}", error);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

/// Returns `Ok(false)` when the file did not scan.
fn show_tokens(out: &mut impl Write, source: &str) -> io::Result<bool> {
    let mut tokens = TokenList::new();

    if let Err(error) = scan_into(source, &mut tokens) {
        writeln!(out, "{}", format_status(&Status::from(error)))?;
        tokens.dump(out)?;
        return Ok(false);
    }

    tokens.dump(out)?;
    Ok(true)
}

/// Returns `Ok(false)` when the file did not parse.
fn show_ast(out: &mut impl Write, source: &str) -> io::Result<bool> {
    let mut parser = Parser::with_config(ParserConfig::from_env());
    let mut status = Status::default();

    match parser.parse_with_status(source, &mut status) {
        Some(program) => {
            write!(out, "{}", print_program(&program))?;
            Ok(true)
        }
        None => {
            writeln!(out, "{}", format_status(&status))?;
            display_error(out, &status, source)?;
            Ok(false)
        }
    }
}

/// Shows the offending source line with a marker under the error column:
///
/// ```text
///   2 | int a = #;
///     |         ^
/// ```
fn display_error(out: &mut impl Write, status: &Status, source: &str) -> io::Result<()> {
    let location = status.location();
    if location.is_unknown() {
        return Ok(());
    }

    let Some(line_text) = source.lines().nth(location.line()) else {
        return Ok(());
    };

    let line_str = (location.line() + 1).to_string();
    let padding = line_str.len() + 2;

    writeln!(out, "{:>padding$} {}", format!("{} |", line_str), line_text)?;
    writeln!(out, "{:>padding$} {:>width$}", "|", "^", width = location.offset() + 1)?;
    Ok(())
}

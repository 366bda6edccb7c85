//! `emberc`: scan and parse a single Ember source file.
//!
//! This is a front-end-only driver: there is no type checker, code
//! generator, or runtime here, just the scanner and parser, with
//! `ariadne`-rendered diagnostics on failure and an optional `--dump-ast`
//! dump of the resulting tree on success.

mod dump;

use std::path::PathBuf;
use std::process;

use ariadne::{Label, Report, ReportKind, Source};
use clap::Parser as ClapParser;

use ember_common::span::LineIndex;
use ember_lexer::LexerConfig;

#[derive(ClapParser)]
#[command(name = "emberc", version, about = "Scan and parse an Ember source file")]
struct Cli {
    /// Path to the Ember source file to parse
    file: PathBuf,

    /// Maximum depth of nested string interpolation holes
    #[arg(long = "max-interpolation-nesting", default_value_t = ember_lexer::MAX_INTERPOLATION_NESTING)]
    max_interpolation_nesting: u32,

    /// Print the parsed AST instead of just reporting success
    #[arg(long = "dump-ast")]
    dump_ast: bool,
}

fn main() {
    let cli = Cli::parse();

    let source = match std::fs::read_to_string(&cli.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: failed to read '{}': {e}", cli.file.display());
            process::exit(1);
        }
    };

    let config = LexerConfig {
        max_interpolation_nesting: cli.max_interpolation_nesting,
    };
    let result = ember_parser::parse_with_config(&source, config);

    if result.had_error {
        report_diagnostics(&source, &cli.file, &result);
        process::exit(1);
    }

    if cli.dump_ast {
        for node in &result.nodes {
            println!("{}", dump::format_node(node, &result.interner, 0));
        }
    } else {
        println!("parsed {} top-level declaration(s)", result.nodes.len());
    }
}

fn report_diagnostics(source: &str, path: &std::path::Path, result: &ember_parser::ParseResult) {
    let file_name = path.display().to_string();
    let line_index = LineIndex::new(source);
    for diag in &result.diagnostics {
        let start = diag.span.start as usize;
        let end = (diag.span.end as usize).max(start + 1);
        let (line, col) = line_index.line_col(diag.span.start);
        let _ = Report::<std::ops::Range<usize>>::build(ReportKind::Error, start..end)
            .with_message(format!("{file_name}:{line}:{col}: {}", diag.kind))
            .with_label(Label::new(start..end).with_message(diag.kind.to_string()))
            .finish()
            .eprint(Source::from(source));
    }
}

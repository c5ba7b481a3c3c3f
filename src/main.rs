// ═══════════════════════════════════════════════════════════
// Frenchy: command-line entry point
// ═══════════════════════════════════════════════════════════

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use frenchy::{parse_source, FrenchyError, Interpreter};

#[derive(Parser, Debug)]
#[command(name = "frenchy", version, about = "The Frenchy scripting language")]
struct Cli {
    /// Log filter used when FRENCHY_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a .fry program
    Run { file: PathBuf },
    /// Parse a .fry program without running it
    Check { file: PathBuf },
    /// Start an interactive session
    Repl,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Some(Command::Run { file }) => run_file(&file),
        Some(Command::Check { file }) => check_file(&file),
        Some(Command::Repl) | None => repl(),
    }
}

fn init_logging(fallback: &str) {
    let filter = EnvFilter::try_from_env("FRENCHY_LOG")
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ═══════════════════════════════════════════════════════════
// run / check subcommands
// ═══════════════════════════════════════════════════════════

fn read_source(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("\x1b[31m[Frenchy]\x1b[0m Cannot read '{}': {}", path.display(), e);
        std::process::exit(1);
    })
}

fn report(error: &FrenchyError, path: &Path) {
    match error {
        FrenchyError::Syntax(e) => eprintln!("\x1b[31m[syntax error]\x1b[0m in {}: {}", path.display(), e),
        FrenchyError::Fault(e) => eprintln!("\x1b[31m[runtime error]\x1b[0m {}", e),
    }
}

fn run_file(path: &Path) {
    let source = read_source(path);
    let mut interp = Interpreter::new();
    if let Err(e) = interp.run_source(&source) {
        report(&e, path);
        std::process::exit(1);
    }
}

fn check_file(path: &Path) {
    let source = read_source(path);
    match parse_source(&source) {
        Ok(program) => println!(
            "\x1b[32m✓\x1b[0m {} OK ({} top-level statements)",
            path.display(),
            program.len()
        ),
        Err(e) => {
            report(&FrenchyError::Syntax(e), path);
            std::process::exit(1);
        }
    }
}

// ═══════════════════════════════════════════════════════════
// REPL
// ═══════════════════════════════════════════════════════════

fn repl() {
    println!("\x1b[36m  Frenchy v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
    println!("  \x1b[90mTapez :aide pour l'aide, :quitter pour sortir\x1b[0m");
    println!();

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("\x1b[31m[Frenchy]\x1b[0m Cannot start line editor: {}", e);
            std::process::exit(1);
        }
    };

    // One scope store for the whole session.
    let mut interp = Interpreter::new();
    let mut input_buffer = String::new();
    let mut brace_depth: i32 = 0;

    loop {
        let prompt = if brace_depth > 0 { "  ... " } else { "fry> " };
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                input_buffer.clear();
                brace_depth = 0;
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        };

        let trimmed = line.trim();
        if brace_depth == 0 {
            match trimmed {
                ":quitter" | ":q" | ":quit" => break,
                ":aide" | ":help" | ":h" => { print_help(); continue; }
                "" => continue,
                _ => {}
            }
        }
        let _ = editor.add_history_entry(trimmed);

        for ch in trimmed.chars() {
            match ch { '{' => brace_depth += 1, '}' => brace_depth -= 1, _ => {} }
        }
        input_buffer.push_str(&line);
        input_buffer.push('\n');
        if brace_depth > 0 {
            continue;
        }
        brace_depth = 0;

        let source = std::mem::take(&mut input_buffer);
        match interp.run_source(&source) {
            Ok(()) => {}
            Err(FrenchyError::Syntax(e)) => eprintln!("\x1b[31m[syntax error]\x1b[0m {}", e),
            Err(FrenchyError::Fault(e)) => eprintln!("\x1b[31m[runtime error]\x1b[0m {}", e),
        }
    }
    println!("Au revoir !");
}

fn print_help() {
    println!();
    println!("  \x1b[1mFrenchy: aide-mémoire\x1b[0m");
    println!();
    println!("  \x1b[33mCommandes:\x1b[0m");
    println!("    frenchy run <fichier.fry>      Exécuter un programme");
    println!("    frenchy check <fichier.fry>    Vérifier la syntaxe");
    println!("    frenchy repl                   Session interactive");
    println!();
    println!("  \x1b[33mVariables:\x1b[0m");
    println!("    x = 42;   nom = \"Marie\";   ok = vrai;   rien = nul");
    println!("    l = entier[1, 2, 3]");
    println!();
    println!("  \x1b[33mContrôle:\x1b[0m");
    println!("    si x > 0 {{ ... }} sinon si x == 0 {{ ... }} sinon {{ ... }}");
    println!("    pendant que x < 10 {{ ... }}     jusqu'à x >= 10 {{ ... }}");
    println!("    pour (i = 0; i == 3; i = i + 1) {{ ... }}");
    println!("    pour chaque (entier e dans l) {{ ... }}");
    println!();
    println!("  \x1b[33mIntégrés:\x1b[0m  afficher(..)  MsgConsole(..)  pause()  taille(\"l\")  PI");
    println!();
    println!("  \x1b[33mREPL:\x1b[0m  :aide  :quitter");
    println!();
}

//! Kite CLI.

use kitec::commands::{check_source, dump_tokens, read_source, run_script, USAGE_STATUS};
use kitec::{init_tracing, parse_args, Command};
use kite_eval::Output;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (command, options) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            std::process::exit(USAGE_STATUS);
        }
    };

    let status = match command {
        Command::Help => {
            print_usage();
            0
        }
        Command::Version => {
            println!("kite {}", env!("CARGO_PKG_VERSION"));
            0
        }
        Command::Run(path) => match read_source(&path) {
            Ok(source) => run_script(
                &path.to_string_lossy(),
                &source,
                &options,
                Output::Stdout,
                Output::Stderr,
            ),
            Err(status) => status,
        },
        Command::Check(path) => match read_source(&path) {
            Ok(source) => check_source(&path.to_string_lossy(), &source, &mut std::io::stdout()),
            Err(status) => status,
        },
        Command::Tokens(path) => match read_source(&path) {
            Ok(source) => dump_tokens(&path.to_string_lossy(), &source, &mut std::io::stdout()),
            Err(status) => status,
        },
    };
    std::process::exit(status);
}

fn print_usage() {
    println!("Kite script runner");
    println!();
    println!("Usage: kite <command> [options] <file>");
    println!("       kite <file.kite> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Run a script (default when given a path)");
    println!("  check <file>     Parse only and report errors");
    println!("  tokens <file>    Print the token stream");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Options:");
    println!("  --max-depth N    Maximum function nesting depth (default 1000)");
    println!("  --safe           Enable safe mode for native functions");
    println!();
    println!("Set KITE_LOG (e.g. KITE_LOG=kite_eval=debug) to trace evaluation.");
}

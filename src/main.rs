use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use glossa::interpreter::{
    debug::TraceHook,
    io::{StdinSource, StdoutSink},
};

/// glossa runs programs written in ΓΛΩΣΣΑ, the Greek pedagogical
/// programming language, with stdin and stdout as the program's input and
/// output.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ΓΛΩΣΣΑ source file to execute.
    file: PathBuf,

    /// Log every executed statement line to stderr.
    #[arg(short, long)]
    trace: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Ok(source) = fs::read_to_string(&args.file) else {
        eprintln!("Δεν ήταν δυνατή η ανάγνωση του αρχείου '{}'.", args.file.display());
        return ExitCode::FAILURE;
    };

    let mut input = StdinSource;
    let mut output = StdoutSink;
    let result = if args.trace {
        let mut hook = TraceHook;
        glossa::run_source_with_hook(&source, &mut input, &mut output, &mut hook)
    } else {
        glossa::run_source(&source, &mut input, &mut output)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        },
    }
}

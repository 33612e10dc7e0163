//   Copyright 2025 Dom Dwyer <dom@itsallbroken.com>
//
//   Licensed under the Apache License, Version 2.0 (the "License");
//   you may not use this file except in compliance with the License.
//   You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
//   Unless required by applicable law or agreed to in writing, software
//   distributed under the License is distributed on an "AS IS" BASIS,
//   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//   See the License for the specific language governing permissions and
//   limitations under the License.

use std::{
    io::{BufRead, BufReader, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use libboolcalc::Engine;
use thiserror::Error;

/// An interactive console for boolean algebra over named variables.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a script of statements to run instead of reading stdin.
    file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum Error {
    /// The input script cannot be opened.
    #[error("cannot open file '{path}': {source}")]
    OpenFile {
        path: String,
        source: std::io::Error,
    },

    /// Reading an input line failed mid-session.
    #[error("failed to read input line: {0}")]
    ReadLine(std::io::Error),
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // A usage error maps to exit code 1; --help and --version render
            // on stdout and exit 0.
            let _ = err.print();
            return match err.use_stderr() {
                true => ExitCode::from(1),
                false => ExitCode::SUCCESS,
            };
        }
    };

    let result = match args.file {
        Some(path) => match std::fs::File::open(&path) {
            Ok(file) => run(BufReader::new(file), false),
            Err(source) => Err(Error::OpenFile {
                path: path.display().to_string(),
                source,
            }),
        },
        None => {
            let interactive = std::io::stdin().is_terminal();
            run(std::io::stdin().lock(), interactive)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ Error::OpenFile { .. }) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Feed `input` through an engine line by line, until the end of the input or
/// a literal `exit` line.
///
/// Engine errors abort only their own line: they render as `Error: ...` and
/// the session continues.
fn run(input: impl BufRead, interactive: bool) -> Result<(), Error> {
    if interactive {
        println!("boolcalc interactive console.");
        println!();
        println!("Enter statements to interact with the engine. Enter 'exit' to quit.");
        println!();
    }

    let mut engine = Engine::new();
    for line in input.lines() {
        let line = line.map_err(Error::ReadLine)?;
        if line == "exit" {
            break;
        }

        match engine.process(&line) {
            Ok(output) if output.is_empty() => {}
            Ok(output) => println!("{output}"),
            Err(err) => println!("Error: {err}"),
        }
    }

    Ok(())
}

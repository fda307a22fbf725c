//! CLI driver for the builtin table generator.
//!
//! Reads a JSON builtin database and writes the generated Rust source.
//! The output file is only written once the whole generation pass has
//! succeeded; a failed run leaves no partial output behind.

use std::process;
use std::sync::Once;

use glint_builtin_db::BuiltinDb;

static TRACING_INIT: Once = Once::new();

/// Enable with `RUST_LOG=glint_builtin_gen=debug`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn print_usage() {
    eprintln!("Usage: glint-bgen <db.json> -o <out.rs>");
    eprintln!();
    eprintln!("Reads a builtin database and writes the generated lookup tables.");
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let mut input = None;
    let mut output = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" if i + 1 < args.len() => {
                output = Some(args[i + 1].clone());
                i += 2;
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            arg if input.is_none() && !arg.starts_with('-') => {
                input = Some(arg.to_owned());
                i += 1;
            }
            arg => {
                eprintln!("glint-bgen: unexpected argument `{arg}`");
                print_usage();
                process::exit(2);
            }
        }
    }
    let (Some(input), Some(output)) = (input, output) else {
        print_usage();
        process::exit(2);
    };

    let data = match std::fs::read_to_string(&input) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("glint-bgen: cannot read {input}: {err}");
            process::exit(1);
        }
    };
    let db: BuiltinDb = match serde_json::from_str(&data) {
        Ok(db) => db,
        Err(err) => {
            eprintln!("glint-bgen: {input} is not a valid builtin database: {err}");
            process::exit(1);
        }
    };
    let text = match glint_builtin_gen::generate(&db) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("glint-bgen: generation failed: {err}");
            process::exit(1);
        }
    };
    if let Err(err) = std::fs::write(&output, text) {
        eprintln!("glint-bgen: cannot write {output}: {err}");
        process::exit(1);
    }
}

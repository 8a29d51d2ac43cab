// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Example: parse a bilingual module, translate it both ways and show where
//! each statement ended up.
//!
//! Run with: `RUST_LOG=debug cargo run --example translate_example`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tuglingo_cst::{
    parse_module, parse_module_with_options, prettify_error, translate_module, CodegenOptions,
    Dialect, Language, ParseOptions,
};

const SOURCE: &str = "\
# Mixed keywords
raise ValueError(x) from causa
devuelve resultado ; break
continúa  # siguiente
";

fn main() {
    // Initialize tracing with RUST_LOG support
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== tuglingo-cst Keyword Translation Example ===\n");

    // 1. Round trip
    println!("1. Round Trip");
    println!("   ----------");
    let module = match parse_module(SOURCE, None) {
        Ok(module) => module,
        Err(e) => {
            println!("   Error: {}", prettify_error(e, "example"));
            return;
        }
    };
    println!("   Round-trip output matches: {}", module.code() == SOURCE);
    println!();

    // 2. Translation in both directions
    println!("2. Translation");
    println!("   -----------");
    for target in [Language::Spanish, Language::English] {
        match translate_module(module.clone(), target) {
            Ok(translated) => {
                println!("   {} ({} statements changed):", target, translated.statements);
                for line in translated.module.code().lines() {
                    println!("     {}", line);
                }
            }
            Err(e) => println!("   Error: {}", e),
        }
    }
    println!();

    // 3. Statement positions
    println!("3. Statement Positions");
    println!("   -------------------");
    let (code, positions) = module.code_with_positions();
    for position in positions.iter().filter(|p| p.kind != "SimpleStatementLine") {
        println!(
            "   {:<10} {} -> {}  {:?}",
            position.kind,
            position.range.start,
            position.range.end,
            position.span.slice(&code).unwrap_or_default()
        );
    }
    println!();

    // 4. Dialects and codegen options
    println!("4. Dialects");
    println!("   --------");
    let options = ParseOptions::new(Dialect::English);
    match parse_module_with_options("rompe; break", options) {
        Ok(module) => {
            let compact = CodegenOptions::default().with_default_semicolon(";");
            let is_name = module.body[0].body[0].kind().is_none();
            println!("   English dialect parses `rompe` as a name: {}", is_name);
            println!("   Rendered: {}", module.code_with_options(&compact));
        }
        Err(e) => println!("   Error: {}", prettify_error(e, "dialect_example")),
    }
}

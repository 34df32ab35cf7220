//! Walk a C or C++ file and print every cursor libclang reports.
//!
//! Run with: cargo run --example dump_ast -- path/to/file.c [clang args...]
//!
//! Set RUST_LOG=cindex=debug to see loading and parsing events.

use std::env;

use cindex::{kind, parse_flags, ChildVisit, Cursor, Handle, Index, Location, TranslationUnit};
use tracing_subscriber::EnvFilter;

fn position(location: &Location<'_>) -> cindex::Result<String> {
    let file = match location.file {
        Some(file) => file.name()?,
        None => "<none>".to_string(),
    };
    Ok(format!("{}:{}:{}", file, location.line, location.column))
}

fn describe(cursor: Cursor<'_>, depth: usize) -> cindex::Result<String> {
    let extent = cursor.extent()?;
    let start = extent.start()?.instantiation_location()?;
    let end = extent.end()?.instantiation_location()?;
    let code = cursor.kind()?;
    let ty = cursor.cursor_type()?;

    let mut categories = Vec::new();
    for (name, matches) in [
        ("decl", kind::is_declaration(code)?),
        ("ref", kind::is_reference(code)?),
        ("expr", kind::is_expression(code)?),
        ("stmt", kind::is_statement(code)?),
        ("attr", kind::is_attribute(code)?),
        ("pp", kind::is_preprocessing(code)?),
        ("unexposed", kind::is_unexposed(code)?),
    ] {
        if matches {
            categories.push(name);
        }
    }

    Ok(format!(
        "{:indent$}{} '{}' [{}] type='{}' ({}) usr='{}' {}..{}",
        "",
        kind::cursor_kind_spelling(code)?,
        cursor.display_name()?,
        categories.join(","),
        ty.spelling()?,
        ty.kind_spelling()?,
        cursor.usr()?,
        position(&start)?,
        position(&end)?,
        indent = depth * 2,
    ))
}

fn main() -> cindex::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: dump_ast <file> [clang args...]");
        return Ok(());
    };
    let clang_args: Vec<String> = args.collect();

    println!("{}", cindex::clang_version()?);

    let index = Index::new(false, true)?;
    let unit = TranslationUnit::parse(
        &index,
        Some(&path),
        &clang_args,
        &[],
        parse_flags::DETAILED_PREPROCESSING_RECORD,
    )?;
    let root = unit.cursor()?;

    // The chain from the root to the current parent gives the indentation.
    let mut ancestors: Vec<Cursor<'_>> = vec![root];
    let mut failure = None;
    let status = root.visit_children(|cursor, parent| {
        while let Some(top) = ancestors.last() {
            if top.raw() == parent.raw() {
                break;
            }
            ancestors.pop();
        }

        match describe(cursor, ancestors.len().saturating_sub(1)) {
            Ok(line) => println!("{line}"),
            Err(err) => {
                failure = Some(err);
                return ChildVisit::Break;
            }
        }

        ancestors.push(cursor);
        ChildVisit::Recurse
    })?;

    if let Some(err) = failure {
        return Err(err);
    }
    println!("traversal {:?}", status);
    Ok(())
}

// Command-line interface for notion-md
//
// This binary converts a recorded Notion page (a JSON snapshot of block-children pages) into
// Markdown. It never talks to the Notion API: recording snapshots is left to whatever client
// produced them, and the conversion goes through the same BlockSource seam an API client uses.
//
// Usage:
//  notion-md <snapshot> [--root <id>] [--output <file>]          - Convert (default)
//  notion-md convert <snapshot> [--root <id>] [--output <file>]  - Same as above (explicit)
//
// Configuration:
//
// Settings come from the built-in defaults, then notion-md.toml in the working directory, then
// the file given with --config, then command-line flags. RUST_LOG controls log output on stderr.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use notion_md::{ConvertOptions, NotionToMarkdown, SnapshotSource};
use notion_md_config::{ConfigError, Loader, NotionMdConfig, PROJECT_CONFIG_FILE};
use std::fs;
use std::process;

const SUBCOMMANDS: &[&str] = &["convert", "help"];

fn build_cli() -> Command {
    Command::new("notion-md")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Notion pages to Markdown")
        .long_about(
            "notion-md converts the block tree of a Notion page into Markdown.\n\n\
            The input is a JSON snapshot of block-children listings:\n  \
            { \"root\": \"<page id>\", \"children\": { \"<block id>\": [<page>, ...] } }\n\n\
            Examples:\n  \
            notion-md page.json                       # Markdown on stdout\n  \
            notion-md page.json -o page.md            # Write to a file\n  \
            notion-md page.json --images-to-base64    # Inline images\n  \
            notion-md page.json --separate-child-pages --image-dir assets",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a notion-md.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a page snapshot to Markdown (default command)")
                .arg(
                    Arg::new("snapshot")
                        .help("Snapshot file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("root")
                        .long("root")
                        .value_name("BLOCK_ID")
                        .help("Page to convert (defaults to the snapshot's root)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("separate-child-pages")
                        .long("separate-child-pages")
                        .help("Stop at child pages instead of inlining them")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("images-to-base64")
                        .long("images-to-base64")
                        .help("Inline images as base64 data URIs")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("image-dir")
                        .long("image-dir")
                        .value_name("DIR")
                        .help("Directory image files are written to")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("detach-downloads")
                        .long("detach-downloads")
                        .help("Write image files in the background")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let config = load_cli_config(&matches, sub_matches);
            handle_convert_command(sub_matches, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &NotionMdConfig) {
    let Some(path) = matches.get_one::<String>("snapshot") else {
        eprintln!("Error: a snapshot file is required");
        process::exit(1);
    };

    let source = SnapshotSource::from_path(path).unwrap_or_else(|e| {
        eprintln!("Error reading snapshot '{path}': {e}");
        process::exit(1);
    });

    let root = match matches.get_one::<String>("root") {
        Some(root) => root.clone(),
        None => match source.root() {
            Some(root) => root.to_string(),
            None => {
                eprintln!("Error: snapshot '{path}' does not name a root block");
                eprintln!("Please specify --root explicitly");
                process::exit(1);
            }
        },
    };

    let options = ConvertOptions::from(config);
    log::debug!("converting '{root}' from {path} with {options:?}");
    let converter = NotionToMarkdown::with_options(source, options);
    let document = converter.to_markdown_document(&root).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        process::exit(1);
    });

    for page in &document.child_pages {
        eprintln!(
            "Child page '{}' not converted; rerun with --root {}",
            page.title, page.id
        );
    }

    let mut markdown = document.markdown;
    if !markdown.is_empty() {
        markdown.push('\n');
    }

    match matches.get_one::<String>("output") {
        Some(output) => {
            fs::write(output, markdown).unwrap_or_else(|e| {
                eprintln!("Error writing file '{output}': {e}");
                process::exit(1);
            });
        }
        None => print!("{markdown}"),
    }

    converter.wait_for_assets();
}

/// Layer defaults, project file, explicit config and command-line flags.
fn load_cli_config(matches: &ArgMatches, convert: &ArgMatches) -> NotionMdConfig {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let explicit = convert
        .get_one::<String>("config")
        .or_else(|| matches.get_one::<String>("config"));
    let loader = match explicit {
        Some(path) => loader.with_file(path),
        None => loader,
    };

    let loader = apply_flag_overrides(loader, convert).unwrap_or_else(|err| {
        eprintln!("Invalid option: {err}");
        process::exit(1);
    });

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        process::exit(1);
    })
}

fn apply_flag_overrides(
    mut loader: Loader,
    matches: &ArgMatches,
) -> Result<Loader, ConfigError> {
    if matches.get_flag("separate-child-pages") {
        loader = loader.set_override("convert.separate_child_page", true)?;
    }
    if matches.get_flag("images-to-base64") {
        loader = loader.set_override("convert.convert_images_to_base64", true)?;
    }
    if let Some(dir) = matches.get_one::<String>("image-dir") {
        loader = loader.set_override("assets.directory", dir.as_str())?;
    }
    if matches.get_flag("detach-downloads") {
        loader = loader.set_override("assets.write_mode", "detached")?;
    }
    Ok(loader)
}

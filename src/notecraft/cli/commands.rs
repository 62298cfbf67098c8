//! Dispatch from parsed arguments to the API, and from results to the terminal.
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call API and format output

use super::print::{
    eprint_messages, print_config, print_counters, print_document_id, print_lines, print_messages,
};
use super::setup::{Cli, Commands, IdCommands, PolicyArgs, SegmentArg};
use chrono::Local;
use clap::Parser;
use directories::ProjectDirs;
use notecraft::api::{ConfigAction, NotecraftApi, OutputFormat};
use notecraft::config::NotecraftConfig;
use notecraft::error::{NotecraftError, Result};
use notecraft::model::NoteForm;
use notecraft::sequence::Category;
use notecraft::store::fs::FileStore;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

struct AppContext {
    api: NotecraftApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Id(cmd) => match cmd {
            IdCommands::New { category } => handle_id_issue(&mut ctx, &category, true),
            IdCommands::Current { category } => handle_id_issue(&mut ctx, &category, false),
            IdCommands::Show => handle_id_show(&ctx),
            IdCommands::Clear => handle_id_clear(&mut ctx),
            IdCommands::Code { category } => {
                print_lines(&ctx.api.category_code(&category).lines);
                Ok(())
            }
            IdCommands::Categories => {
                print_lines(&ctx.api.categories().lines);
                Ok(())
            }
            IdCommands::Counters => handle_counters(&ctx),
        },
        Commands::Segment { mode, file, policy } => {
            handle_segment(&ctx, mode, file.as_deref(), policy)
        }
        Commands::Preview { form, policy } => handle_preview(&mut ctx, &form, policy),
        Commands::Print {
            form,
            output,
            policy,
        } => handle_print(&mut ctx, &form, output.as_deref(), policy),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

/// Diagnostics go to stderr; stdout is reserved for command output.
/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    ProjectDirs::from("com", "notecraft", "notecraft")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NotecraftError::Api("Could not determine a data directory".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = NotecraftConfig::load(&data_dir)?;
    debug!(data_dir = %data_dir.display(), "loaded configuration");

    let store = FileStore::new(data_dir.clone());
    Ok(AppContext {
        api: NotecraftApi::new(store, data_dir, config),
    })
}

/// Accepts either a category name or its code (`EQ`, `macro`).
fn resolve_category(arg: &str) -> String {
    match Category::from_code(arg) {
        Some(category) => category.name().to_string(),
        None => arg.trim().to_string(),
    }
}

fn handle_id_issue(ctx: &mut AppContext, category: &str, force_new: bool) -> Result<()> {
    let category = resolve_category(category);
    let today = Local::now();
    let result = if force_new {
        ctx.api.new_id(&category, &today)?
    } else {
        ctx.api.current_id(&category, &today)?
    };
    print_document_id(result.document_id.as_ref());
    eprint_messages(&result.messages);
    Ok(())
}

fn handle_id_show(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.show_id()?;
    print_document_id(result.document_id.as_ref());
    print_messages(&result.messages);
    Ok(())
}

fn handle_id_clear(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.clear_id()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_counters(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.counters()?;
    print_counters(&result.counters);
    print_messages(&result.messages);
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path).map_err(NotecraftError::Io),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(NotecraftError::Io)?;
            Ok(buffer)
        }
    }
}

fn handle_segment(
    ctx: &AppContext,
    mode: SegmentArg,
    file: Option<&Path>,
    policy: PolicyArgs,
) -> Result<()> {
    let text = read_input(file)?;
    let result = ctx.api.segment(&text, mode.into(), policy.overrides());
    print_lines(&result.lines);
    Ok(())
}

fn handle_preview(ctx: &mut AppContext, form: &Path, policy: PolicyArgs) -> Result<()> {
    let form = NoteForm::load(form)?;
    let result = ctx.api.compose(
        &form,
        OutputFormat::Preview,
        policy.overrides(),
        &Local::now(),
    )?;
    if let Some(text) = &result.rendered {
        println!("{}", text);
    }
    eprint_messages(&result.messages);
    Ok(())
}

fn handle_print(
    ctx: &mut AppContext,
    form: &Path,
    output: Option<&Path>,
    policy: PolicyArgs,
) -> Result<()> {
    let form = NoteForm::load(form)?;
    let result = ctx.api.compose(
        &form,
        OutputFormat::PrintHtml,
        policy.overrides(),
        &Local::now(),
    )?;
    let html = result.rendered.as_deref().unwrap_or_default();
    match output {
        Some(path) => {
            fs::write(path, html).map_err(NotecraftError::Io)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", html),
    }
    eprint_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::board::LoadState;
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::output::{self, OutputFormat};
use crate::runner::{self, Action, Options, Runner};
use crate::source::FileSource;

fn print_banner(no_color: bool) {
    let _ = no_color;
    const BANNER: &str = r#"
   __  _ __     __                        __
  / /_(_) /__  / /_  ____  ____ _________/ /
 / __/ / / _ \/ __ \/ __ \/ __ `/ ___/ __  /
/ /_/ / /  __/ /_/ / /_/ / /_/ / /  / /_/ /
\__/_/_/\___/_.___/\____/\__,_/_/   \__,_/
      v0.1.4 - click-ranked tile grid
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    endpoint: String,
    offline: Option<String>,
    initial_page_size: usize,
    page_increment: usize,
    timeout: usize,
    proxy: Option<String>,
    output: Option<String>,
    output_format: Option<String>,
    no_color: bool,
    script: Vec<Action>,
}

fn build_script(args: &CliArgs) -> Vec<Action> {
    let mut script: Vec<Action> = Vec::new();
    for _ in 0..args.reveal {
        script.push(Action::Reveal);
    }
    for id in &args.select {
        script.push(Action::Select { id: *id });
    }
    if args.deselect {
        script.push(Action::Deselect);
    }
    script
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let endpoint = args
        .endpoint
        .clone()
        .or(cfg.endpoint)
        .unwrap_or_else(|| runner::DEFAULT_ENDPOINT.to_string());

    let initial_page_size = args
        .initial
        .or(cfg.initial_page_size)
        .unwrap_or(crate::board::DEFAULT_INITIAL_PAGE_SIZE);
    if initial_page_size == 0 {
        return Err("invalid initial_page_size, expected positive integer".to_string());
    }

    let page_increment = args
        .increment
        .or(cfg.page_increment)
        .unwrap_or(crate::board::DEFAULT_PAGE_INCREMENT);
    if page_increment == 0 {
        return Err("invalid page_increment, expected positive integer".to_string());
    }

    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    let proxy = args.proxy.clone().or(cfg.proxy);

    let offline = args.offline.clone().map(|p| config::expand_tilde_string(&p));
    let output = args
        .output
        .clone()
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));

    let output_format = args.format.clone().or(cfg.output_format);
    if let Some(raw) = output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid output format '{raw}', expected text or json"));
        }
    }

    let script = build_script(&args);

    Ok(RunConfig {
        endpoint,
        offline,
        initial_page_size,
        page_increment,
        timeout,
        proxy,
        output,
        output_format,
        no_color,
        script,
    })
}

fn resolve_format(run: &RunConfig) -> OutputFormat {
    if let Some(raw) = run.output_format.as_deref() {
        if let Some(format) = OutputFormat::parse(raw) {
            return format;
        }
    }
    if let Some(path) = run.output.as_deref() {
        if let Some(format) = output::infer_format_from_path(path) {
            return format;
        }
    }
    OutputFormat::Text
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    print_banner(run.no_color);
    match run.offline.as_deref() {
        Some(path) => format_kv_line("Feed", &format!("file://{path}")),
        None => format_kv_line("Feed", &run.endpoint),
    }
    format_kv_line(
        "Grid",
        &format!("{} (+{} per reveal)", run.initial_page_size, run.page_increment),
    );
    format_kv_line("Timeout", &format!("{}s", run.timeout));
    if let Some(out) = run.output.as_deref() {
        format_kv_line("Output", out);
    }
    println!();

    let options = Options {
        endpoint: run.endpoint.clone(),
        initial_page_size: run.initial_page_size,
        page_increment: run.page_increment,
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
        script: run.script.clone(),
    };
    let runner = Runner::new(options).map_err(|e| e.to_string())?;

    let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("fetching records");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let session = match run.offline.as_deref() {
        Some(path) => {
            let source = FileSource::new(path.to_string());
            runner.run_with_source(&source).await
        }
        None => runner.run().await,
    };
    spinner.finish_and_clear();
    let session = session.map_err(|e| e.to_string())?;

    let snapshot = output::build_snapshot(&session.board);
    print!(
        "{}",
        String::from_utf8_lossy(&output::render_text(&snapshot, run.no_color))
    );

    if let Some(outfile_path) = run.output.as_deref() {
        let rendered = match resolve_format(&run) {
            OutputFormat::Text => output::render_text(&snapshot, true),
            OutputFormat::Json => output::render_json(&snapshot),
        };
        let mut outfile = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(outfile_path)
            .await
            .map_err(|e| format!("failed to open output file: {e}"))?;
        outfile
            .write_all(&rendered)
            .await
            .map_err(|_| "failed to write output file".to_string())?;
    }

    println!();
    println!(
        ":: Completed :: session took {}ms ::",
        session.elapsed.as_millis()
    );

    if let LoadState::Failed(e) = session.board.load_state() {
        return Err(format!("fetch failed: {e}"));
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}

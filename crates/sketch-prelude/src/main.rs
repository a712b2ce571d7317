use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sketch_prelude::config::{DUMP_COMPOSITE_ENV, LOG_ENV};
use sketch_prelude::{Invocation, Mode, PreludeError, PreludeSettings};

#[derive(Parser, Debug)]
#[command(name = "sketch-prelude", version, about)]
struct Args {
    /// Sketch directory, or any sketch file inside it.
    path: PathBuf,

    /// Extra arguments forwarded to Clang.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    extra_args: Vec<String>,

    /// Parse PATH on its own instead of the sketch it belongs to.
    #[arg(long, conflicts_with = "extra_args")]
    single_file: bool,

    /// Fail when Clang reports any error.
    #[arg(long)]
    strict: bool,

    /// Configuration file; defaults to `sketch-prelude.toml` in the sketch
    /// directory when present.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(
    args: &Args,
    settings: &PreludeSettings,
) {
    let stderr_filter = match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) if args.verbose => EnvFilter::new("sketch_prelude=debug"),
        Err(_) => EnvFilter::new(settings.logging.level.filter_directive()),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(stderr_filter);

    let file_layer = args.log_file.as_ref().map(|log_path| {
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(Path::new(".")),
            log_path.file_name().unwrap_or(std::ffi::OsStr::new("sketch-prelude.log")),
        );
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new("sketch_prelude=debug"))
    });

    tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();
}

fn report(err: &PreludeError) {
    if let PreludeError::Diagnostics {
        diagnostics,
        ..
    } = err
    {
        for diag in diagnostics {
            eprintln!("{diag}");
        }
    }
    eprintln!("error: {err}");
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        },
    };

    let mut settings = match PreludeSettings::load(args.config.as_deref(), &args.path) {
        Ok(settings) => settings,
        Err(err) => {
            report(&err);
            return ExitCode::FAILURE;
        },
    };
    if args.strict {
        settings.diagnostics.strict = true;
    }

    init_logging(&args, &settings);
    info!("sketch-prelude v{}", env!("CARGO_PKG_VERSION"));
    debug!("settings: {settings:?}");

    let invocation = Invocation {
        input: args.path.clone(),
        mode: if args.single_file { Mode::SingleFile } else { Mode::Sketch },
        extra_args: args.extra_args.clone(),
        dump_composite: std::env::var_os(DUMP_COMPOSITE_ENV).is_some(),
    };

    let output = match sketch_prelude::run(&invocation, &settings) {
        Ok(output) => output,
        Err(err) => {
            report(&err);
            return ExitCode::FAILURE;
        },
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = stdout.write_all(output.as_bytes()).and_then(|()| stdout.flush()) {
        eprintln!("error: failed to write output: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

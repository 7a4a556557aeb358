#![allow(clippy::result_large_err)]

use clap::Parser;
use human_panic::{Metadata, setup_panic};
use miette::GraphicalReportHandler;
use modup_cli::{actions, cli::Cli};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    miette::set_hook(Box::new(|_| {
        Box::new(
            GraphicalReportHandler::new()
                .with_theme(miette::GraphicalTheme::unicode())
                .with_context_lines(5),
        )
    }))
    .ok(); // Ignore if already set

    setup_panic!(
        Metadata::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            .homepage(env!("CARGO_PKG_HOMEPAGE"))
            .support(
                "Please open an issue on github. Attach the outputs of the above referenced report file."
            ).authors(env!("CARGO_PKG_AUTHORS"))
    );

    let cli = Cli::parse();

    let log_level: tracing::Level = cli.log_level.clone().into();

    let indicatif_layer = tracing_indicatif::IndicatifLayer::new();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();

    let init = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_file(false)
                .with_line_number(false),
        )
        .with(indicatif_layer)
        .with(filter)
        .try_init();

    if let Err(e) = init {
        eprintln!("unable to initialize logging: {e}");
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            println!("{}", actions::error_command(&format!("runtime: {e}")));
            return ExitCode::FAILURE;
        },
    };

    match rt.block_on(cli.run(&actions::Outputs::from_env())) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", actions::error_command(&e.annotation()));
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::FAILURE
        },
    }
}

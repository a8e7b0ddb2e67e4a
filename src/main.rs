use std::{process, sync::Arc};

use storyline::{
    application::{
        error::{AppError, ErrorReport},
        posts::PostRepository,
    },
    config::{self, Command},
    infra::{notify::TerminalNotifier, store::RestPostStore, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

mod handlers;
mod io;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = ErrorReport::from_error(error).joined();
    let message = error.presentation_message();

    if dispatcher::has_been_set() {
        error!(error = %report, "{message}");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %report, "{message}");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;
    info!(store = %settings.store.url, table = %settings.store.table, "starting storyline");

    let store = RestPostStore::new(&settings.store)?;
    let mut repo = PostRepository::new(Arc::new(store), Arc::new(TerminalNotifier::stderr()));

    match cli_args.command {
        Command::Blog(args) => handlers::blog::handle(&mut repo, args.action).await,
        Command::Admin(args) => handlers::admin::handle(&mut repo, args.action).await,
        Command::Shell => handlers::shell::run(&mut repo).await,
    }
}

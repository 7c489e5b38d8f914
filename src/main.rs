//! Emote Downloader - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use emote_downloader::{
    api::DiscordApi,
    cli::Args,
    config::{parse_guild_id, resolve_token, validate_config, Config},
    download::Pipeline,
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_error, print_info, print_run_summary,
        print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Authentication(_)
                | Error::Api(_)
                | Error::Metadata { .. }
                | Error::RateLimited(_) => ExitCode::from(exit_codes::API_ERROR as u8),
                Error::Cancelled => ExitCode::from(exit_codes::ABORT as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<i32> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = Config::load_or_default(&args.config)?;
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let guild_id = args.guild_id.as_deref().map(parse_guild_id).transpose()?;

    print_config_summary(
        guild_id.as_deref(),
        config.download.workers,
        &config.download.emotes_directory,
        &config.download.stickers_directory,
    );

    let token = resolve_token(args.token.clone(), &config)?;
    let api = Arc::new(DiscordApi::new(&token, &config)?);

    // Ctrl-C stops workers from taking new items
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            print_warning("Interrupted, finishing in-flight downloads...");
            signal_cancel.cancel();
        }
    });

    print_info("Fetching guild metadata...");
    let summary = Pipeline::from_config(api, &config)
        .show_progress(!args.quiet)
        .run(guild_id.as_deref(), cancel)
        .await?;

    print_run_summary(&summary);

    let downloads = &summary.downloads;
    if summary.cancelled {
        return Ok(exit_codes::ABORT);
    }
    if downloads.processed > 0 && downloads.failed == downloads.processed {
        print_error("Every download failed");
        return Ok(exit_codes::DOWNLOAD_ERROR);
    }
    if downloads.failed > 0 {
        print_warning(&format!("{} item(s) failed to download", downloads.failed));
    } else {
        print_success("All done");
    }

    Ok(exit_codes::SUCCESS)
}

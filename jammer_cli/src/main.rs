mod cli;
mod error_fmt;
mod order;
mod quote;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use eyre::WrapErr;
use jammer_core::{CalcError, Catalog, Session};
use jammer_share::{Channel, Clipboard, FileClipboard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = color_eyre::install() {
        eprintln!("warning: error reporter not installed: {e}");
    }
    if let Err(e) = init_tracing(cli.json, &cli.log_level, cli.log_file.as_deref()) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    if let Err(err) = run(cli) {
        tracing::debug!("{err:?}");
        if JSON_MODE.get().copied().unwrap_or(false) {
            println!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        std::process::exit(exit_code_for_error(&err));
    }
}

/// Console logs go to stderr so stdout stays machine-readable; the optional
/// file sink always writes JSON lines.
fn init_tracing(json: bool, level: &str, log_file: Option<&Path>) -> eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .wrap_err_with(|| format!("invalid log level '{level}'"))?;

    let mut layers = Vec::new();
    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);
    layers.push(if json {
        console.json().boxed()
    } else {
        console.compact().boxed()
    });

    if let Some(path) = log_file {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .ok_or_else(|| eyre::eyre!("--log-file needs a file name: {}", path.display()))?;
        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()?;
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> eyre::Result<Arc<Catalog>> {
    let catalog = match path {
        Some(p) => {
            let file = jammer_config::load_catalog_file(p)
                .map_err(|e| CalcError::Config(format!("{e:#}")))?;
            Catalog::try_from(file)?
        }
        None => Catalog::builtin()?,
    };
    tracing::info!(
        source = %path.map_or_else(|| "builtin".to_string(), |p| p.display().to_string()),
        range_min = catalog.range.min_mhz,
        range_max = catalog.range.max_mhz,
        "catalog loaded"
    );
    Ok(Arc::new(catalog))
}

fn emit_notices(json: bool, notices: &[String]) {
    if json {
        return;
    }
    for n in notices {
        eprintln!("notice: {n}");
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    let json = cli.json;
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.cmd {
        Commands::Bands => {
            let session = Session::new(catalog)?;
            if json {
                println!("{}", quote::bands_json(&session));
            } else {
                println!("{}", quote::bands_text(&session));
            }
        }
        Commands::Catalog => {
            if json {
                println!("{}", quote::catalog_json(&catalog));
            } else {
                println!("{}", quote::catalog_text(&catalog));
            }
        }
        Commands::Quote { selection } => {
            let (session, notices) = quote::build_session(catalog, &selection)?;
            let q = session.quote()?;
            emit_notices(json, &notices);
            if json {
                println!("{}", quote::quote_json(&session, &q, &notices));
            } else {
                println!("{}", quote::quote_text(&session, &q));
            }
        }
        Commands::Summary { selection } => {
            let (session, notices) = quote::build_session(catalog, &selection)?;
            let summary = session.summary()?;
            emit_notices(json, &notices);
            if json {
                let v = serde_json::json!({
                    "summary": summary,
                    "price": session.price()?,
                    "notices": notices,
                });
                println!("{v}");
            } else {
                println!("{summary}");
            }
        }
        Commands::Order {
            channel,
            to,
            recipients,
            copy_to,
            selection,
        } => {
            let channel: Channel = channel.into();
            let recipient = to.as_deref().or_else(|| recipients.for_channel(channel));
            let (session, mut notices) = quote::build_session(catalog, &selection)?;
            let mut file_clipboard = copy_to.as_deref().map(FileClipboard::new);
            let clipboard = file_clipboard.as_mut().map(|c| c as &mut dyn Clipboard);
            let outcome = order::place_order(&session, channel, recipient, clipboard)?;
            notices.extend(outcome.notices.iter().cloned());
            emit_notices(json, &notices);
            if json {
                let mut v = order::order_json(&outcome, copy_to.as_deref());
                v["notices"] = serde_json::json!(notices);
                println!("{v}");
            } else {
                println!("{}", order::order_text(&outcome));
            }
        }
    }
    Ok(())
}

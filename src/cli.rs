//! Command-line front end: one validation, optional selections, save and watch.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::highlight::HighlightRange;
use crate::request::{DocumentRef, SourceMethod, ValidationRequest};
use crate::session::{read_document, run_validation, watch_file, Trigger, ValidationSession};
use crate::transport::HttpTransport;
use crate::view::terminal::{write_selection, write_view};

/// Entry point of `csl-validate`
pub async fn run() -> Result<ExitCode> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let transport = Arc::new(HttpTransport::new()?);
    let session: Arc<Mutex<ValidationSession>> =
        Arc::new(Mutex::new(ValidationSession::new(&config)));

    let (request, trigger) = match initial_request(&config, &session).await? {
        Some(initial) => initial,
        None => anyhow::bail!(
            "Nothing to validate: pass a document, --stdin or a --link with a url parameter"
        ),
    };

    run_validation(&session, transport.as_ref(), request, trigger).await;

    let failed = {
        let mut session = session.lock().await;
        report(&mut session, &config)?;
        session.state().is_failure()
    };

    if config.watch {
        if let Some(path) = &config.document {
            let json = config.json;
            watch_file(session, transport, PathBuf::from(path), move |session| {
                if let Err(e) = print_view(session, json) {
                    log::error!("Failed to print results: {}", e);
                }
            })
            .await?;
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Document from the command line, or the page link's startup parameters
async fn initial_request(
    config: &Config,
    session: &Mutex<ValidationSession>,
) -> Result<Option<(ValidationRequest, Trigger)>> {
    let schema_version = config.effective_schema_version();

    let document = if config.read_stdin {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read document from stdin")?;
        Some(DocumentRef::Text(text))
    } else if let Some(document) = &config.document {
        Some(match config.method {
            SourceMethod::Url => DocumentRef::Url(document.clone()),
            SourceMethod::Text => DocumentRef::Text(document.clone()),
            SourceMethod::File => read_document(Path::new(document)).await?,
        })
    } else {
        None
    };

    if let Some(document) = document {
        let request = ValidationRequest::new(document, schema_version);
        return Ok(Some((request, Trigger::Button)));
    }

    let startup = session.lock().await.startup();
    Ok(startup.map(|request| (request, Trigger::StartupLink)))
}

fn print_view(session: &ValidationSession, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, session.view())?;
        writeln!(out)?;
    } else {
        write_view(&mut out, session.view())?;
    }
    Ok(())
}

fn report(session: &mut ValidationSession, config: &Config) -> Result<()> {
    if config.json {
        for &index in &config.selections {
            if let Err(e) = session.select_diagnostic(index) {
                log::warn!("{}", e);
            }
        }
        print_view(session, true)?;
    } else {
        print_view(session, false)?;
        for &index in &config.selections {
            match session.select_diagnostic(index) {
                Ok(range) => {
                    let excerpt = selected_excerpt(session, range);
                    let stdout = io::stdout();
                    write_selection(
                        &mut stdout.lock(),
                        session.view(),
                        range.start_line + 1,
                        &excerpt,
                    )?;
                }
                Err(e) => log::warn!("{}", e),
            }
        }
    }

    if let Some(dir) = &config.save_dir {
        match session.save() {
            Some(artifact) => {
                let path = artifact.write_to(dir)?;
                println!("Saved {}", path.display());
            }
            None => log::warn!("Nothing to save: the validator returned no source"),
        }
    }

    log::info!("Shareable link: {}", session.address().current());
    Ok(())
}

/// Whole lines spanned by a highlight, for display
fn selected_excerpt(session: &ValidationSession, range: HighlightRange) -> String {
    let Some(editor) = session.editor() else {
        return String::new();
    };
    editor.slice(HighlightRange {
        start_line: range.start_line,
        start_column: 0,
        end_line: range.end_line,
        end_column: u32::MAX,
    })
}

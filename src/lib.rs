use crate::error::Error;
use crate::form::{
    draft::{FieldEdit, Helpful},
    surface::{FormSurface, SubmitOutcome},
    FORMS,
};
use crate::notify::TerminalNotifier;
use crate::route::route_infallible;
use crate::state::SharedState;
use crate::submit::HttpSubmitter;
use clap::{Args, Parser, Subcommand};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use url::Url;

pub mod error;
pub mod form;
pub mod manifest;
pub mod notify;
mod pages;
mod render;
mod req;
mod route;
mod state;
pub mod submit;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the site locally, accepting form posts in place of the hosted form backend
    Serve(ServeArgs),

    /// Write the static form declarations the build-time crawler scans
    Manifest {
        /// Where the declarations are written, it must end up in the published site
        /// but is never linked from any page.
        #[arg(short, long, default_value = "static/forms.html")]
        output: PathBuf,
    },

    /// Verify an existing declarations file covers every field the site submits
    Check { path: PathBuf },

    /// Print the declared forms as json, for generators written in other tools
    Fields,

    /// Send one feedback submission from the terminal
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// The socket address this service will bind on.
    #[arg(short, long, env = "SITEFEEDBACK_LOCAL_ADDR", default_value = "127.0.0.1:3000")]
    pub local_addr: SocketAddr,

    /// Number of received submissions kept in memory and shown at `/submissions`.
    #[arg(short, long, default_value = "100")]
    pub inbox_size: usize,
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Origin of the site, submissions are posted to its root path.
    #[arg(short, long, env = "SITEFEEDBACK_SITE", default_value = "http://127.0.0.1:3000/")]
    pub site: Url,

    /// Address recorded as the page the feedback is about, defaults to the path and query
    /// of `--site`, matching what the panel records on that page.
    #[arg(short, long)]
    pub page: Option<String>,

    #[arg(long, value_enum)]
    pub helpful: Option<Helpful>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub feedback: Option<String>,
}

impl SubmitArgs {
    fn edits(&self) -> Vec<FieldEdit> {
        let mut edits: Vec<FieldEdit> = self.helpful.map(FieldEdit::Helpful).into_iter().collect();
        edits.extend(self.first_name.clone().map(FieldEdit::FirstName));
        edits.extend(self.last_name.clone().map(FieldEdit::LastName));
        edits.extend(self.email.clone().map(FieldEdit::Email));
        edits.extend(self.feedback.clone().map(FieldEdit::AdditionalFeedback));
        edits
    }
}

/// Runs the chosen command. A rejected submission has already been reported by the
/// notifier, so it comes back as a failure exit code rather than an `Error`.
pub async fn inner_main(args: Arguments) -> Result<ExitCode, Error> {
    match args.command {
        Command::Serve(args) => serve(args).await?,
        Command::Manifest { output } => manifest::write(&output, FORMS)?,
        Command::Check { path } => {
            let html = std::fs::read_to_string(&path)?;
            for form in FORMS {
                manifest::check(&html, form)?;
                log::info!("{} declares every field of {}", path.display(), form.form_name);
            }
        }
        Command::Fields => println!("{}", serde_json::to_string_pretty(FORMS)?),
        Command::Submit(args) => {
            if !submit_once(args).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn serve(args: ServeArgs) -> Result<(), Error> {
    let listener = TcpListener::bind(args.local_addr).await?;
    let shared_state = Arc::new(SharedState::new(args.inbox_size));

    log::info!("Listening on http://{}", listener.local_addr()?);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let (stream, remote) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    log::warn!("accept failed: {}", e);
                    continue;
                }
            },
            _ = &mut shutdown => {
                log::info!("shutting down");
                return Ok(());
            }
        };

        let shared_state = shared_state.clone();
        tokio::spawn(async move {
            let service = service_fn(move |req| route_infallible(req, shared_state.clone()));
            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                log::debug!("connection from {} failed: {}", remote, e);
            }
        });
    }
}

/// The page address the panel would record for `site`.
fn page_address(site: &Url) -> &str {
    &site[url::Position::BeforePath..url::Position::AfterQuery]
}

/// Returns whether the submission was sent, failures are reported through `TerminalNotifier`.
async fn submit_once(args: SubmitArgs) -> Result<bool, Error> {
    let page = args
        .page
        .clone()
        .unwrap_or_else(|| page_address(&args.site).to_string());
    let submitter = HttpSubmitter::new(&args.site)?;
    log::debug!("submitting to {}", submitter.endpoint());

    let mut surface = FormSurface::new(page, submitter, TerminalNotifier);
    surface.toggle();
    for edit in args.edits() {
        surface.edit(edit);
    }

    match surface.submit().await {
        SubmitOutcome::Sent | SubmitOutcome::NotOpen => Ok(true),
        SubmitOutcome::Failed(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_args(site: &str) -> SubmitArgs {
        SubmitArgs {
            site: Url::parse(site).unwrap(),
            page: None,
            helpful: Some(Helpful::Yes),
            first_name: None,
            last_name: None,
            email: None,
            feedback: Some("typo in step 2".into()),
        }
    }

    #[test]
    fn default_page_is_what_the_panel_records() {
        let site = Url::parse("https://docs.example.netlify.app/guide?lang=en").unwrap();
        assert_eq!(page_address(&site), "/guide?lang=en");
        let site = Url::parse("http://127.0.0.1:3000").unwrap();
        assert_eq!(page_address(&site), "/");
    }

    #[tokio::test]
    async fn failed_submission_is_not_an_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let args = submit_args(&format!("http://{addr}/"));
        assert!(!submit_once(args).await.unwrap());
    }
}

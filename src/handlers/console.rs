//! Console front end: reads commands from stdin, drives the session, and
//! prints the catalog, notices and preview state.

use crate::{
    formatting::{format_size, format_timestamp, is_previewable},
    handlers::commands::{self, Command, HELP},
    models::{object::ObjectRecord, upload::UploadFile},
    services::{
        controller::{Confirm, DeleteOutcome},
        downloads::save_download,
        notifications::NotificationState,
        session::Session,
    },
};
use anyhow::Result;
use async_trait::async_trait;
use std::{
    fmt::Write as _,
    io::Write as _,
    path::PathBuf,
    sync::Arc,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};
use tracing::warn;

/// Stdin line reader shared by the command loop and confirmation prompts.
pub type SharedLines = Arc<Mutex<Lines<BufReader<Stdin>>>>;

pub fn stdin_lines() -> SharedLines {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
}

/// Asks on stdout and reads the answer from stdin. Anything but `y`/`yes`
/// (including end of input) declines.
pub struct StdinConfirm {
    lines: SharedLines,
}

impl StdinConfirm {
    pub fn new(lines: SharedLines) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        let _ = std::io::stdout().flush();

        let answer = match self.lines.lock().await.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return false,
            Err(err) => {
                warn!(error = %err, "could not read confirmation");
                return false;
            }
        };
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    session: Session,
    download_dir: PathBuf,
    lines: SharedLines,
}

impl Console {
    pub fn new(session: Session, download_dir: PathBuf, lines: SharedLines) -> Self {
        Self {
            session,
            download_dir,
            lines,
        }
    }

    /// Read-eval loop until `quit` or end of input. Shuts the session down on exit.
    pub async fn run(&self) -> Result<()> {
        let _ = self.session.init().await;
        print!("{}", render_catalog(&self.session.controller().catalog().objects()));
        print!("{}", render_notices(&self.session.controller().notification_state()));

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let next = self.lines.lock().await.next_line().await?;
            let Some(line) = next else {
                break;
            };

            let command = match commands::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            };

            if self.handle(command).await? == Flow::Quit {
                break;
            }
            print!("{}", render_notices(&self.session.controller().notification_state()));
        }

        self.session.shutdown();
        Ok(())
    }

    pub async fn handle(&self, command: Command) -> Result<Flow> {
        let controller = self.session.controller();
        match command {
            Command::Nothing => {}
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(Flow::Quit),
            Command::List => {
                if controller.catalog().is_loading() {
                    println!("(refresh in progress)");
                }
                print!("{}", render_catalog(&controller.catalog().objects()));
            }
            Command::Refresh => {
                if controller.refresh_catalog().await.is_ok() {
                    print!("{}", render_catalog(&controller.catalog().objects()));
                }
            }
            Command::Select(path) => {
                self.select(path).await;
            }
            Command::Upload(path) => {
                if let Some(path) = path {
                    if !self.select(path).await {
                        return Ok(Flow::Continue);
                    }
                }
                let _ = controller.upload_selected().await;
            }
            Command::Get(key) => {
                if let Ok(bytes) = controller.download(&key).await {
                    match save_download(&self.download_dir, &key, &bytes).await {
                        Ok(path) => println!("saved to {}", path.display()),
                        Err(err) => {
                            warn!(key = %key, error = %err, "could not save download");
                            println!("could not save {}: {}", key, err);
                        }
                    }
                }
            }
            Command::Remove(key) => {
                if let Ok(DeleteOutcome::Declined) = controller.delete(&key).await {
                    println!("cancelled");
                }
            }
            Command::Preview(key) => {
                if self.session.open_preview(&key) {
                    print!("{}", self.render_preview());
                } else {
                    println!("{} cannot be previewed", key);
                }
            }
            Command::Close => self.session.close_preview(),
            Command::Url(key) => println!("{}", controller.preview_url(&key)),
            Command::Status => {
                match controller.selected_file_name() {
                    Some(name) => println!("selected: {}", name),
                    None => println!("selected: (none)"),
                }
                if controller.is_uploading() {
                    println!("upload in progress");
                }
                print!("{}", self.render_preview());
            }
        }
        Ok(Flow::Continue)
    }

    /// Load a file into the upload selection. False if it could not be read.
    async fn select(&self, path: PathBuf) -> bool {
        match UploadFile::from_path(&path).await {
            Ok(file) => {
                println!("selected {} ({})", file.name, format_size(file.len() as u64));
                self.session.controller().select_file(file);
                true
            }
            Err(err) => {
                println!("could not read {}: {}", path.display(), err);
                false
            }
        }
    }

    fn render_preview(&self) -> String {
        match self.session.active_preview() {
            Some(preview) => format!(
                "preview [{}] {}\n  {}\n",
                preview.kind.map(|k| k.label()).unwrap_or("unknown"),
                preview.key,
                preview.url
            ),
            None => "preview: (closed)\n".to_string(),
        }
    }
}

/// Tabular listing of the catalog in server order.
pub fn render_catalog(objects: &[ObjectRecord]) -> String {
    if objects.is_empty() {
        return "no objects\n".to_string();
    }

    let width = objects
        .iter()
        .map(|o| o.key.chars().count())
        .max()
        .unwrap_or(0)
        .max(3);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<width$}  {:>10}  {:<24}  ETAG",
        "KEY", "SIZE", "MODIFIED"
    );
    for obj in objects {
        let marker = if is_previewable(&obj.key) { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:<width$}  {:>10}  {:<24}  {}",
            marker,
            obj.key,
            format_size(obj.size),
            format_timestamp(&obj.last_modified),
            obj.etag
        );
    }
    out
}

pub fn render_notices(state: &NotificationState) -> String {
    let mut out = String::new();
    if let Some(text) = &state.success_text {
        let _ = writeln!(out, "ok: {}", text);
    }
    if let Some(text) = &state.error_text {
        let _ = writeln!(out, "error: {}", text);
    }
    out
}

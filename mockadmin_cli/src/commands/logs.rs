//! Request log commands: one page, or an interactive pager

use crate::relay::RelayClient;
use crate::render;
use anyhow::Result;
use console::{style, Key, Term};
use mockadmin_common::{LogView, RenderedLog};

/// Log display options
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub filter: Option<String>,
    pub page: usize,
    pub full: bool,
    pub page_size: usize,
}

/// Print a single page of logs
pub async fn show(client: &RelayClient, opts: LogOptions) -> Result<()> {
    let view = load_view(client, &opts).await?;
    let page = view.current().map(RenderedLog::from);
    println!("{}", render::log_page(&page, opts.full));
    Ok(())
}

/// Page through logs with single-key commands
pub async fn interactive(client: &RelayClient, opts: LogOptions) -> Result<()> {
    let mut view = load_view(client, &opts).await?;
    let term = Term::stdout();
    let mut status: Option<String> = None;

    loop {
        term.clear_screen()?;
        if !view.filter().is_empty() {
            println!("Filter: {}\n", style(view.filter()).cyan());
        }
        let page = view.current().map(RenderedLog::from);
        println!("{}", render::log_page(&page, opts.full));
        if let Some(message) = status.take() {
            println!("{}", style(message).red());
        }
        println!(
            "{}",
            style("[n]ext  [p]rev  [/] filter  [r]efresh  [q]uit").dim()
        );

        match PagerAction::from_key(read_key(&term).await?) {
            PagerAction::Next => view.next_page(),
            PagerAction::Prev => view.prev_page(),
            PagerAction::Filter => {
                term.write_str("Path prefix: ")?;
                let filter = read_line(&term).await?;
                view.set_filter(&filter);
            }
            // A failed refresh keeps the entries already on screen
            PagerAction::Refresh => match client.logs().await {
                Ok(entries) => view.set_entries(entries),
                Err(e) => status = Some(format!("Refresh failed: {:#}", e)),
            },
            PagerAction::Quit => break,
            PagerAction::None => {}
        }
    }

    Ok(())
}

/// What a key press asks the pager to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagerAction {
    Next,
    Prev,
    Filter,
    Refresh,
    Quit,
    None,
}

impl PagerAction {
    fn from_key(key: Key) -> Self {
        match key {
            Key::Char('n') | Key::ArrowRight => PagerAction::Next,
            Key::Char('p') | Key::ArrowLeft => PagerAction::Prev,
            Key::Char('/') => PagerAction::Filter,
            Key::Char('r') => PagerAction::Refresh,
            Key::Char('q') | Key::Escape => PagerAction::Quit,
            _ => PagerAction::None,
        }
    }
}

// Terminal reads block, so they run off the async worker threads

async fn read_key(term: &Term) -> Result<Key> {
    let term = term.clone();
    Ok(tokio::task::spawn_blocking(move || term.read_key()).await??)
}

async fn read_line(term: &Term) -> Result<String> {
    let term = term.clone();
    Ok(tokio::task::spawn_blocking(move || term.read_line()).await??)
}

async fn load_view(client: &RelayClient, opts: &LogOptions) -> Result<LogView> {
    let mut view = LogView::new(client.logs().await?, opts.page_size);
    if let Some(filter) = &opts.filter {
        view.set_filter(filter);
    }
    view.go_to(opts.page);
    Ok(view)
}

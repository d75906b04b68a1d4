//! turnStyle CLI
//!
//! Drives the content script and the style library against a JSON file that
//! stands in for the browser's synced storage.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see every
//! storage call and request.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use turnstyle_content::editor::append_importants;
use turnstyle_content::{ContentConfig, ContentScript};
use turnstyle_dom::DomTree;
use turnstyle_storage::{InstallReason, JsonFileStorage, Library, install_defaults};

/// turnStyle: per-site user stylesheets
#[derive(Parser, Debug)]
#[command(name = "turnstyle")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Seed the default style, as on first install
    turnstyle install

    # Show which styles a page gets
    turnstyle resolve https://example.com/blog/post1

    # Send a popup request to a page
    turnstyle send https://example.com '{"instruction":"saveStyle","styleName":"dark","styleRules":"body { background: #000; }"}'

    # Manage the library
    turnstyle styles
    turnstyle edit-style dark "body { background: #111; }"
    turnstyle rename-style dark "dark mode"
    turnstyle delete-url https://example.com
"#)]
struct Cli {
    /// JSON file holding the stored settings
    #[arg(long, value_name = "FILE", default_value = "turnstyle.json", global = true)]
    store: PathBuf,

    /// Content script configuration (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Override the storage timeout, in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a page and print its settings and applied styles
    Resolve {
        /// Full page URL
        url: String,
    },
    /// Load a page, handle one JSON request and print the response
    Send {
        /// Full page URL
        url: String,
        /// Request object, e.g. '{"instruction":"getPageSettings"}'
        request: String,
    },
    /// List saved styles and the URLs using them
    Styles,
    /// List saved URLs and their styles
    Urls,
    /// Save a new style
    AddStyle {
        /// Style name
        name: String,
        /// CSS rules
        rules: String,
        /// Mark every declaration !important
        #[arg(long)]
        important: bool,
    },
    /// Create a style or replace its rules
    EditStyle {
        /// Style name
        name: String,
        /// CSS rules
        rules: String,
        /// Mark every declaration !important
        #[arg(long)]
        important: bool,
    },
    /// Add a style to a URL's list
    AddUrl {
        /// URL prefix
        url: String,
        /// Style name
        style: String,
    },
    /// Remove a style from a URL's list
    RemoveFromUrl {
        /// URL prefix
        url: String,
        /// Style name
        style: String,
    },
    /// Delete a style everywhere
    DeleteStyle {
        /// Style name
        name: String,
    },
    /// Rename a style everywhere
    RenameStyle {
        /// Current name
        old: String,
        /// New name
        new: String,
    },
    /// Delete a URL and its list
    DeleteUrl {
        /// URL prefix
        url: String,
    },
    /// Move a URL's list to a new URL
    RenameUrl {
        /// Current URL
        old: String,
        /// New URL
        new: String,
    },
    /// Run the install hook
    Install {
        /// Why the hook fired
        #[arg(long, value_enum, default_value_t = Reason::Install)]
        reason: Reason,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Reason {
    Install,
    Update,
}

impl From<Reason> for InstallReason {
    fn from(reason: Reason) -> Self {
        match reason {
            Reason::Install => Self::Install,
            Reason::Update => Self::Update,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ContentConfig::from_file(path)?,
        None => ContentConfig::default(),
    };
    if let Some(ms) = cli.timeout_ms {
        config.storage_timeout_ms = ms;
    }
    let limit = config.storage_timeout();
    let storage = JsonFileStorage::new(&cli.store);
    log::debug!("using store {}", storage.path().display());

    match cli.command {
        Command::Resolve { url } => {
            let script = load_page(&url, storage, config).await?;
            print_page(&script);
        }
        Command::Send { url, request } => {
            let mut script = load_page(&url, storage, config).await?;
            let response = script.handle_json(&request).await;
            println!("{response}");
        }
        Command::Styles => {
            let library = Library::new(storage, limit);
            for style in library.styles().await? {
                println!("{}", style.name.bold());
                for url in &style.urls {
                    println!("  {}", url.cyan());
                }
                println!("{}", style.rules.dimmed());
            }
        }
        Command::Urls => {
            let library = Library::new(storage, limit);
            for (url, names) in library.load().await?.pages {
                println!("{} {}", url.cyan(), names.join(", "));
            }
        }
        Command::AddStyle {
            name,
            rules,
            important,
        } => {
            let rules = if important {
                append_importants(&rules)
            } else {
                rules
            };
            Library::new(storage, limit).add_style(&name, &rules).await?;
            done(&format!("saved '{name}'"));
        }
        Command::EditStyle {
            name,
            rules,
            important,
        } => {
            let rules = if important {
                append_importants(&rules)
            } else {
                rules
            };
            Library::new(storage, limit).save_style(&name, &rules).await?;
            done(&format!("updated '{name}'"));
        }
        Command::AddUrl { url, style } => {
            Library::new(storage, limit)
                .add_url_to_style(&url, &style)
                .await?;
            done(&format!("'{style}' added to {url}"));
        }
        Command::RemoveFromUrl { url, style } => {
            Library::new(storage, limit)
                .remove_style_from_url(&url, &style)
                .await?;
            done(&format!("'{style}' removed from {url}"));
        }
        Command::DeleteStyle { name } => {
            Library::new(storage, limit).delete_style(&name).await?;
            done(&format!("deleted '{name}'"));
        }
        Command::RenameStyle { old, new } => {
            Library::new(storage, limit).rename_style(&old, &new).await?;
            done(&format!("renamed '{old}' to '{new}'"));
        }
        Command::DeleteUrl { url } => {
            Library::new(storage, limit).delete_url(&url).await?;
            done(&format!("deleted {url}"));
        }
        Command::RenameUrl { old, new } => {
            Library::new(storage, limit).rename_url(&old, &new).await?;
            done(&format!("moved {old} to {new}"));
        }
        Command::Install { reason } => {
            if install_defaults(&storage, reason.into(), limit).await? {
                done("seeded default styles");
            } else {
                println!("nothing to seed");
            }
        }
    }
    Ok(())
}

async fn load_page(
    url: &str,
    storage: JsonFileStorage,
    config: ContentConfig,
) -> anyhow::Result<ContentScript<JsonFileStorage>> {
    ContentScript::load(url, DomTree::html_document(), storage, config)
        .await
        .with_context(|| format!("loading {url}"))
}

/// Print page settings and the resulting `<head>` (for `resolve`)
fn print_page(script: &ContentScript<JsonFileStorage>) {
    let settings = script.settings();
    println!("=== Page ===");
    println!("origin:     {}", settings.origin);
    println!(
        "active URL: {}{}",
        settings.active_url.cyan(),
        if settings.matched { "" } else { " (no saved settings)" }
    );

    println!("\n=== Styles ===");
    for name in &settings.page_styles {
        if settings.styles.contains_key(name) {
            println!("  {}", name.green());
        } else {
            println!("  {} (not saved)", name.yellow());
        }
    }

    println!("\n=== Head ===");
    let dom = script.dom();
    if let Some(head) = dom.head() {
        println!("{}", dom.outer_html(head));
    }
}

fn done(message: &str) {
    println!("{} {message}", "ok".green().bold());
}

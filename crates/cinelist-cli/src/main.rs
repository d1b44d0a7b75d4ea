//! Cinelist CLI - local accounts and movie wishlist from the terminal
//!
//! Shares the persisted state layout of the browser client: accounts, login
//! session, remembered email, catalog API key override and wishlist.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cinelist_core::catalog::{ApiKeySource, CatalogEntry, CatalogQuery, DiscoverFilter};
use cinelist_core::{Cinelist, FileStorage, Locale, SettingsManager, StoreError};

/// Cinelist - movie wishlist with local accounts
#[derive(Parser, Debug)]
#[command(name = "cinelist")]
#[command(version = "0.1.0")]
#[command(about = "Cinelist - local accounts and movie wishlist")]
struct Args {
    /// Directory holding storage.json and settings.json
    #[arg(long, env = "CINELIST_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Default catalog API key (used when no login override is active)
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Catalog API base URL
    #[arg(long, env = "TMDB_BASE_URL")]
    base_url: Option<String>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a local account
    Register {
        email: String,
        /// Prompted for when omitted
        password: Option<String>,
    },
    /// Log in; the password also becomes the catalog API key
    Login {
        /// Defaults to the remembered email
        email: Option<String>,
        /// Prompted for when omitted
        password: Option<String>,
        /// Remember the email for the next login
        #[arg(long)]
        remember: bool,
    },
    /// Log out and restore the default catalog API key
    Logout,
    /// Show session and catalog key status
    Status,
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistCommand,
    },
    /// Print the resolved catalog request for a query
    Catalog {
        #[command(subcommand)]
        query: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum WishlistCommand {
    /// List saved movies in add order
    List,
    /// Add a movie, or remove it if already saved
    Toggle {
        /// Catalog entry as JSON (overrides the individual flags)
        #[arg(long)]
        json: Option<String>,
        #[arg(long, required_unless_present = "json")]
        id: Option<i64>,
        #[arg(long, required_unless_present = "json")]
        title: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        rating: f64,
        #[arg(long, default_value = "")]
        release_date: String,
        #[arg(long, default_value = "")]
        overview: String,
        #[arg(long)]
        poster_path: Option<String>,
    },
    /// Remove a movie by id
    Remove { id: i64 },
    /// Remove every movie
    Clear,
    /// Show total, average rating and latest addition
    Stats,
    /// Print a JSON backup of the wishlist
    Export,
    /// Replace the wishlist with a JSON backup
    Import { file: PathBuf },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    Popular {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    NowPlaying {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    TopRated {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Upcoming {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Discover {
        #[arg(long)]
        genres: Option<String>,
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long)]
        min_rating: Option<f64>,
        #[arg(long)]
        max_rating: Option<f64>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        page: Option<u32>,
    },
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Genres,
}

impl CatalogCommand {
    fn into_query(self) -> CatalogQuery {
        match self {
            Self::Popular { page } => CatalogQuery::Popular { page },
            Self::NowPlaying { page } => CatalogQuery::NowPlaying { page },
            Self::TopRated { page } => CatalogQuery::TopRated { page },
            Self::Upcoming { page } => CatalogQuery::Upcoming { page },
            Self::Discover {
                genres,
                sort_by,
                min_rating,
                max_rating,
                language,
                year,
                page,
            } => CatalogQuery::Discover(DiscoverFilter {
                with_genres: genres,
                sort_by,
                vote_average_gte: min_rating,
                vote_average_lte: max_rating,
                with_original_language: language,
                year,
                page,
            }),
            Self::Search { query, page } => CatalogQuery::Search { query, page },
            Self::Genres => CatalogQuery::Genres,
        }
    }
}

/// `RUST_LOG` wins when it parses; otherwise info, or warn with `--quiet`
fn log_filter(rust_log: Option<&str>, quiet: bool) -> EnvFilter {
    let default = if quiet { "warn" } else { "info" };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

fn prompt_password(provided: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match provided {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

/// Turn user-facing errors into their localized message
fn localize(err: StoreError, locale: Locale) -> Box<dyn std::error::Error> {
    if err.is_user_error() {
        err.user_message(locale).into()
    } else {
        Box::new(err)
    }
}

fn run_wishlist(
    app: &mut Cinelist,
    action: WishlistCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WishlistCommand::List => {
            for item in app.wishlist.items() {
                println!(
                    "{:>8}  {:<40}  {:>4.1}  {}",
                    item.id, item.title, item.rating, item.release_date
                );
            }
        }
        WishlistCommand::Toggle {
            json,
            id,
            title,
            rating,
            release_date,
            overview,
            poster_path,
        } => {
            let entry = match json {
                Some(raw) => serde_json::from_str::<CatalogEntry>(&raw)?,
                None => CatalogEntry {
                    id: id.ok_or("--id is required")?,
                    title: title.ok_or("--title is required")?,
                    overview,
                    poster_path,
                    backdrop_path: None,
                    vote_average: rating,
                    release_date,
                    genre_ids: None,
                },
            };
            app.wishlist.toggle(&entry)?;
            if app.wishlist.contains(entry.id) {
                println!("Added \"{}\" to the wishlist", entry.title);
            } else {
                println!("Removed \"{}\" from the wishlist", entry.title);
            }
        }
        WishlistCommand::Remove { id } => {
            app.wishlist.remove(id)?;
        }
        WishlistCommand::Clear => {
            app.wishlist.clear()?;
        }
        WishlistCommand::Stats => {
            let stats = app.wishlist.stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        WishlistCommand::Export => {
            println!("{}", app.wishlist.export()?);
        }
        WishlistCommand::Import { file } => {
            let snapshot = std::fs::read_to_string(&file)?;
            let count = app.wishlist.import(&snapshot)?;
            info!("Imported {} wishlist items from {:?}", count, file);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), args.quiet))
        .with_writer(std::io::stderr)
        .init();

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => FileStorage::default_dir()?,
    };

    let mut settings = SettingsManager::new(&data_dir).get().clone();
    if let Some(api_key) = args.api_key {
        settings.catalog.api_key = Some(api_key);
    }
    if let Some(base_url) = args.base_url {
        settings.catalog.base_url = base_url;
    }
    let mut app = Cinelist::open_with_settings(&data_dir, settings)
        .map_err(|e| format!("Failed to open cinelist state: {}", e))?;
    debug!("Using {} at {:?}", app.storage_backend(), data_dir);
    let locale = app.settings().locale;

    match args.command {
        Command::Register { email, password } => {
            let password = prompt_password(password)?;
            app.accounts
                .register(&email, &password)
                .map_err(|e| localize(e, locale))?;
            println!("Registered {}", email);
        }
        Command::Login {
            email,
            password,
            remember,
        } => {
            let email = email
                .or_else(|| app.accounts.remembered_identifier().map(str::to_string))
                .ok_or("No email given and none remembered")?;
            let password = prompt_password(password)?;
            app.accounts
                .login(&email, &password, remember)
                .map_err(|e| localize(e, locale))?;
            println!("Logged in as {}", email);
        }
        Command::Logout => {
            app.accounts.logout()?;
            println!("Logged out");
        }
        Command::Status => {
            match app.accounts.current_account() {
                Some(account) => println!("Logged in as {}", account.identifier),
                None => println!("Not logged in"),
            }
            if let Some(email) = app.accounts.remembered_identifier() {
                println!("Remembered email: {}", email);
            }
            let source = match app.catalog.source()? {
                ApiKeySource::Override => "login override",
                ApiKeySource::Default => "configured default",
                ApiKeySource::Missing => "not configured",
            };
            println!("Catalog API key: {}", source);
            println!("Wishlist: {} movies", app.wishlist.items().len());
            if let Some(dir) = app.data_dir() {
                println!("Data directory: {}", dir.display());
            }
        }
        Command::Wishlist { action } => run_wishlist(&mut app, action)?,
        Command::Catalog { query } => {
            let request = query.into_query().build(&app.catalog)?;
            println!("GET {}", request.url);
            for (key, value) in &request.params {
                let shown = if key == "api_key" { "[REDACTED]" } else { value.as_str() };
                println!("  {}={}", key, shown);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        let args = Args::try_parse_from(["cinelist", "login", "a@b.com", "secret1", "--remember"]).unwrap();
        match args.command {
            Command::Login {
                email,
                password,
                remember,
            } => {
                assert_eq!(email.as_deref(), Some("a@b.com"));
                assert_eq!(password.as_deref(), Some("secret1"));
                assert!(remember);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_toggle_requires_id_without_json() {
        assert!(Args::try_parse_from(["cinelist", "wishlist", "toggle", "--title", "X"]).is_err());
        assert!(Args::try_parse_from([
            "cinelist",
            "wishlist",
            "toggle",
            "--json",
            r#"{"id":1,"title":"X","poster_path":null}"#
        ])
        .is_ok());
    }

    #[test]
    fn test_discover_maps_to_filter() {
        let args = Args::try_parse_from([
            "cinelist",
            "catalog",
            "discover",
            "--genres",
            "28",
            "--min-rating",
            "7",
        ])
        .unwrap();

        let Command::Catalog { query } = args.command else {
            panic!("expected catalog command");
        };
        match query.into_query() {
            CatalogQuery::Discover(filter) => {
                assert_eq!(filter.with_genres.as_deref(), Some("28"));
                assert_eq!(filter.vote_average_gte, Some(7.0));
                assert_eq!(filter.page, None);
            }
            other => panic!("unexpected query: {:?}", other),
        }
    }

    #[test]
    fn test_log_filter_prefers_rust_log() {
        use tracing_subscriber::filter::LevelFilter;

        assert_eq!(log_filter(Some("debug"), true).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("trace"), false).max_level_hint(), Some(LevelFilter::TRACE));
        assert_eq!(log_filter(None, false).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(None, true).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("cinelist=loud"), true).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_localize_user_errors() {
        let err = localize(StoreError::DuplicateAccount, Locale::Ko);
        assert_eq!(err.to_string(), "이미 가입된 이메일입니다.");
    }
}

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use discodiary::{
    cli, config,
    spotify::DEFAULT_SEARCH_LIMIT,
    types::{DecadeFilter, SortKey},
    utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the catalog proxy server
    Serve,

    /// Search Spotify for albums
    Search(SearchOptions),

    /// Add an album to your collection by its Spotify id
    Add(AlbumIdOption),

    /// List the albums in your collection
    Albums(AlbumsOptions),

    /// Show details of one album
    Show(AlbumIdOption),

    /// Rate an album from 1 to 5 stars (0 clears the rating)
    Rate(RateOptions),

    /// Write notes for an album (an empty text clears them)
    Notes(NotesOptions),

    /// Remove an album from your collection
    Remove(RemoveOptions),

    /// Open an album in Spotify
    Open(AlbumIdOption),

    /// Show and reorder your album rankings
    Rankings(RankingsOptions),

    /// List the artists in your collection
    Artists,

    /// Statistics about your collection
    Stats,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Album name or artist to search for
    pub query: String,

    /// Number of results
    #[clap(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: u32,

    /// Add the result with this number (as listed) to your collection
    #[clap(long)]
    pub add: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumIdOption {
    /// Spotify album id
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumsOptions {
    /// Sort by dateAdded, rating, year, artist or name
    #[clap(long, default_value = "dateAdded", value_parser = utils::parse_sort_key)]
    pub sort: SortKey,

    /// Only albums of one decade (e.g. 1990 or 1990s), or all
    #[clap(long, default_value = "all", value_parser = utils::parse_decade_filter)]
    pub decade: DecadeFilter,

    /// Show at most this many albums
    #[clap(long)]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct RateOptions {
    /// Spotify album id
    pub id: String,

    /// Rating from 0 (unrated) to 5
    #[clap(value_parser = utils::parse_rating)]
    pub rating: u8,
}

#[derive(Parser, Debug, Clone)]
pub struct NotesOptions {
    /// Spotify album id
    pub id: String,

    /// Your thoughts about this album
    #[clap(default_value = "")]
    pub notes: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RemoveOptions {
    /// Spotify album id
    pub id: String,

    /// Skip the confirmation prompt
    #[clap(long, short)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RankingsOptions {
    /// Rank one artist's albums; without a name the default artist is used
    #[clap(long, num_args = 0..=1, default_missing_value = "")]
    pub artist: Option<String>,

    /// Move the album at position FROM to position TO
    #[clap(
        long = "move",
        num_args = 2,
        value_names = ["FROM", "TO"],
        conflicts_with_all = ["up", "down"]
    )]
    pub move_positions: Option<Vec<usize>>,

    /// Move the album at this position one place up
    #[clap(long, conflicts_with = "down")]
    pub up: Option<usize>,

    /// Move the album at this position one place down
    #[clap(long)]
    pub down: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve().await,
        Command::Search(opt) => cli::search(opt.query, opt.limit, opt.add).await,
        Command::Add(opt) => cli::add(opt.id).await,
        Command::Albums(opt) => cli::list_albums(opt.sort, opt.decade, opt.limit).await,
        Command::Show(opt) => cli::show_album(opt.id).await,
        Command::Rate(opt) => cli::rate(opt.id, opt.rating).await,
        Command::Notes(opt) => cli::notes(opt.id, opt.notes).await,
        Command::Remove(opt) => cli::remove(opt.id, opt.yes).await,
        Command::Open(opt) => cli::open(opt.id).await,
        Command::Rankings(opt) => {
            cli::rankings(opt.artist, opt.move_positions, opt.up, opt.down).await
        }
        Command::Artists => cli::artists().await,
        Command::Stats => cli::stats().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

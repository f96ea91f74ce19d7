use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use highspot::api::{domain, groups, items, pitches, requests, users};
use highspot::client::DEFAULT_API_VERSION;
use highspot::http::Transport;
use highspot::query::Fields;
use highspot::Highspot;
use serde_json::Value;

/// highspot - command-line access to the Highspot REST API
///
/// Credentials are read from --username/--password or from the
/// HIGHSPOT_USERNAME and HIGHSPOT_PASSWORD environment variables.
///
/// Examples:
///   highspot me
///   highspot users --list verified --with-fields title,department
///   highspot item <ID> --view report
#[derive(Parser, Debug)]
#[command(author, version = env!("HIGHSPOT_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API username (also via HIGHSPOT_USERNAME)
    #[arg(long, short = 'u', env = "HIGHSPOT_USERNAME", global = true)]
    username: Option<String>,

    /// API password (also via HIGHSPOT_PASSWORD)
    #[arg(
        long,
        short = 'p',
        env = "HIGHSPOT_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    password: Option<String>,

    /// API version used to compose the base URL
    #[arg(long, value_name = "VERSION", default_value = DEFAULT_API_VERSION, global = true)]
    api_version: String,

    /// Base URL override (defaults to https://api-su2.highspot.com/v<VERSION>)
    #[arg(long, env = "HIGHSPOT_BASE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the user making the API call
    Me,

    /// List users
    Users(UsersArgs),

    /// Show a user or its properties
    User(UserArgs),

    /// List the items in a Spot
    Items(ItemsArgs),

    /// Show an item or one of its sub-resources
    Item(ItemArgs),

    /// List groups
    Groups(GroupsArgs),

    /// Show a group
    Group {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// List pitches
    Pitches(PitchesArgs),

    /// Show the domain's custom usage labels
    UsageLabels,

    /// Show the domain's promoted searches
    PromotedSearches(PageArgs),

    /// Show the status or result of an asynchronous request
    Request {
        #[arg(value_name = "ID")]
        id: String,

        /// Show the request result instead of its status
        #[arg(long)]
        result: bool,
    },
}

#[derive(clap::Args, Debug)]
struct UsersArgs {
    /// Filter by email address
    #[arg(long)]
    email: Option<String>,

    /// User list to return: all, unverified or verified
    #[arg(long = "list")]
    list_type: Option<String>,

    /// Extra fields to include (comma-separated)
    #[arg(long, value_delimiter = ',')]
    with_fields: Vec<String>,

    /// Fields to exclude (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exclude_fields: Vec<String>,

    #[arg(long, default_value_t = 0)]
    start: u32,

    #[arg(long, default_value_t = users::DEFAULT_LIMIT)]
    limit: u32,
}

#[derive(clap::Args, Debug)]
struct UserArgs {
    #[arg(value_name = "ID")]
    id: String,

    /// Show all of the user's properties
    #[arg(long, conflicts_with = "property")]
    properties: bool,

    /// Show a single property by name
    #[arg(long, value_name = "NAME")]
    property: Option<String>,
}

#[derive(clap::Args, Debug)]
struct ItemsArgs {
    /// Spot to list items from
    #[arg(long, value_name = "ID")]
    spot: String,

    /// Restrict to a list within the Spot
    #[arg(long, value_name = "ID")]
    list: Option<String>,

    #[arg(long, default_value_t = 0)]
    start: u32,

    #[arg(long, default_value_t = items::DEFAULT_LIMIT)]
    limit: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ItemView {
    Metadata,
    Bookmarks,
    Content,
    Report,
    CmsMetadata,
    Thumbnails,
    Properties,
}

#[derive(clap::Args, Debug)]
struct ItemArgs {
    #[arg(value_name = "ID")]
    id: String,

    /// Which part of the item to show
    #[arg(long, value_enum, default_value_t = ItemView::Metadata, conflicts_with = "property")]
    view: ItemView,

    /// Show a single property by name
    #[arg(long, value_name = "NAME")]
    property: Option<String>,
}

#[derive(clap::Args, Debug)]
struct GroupsArgs {
    /// Role filter: editor, viewer, manager or owner
    #[arg(long)]
    role: Option<String>,

    /// Right filter: edit, view or manage
    #[arg(long)]
    right: Option<String>,

    #[arg(long, default_value_t = 0)]
    start: u32,

    #[arg(long, default_value_t = groups::DEFAULT_LIMIT)]
    limit: u32,
}

#[derive(clap::Args, Debug)]
struct PitchesArgs {
    #[arg(long, default_value_t = 0)]
    start: u32,

    #[arg(long, default_value_t = pitches::DEFAULT_LIMIT)]
    limit: u32,

    /// Sort order: recent_activity, alphabetical or date_created
    #[arg(long)]
    sort_by: Option<String>,
}

#[derive(clap::Args, Debug)]
struct PageArgs {
    #[arg(long)]
    start: Option<u32>,

    #[arg(long)]
    limit: Option<u32>,
}

/// What a command produced.
#[derive(Debug, PartialEq)]
enum Output {
    Json(Value),
    Text(String),
}

fn fields(values: Vec<String>) -> Option<Fields> {
    if values.is_empty() {
        None
    } else {
        Some(Fields::from(values))
    }
}

fn run<T: Transport>(hs: &Highspot<T>, command: Commands) -> highspot::Result<Output> {
    let value = match command {
        Commands::Me => users::me(hs)?,
        Commands::Users(args) => {
            let query = users::UsersQuery {
                email: args.email,
                list_type: args.list_type,
                with_fields: fields(args.with_fields),
                exclude_fields: fields(args.exclude_fields),
                start: args.start,
                limit: args.limit,
            };
            users::get_users(hs, &query)?
        }
        Commands::User(args) => match (args.property, args.properties) {
            (Some(name), _) => users::get_user_property(hs, &args.id, &name)?,
            (None, true) => users::get_user_properties(hs, &args.id)?,
            (None, false) => users::get_user(hs, &args.id)?,
        },
        Commands::Items(args) => {
            let query = items::ItemsQuery {
                list_id: args.list,
                start: args.start,
                limit: args.limit,
                ..items::ItemsQuery::new(args.spot)
            };
            items::get_items(hs, &query)?
        }
        Commands::Item(args) => {
            if let Some(name) = args.property {
                items::get_item_property(hs, &args.id, &name)?
            } else {
                match args.view {
                    ItemView::Metadata => items::get_item(hs, &args.id)?,
                    ItemView::Bookmarks => items::get_item_bookmarks(hs, &args.id)?,
                    ItemView::Content | ItemView::Report => {
                        let report = args.view == ItemView::Report;
                        return Ok(match items::get_item_content(hs, &args.id, report)? {
                            items::ItemContent::Text(text) => Output::Text(text),
                            items::ItemContent::Json(value) => Output::Json(value),
                        });
                    }
                    ItemView::CmsMetadata => items::get_item_cms_metadata(hs, &args.id)?,
                    ItemView::Thumbnails => items::get_item_thumbnails(hs, &args.id)?,
                    ItemView::Properties => items::get_item_properties(hs, &args.id)?,
                }
            }
        }
        Commands::Groups(args) => {
            let query = groups::GroupsQuery {
                role_filter: args.role,
                right_filter: args.right,
                start: args.start,
                limit: args.limit,
            };
            groups::get_groups(hs, &query)?
        }
        Commands::Group { id } => groups::get_group(hs, &id)?,
        Commands::Pitches(args) => {
            let query = pitches::PitchesQuery {
                start: args.start,
                limit: args.limit,
                sort_by: args.sort_by,
            };
            pitches::get_pitches(hs, &query)?
        }
        Commands::UsageLabels => domain::get_custom_usage_labels(hs)?,
        Commands::PromotedSearches(args) => {
            domain::get_promoted_searches(hs, args.start, args.limit)?
        }
        Commands::Request { id, result } => {
            if result {
                requests::get_request_result(hs, &id)?
            } else {
                requests::get_request(hs, &id)?
            }
        }
    };
    Ok(Output::Json(value))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut builder = Highspot::builder()
        .api_version(cli.api_version)
        .verify_tls(!cli.insecure);
    if let Some(username) = cli.username {
        builder = builder.username(username);
    }
    if let Some(password) = cli.password {
        builder = builder.password(password);
    }
    if let Some(base_url) = cli.base_url {
        builder = builder.base_url(base_url);
    }
    let hs = builder.build()?;

    match run(&hs, cli.command)? {
        Output::Json(value) => {
            let rendered =
                serde_json::to_string_pretty(&value).context("Failed to render JSON output")?;
            println!("{}", rendered);
        }
        Output::Text(text) => print!("{}", text),
    }
    Ok(())
}

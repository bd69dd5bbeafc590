mod server;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use terrain_core::{
    ColorBand, ContributionStats, DateWindow, GitHubUser, InteractionState, LayoutOptions,
    TOP_REPOSITORIES, display_date, layout, normalize_user, plan, top_repositories,
};
use terrain_source::{AnySource, ContributionSource, FetchRequest, SourceConfig};

#[derive(Parser)]
#[command(name = "terrain", about = "GitHub contribution terrain CLI and JSON service")]
struct Cli {
    /// Config file (default: ~/.config/terrain/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use generated data instead of the GitHub API
    #[arg(long, global = true)]
    mock: bool,

    /// Seed for generated data
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// GitHub token (overrides GITHUB_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// First day of the window (YYYY-MM-DD)
    #[arg(long, global = true)]
    from: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long, global = true)]
    to: Option<NaiveDate>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show identity and contribution statistics
    Fetch {
        /// GitHub login (default: config, then the origin remote's owner)
        login: Option<String>,
    },

    /// Print normalized contribution points as JSON
    Points { login: Option<String> },

    /// Print the terrain render plan as JSON
    Layout {
        login: Option<String>,

        /// Force the instanced back end regardless of size
        #[arg(long)]
        instanced: bool,

        /// Keep grid coordinates instead of centering on the origin
        #[arg(long)]
        no_center: bool,
    },

    /// List the most-starred repositories
    Repos {
        login: Option<String>,

        #[arg(long, default_value_t = TOP_REPOSITORIES)]
        limit: usize,
    },

    /// Serve the pipeline as a JSON HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8787")]
        addr: SocketAddr,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<SourceConfig> {
    let mut config =
        SourceConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.mock {
        config.mock = true;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(token) = &cli.token {
        config.token = Some(token.clone());
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

async fn fetch_user(cli: &Cli, login: Option<&str>) -> Result<GitHubUser> {
    let config = load_config(cli)?;
    let Some(login) = config.resolve_login(login) else {
        bail!("no GitHub login given; pass one, set TERRAIN_LOGIN, or add `login` to the config");
    };
    let source = AnySource::from_config(&config).context("failed to build contribution source")?;
    let (from, to) = DateWindow::day_bounds(cli.from, cli.to);
    let request = FetchRequest::new(login).with_window(from, to);
    source
        .fetch(&request)
        .await
        .with_context(|| format!("failed to fetch contributions for '{}'", request.login))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Fetch { login } => cmd_fetch(&cli, login.as_deref()).await,
        Commands::Points { login } => cmd_points(&cli, login.as_deref()).await,
        Commands::Layout {
            login,
            instanced,
            no_center,
        } => cmd_layout(&cli, login.as_deref(), *instanced, *no_center).await,
        Commands::Repos { login, limit } => cmd_repos(&cli, login.as_deref(), *limit).await,
        Commands::Serve { addr } => cmd_serve(&cli, *addr).await,
    }
}

async fn cmd_fetch(cli: &Cli, login: Option<&str>) -> Result<()> {
    let user = fetch_user(cli, login).await?;
    let stats = ContributionStats::from_user(&user);
    let points = normalize_user(&user);

    println!("login:         {}", user.login);
    println!("name:          {}", user.display_name());
    println!("contributions: {}", stats.total_contributions);
    println!("commits:       {}", stats.total_commits);
    println!("issues:        {}", stats.total_issues);
    println!("pull requests: {}", stats.total_pull_requests);
    println!("reviews:       {}", stats.total_reviews);
    println!("repositories:  {}", stats.total_repositories);
    println!("stars:         {}", stats.total_stars);
    println!("forks:         {}", stats.total_forks);

    if points.is_empty() {
        println!("(no contribution data)");
        return Ok(());
    }

    println!("active days:   {}", points.len());
    if let Some(busiest) = points.iter().max_by_key(|p| p.z) {
        println!("busiest day:   {} ({})", display_date(busiest.date), busiest.z);
    }
    let legend: Vec<String> = ColorBand::ALL
        .iter()
        .map(|b| format!("{} {}", b.hex(), b.range_label()))
        .collect();
    println!("bands:         {}", legend.join(" | "));

    if !user.calendar().is_consistent() {
        tracing::warn!(
            reported = user.calendar().total_contributions,
            summed = user.calendar().sum_counts(),
            "reported total does not match daily counts"
        );
    }
    Ok(())
}

async fn cmd_points(cli: &Cli, login: Option<&str>) -> Result<()> {
    let user = fetch_user(cli, login).await?;
    let points = normalize_user(&user);
    let json = serde_json::to_string_pretty(&points).context("failed to serialize points")?;
    println!("{json}");
    Ok(())
}

async fn cmd_layout(cli: &Cli, login: Option<&str>, instanced: bool, no_center: bool) -> Result<()> {
    let user = fetch_user(cli, login).await?;
    let points = normalize_user(&user);
    let laid_out = layout(&points, LayoutOptions { center: !no_center });

    let Some(render) = plan(&laid_out, InteractionState::Idle, instanced) else {
        println!("no contribution data");
        return Ok(());
    };
    let json = serde_json::to_string_pretty(&render).context("failed to serialize render plan")?;
    println!("{json}");
    Ok(())
}

async fn cmd_repos(cli: &Cli, login: Option<&str>, limit: usize) -> Result<()> {
    let user = fetch_user(cli, login).await?;
    let top = top_repositories(&user.repositories.nodes, limit);
    if top.is_empty() {
        println!("(no repositories)");
    }
    for repo in &top {
        let language = repo
            .primary_language
            .as_ref()
            .map_or("-", |l| l.name.as_str());
        println!(
            "{:<28} ★{:<5} ⑂{:<4} {:<12} {}",
            repo.name,
            repo.stargazer_count,
            repo.fork_count,
            language,
            repo.description.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

async fn cmd_serve(cli: &Cli, addr: SocketAddr) -> Result<()> {
    let config = load_config(cli)?;
    let source = AnySource::from_config(&config).context("failed to build contribution source")?;
    let app = server::router(server::AppState::new(source));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("serving contribution terrain on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
        .context("server error")?;
    Ok(())
}

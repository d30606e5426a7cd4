/// Cadence - inspect, filter and convert playlist files
use anyhow::{bail, Context};
use cadence_core::TrackRef;
use cadence_playlists::{Playlist, ParserSet, PlaylistEvent, PlaylistRegistry, RegistrySettings};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Inspect, filter and convert playlist files", long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported playlist formats
    Formats,
    /// Show the playlists stored in a file
    Inspect {
        /// Playlist file
        path: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert a playlist file to another format
    Convert {
        /// Source playlist file
        input: String,
        /// Target file; the extension picks the format
        output: String,
    },
    /// Build a dynamic playlist from the tracks of other playlist files
    Filter {
        /// Filter query, e.g. "eminem 2009"
        query: String,
        /// Playlist files whose tracks form the pool
        #[arg(required = true)]
        sources: Vec<String>,
        /// Name of the new playlist
        #[arg(short, long, default_value = "Filtered")]
        name: String,
        /// Save the result here instead of printing it
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = RegistrySettings::load(cli.config.as_deref())
        .context("Failed to load settings")?;
    let mut registry = PlaylistRegistry::new(settings, ParserSet::with_defaults());

    match cli.command {
        Commands::Formats => {
            for name in registry.parsers().names() {
                println!("{name}");
            }
        }
        Commands::Inspect { path, json } => {
            inspect(&mut registry, &path, json)?;
        }
        Commands::Convert { input, output } => {
            convert(&mut registry, &input, &output)?;
        }
        Commands::Filter {
            query,
            sources,
            name,
            output,
        } => {
            let playlist = filter(&mut registry, &query, &sources, &name)?;
            match output {
                Some(output) => {
                    registry.save(playlist.as_str(), &output)?;
                    tracing::info!("Saved {} to {}", playlist, output);
                }
                None => print_playlist(registry.get(&playlist).context("playlist vanished")?),
            }
        }
    }

    Ok(())
}

/// Load every playlist in `path`, failing when there are none
fn load(registry: &mut PlaylistRegistry, path: &str) -> anyhow::Result<Vec<String>> {
    if !registry.is_supported(path) {
        bail!("Unsupported playlist format: {path}");
    }

    let names = registry.load(path);
    log_events(registry);
    if names.is_empty() {
        bail!("No playlists found in {path}");
    }
    Ok(names)
}

fn log_events(registry: &mut PlaylistRegistry) {
    for event in registry.drain_events() {
        match event {
            PlaylistEvent::Failure { context, message } => {
                tracing::warn!("{} failed: {}", context, message);
            }
            other => tracing::debug!(event = ?other, "Playlist event"),
        }
    }
}

fn inspect(registry: &mut PlaylistRegistry, path: &str, json: bool) -> anyhow::Result<()> {
    let names = load(registry, path)?;
    for name in &names {
        let playlist = registry.get(name).context("playlist vanished")?;
        if json {
            println!("{}", serde_json::to_string_pretty(playlist)?);
        } else {
            print_playlist(playlist);
        }
    }
    Ok(())
}

fn convert(registry: &mut PlaylistRegistry, input: &str, output: &str) -> anyhow::Result<()> {
    if !registry.is_supported(output) {
        bail!("Unsupported playlist format: {output}");
    }

    let names = load(registry, input)?;
    if names.len() > 1 {
        tracing::warn!("{} holds {} playlists, converting the first", input, names.len());
    }

    let result = registry.save(names[0].as_str(), output);
    log_events(registry);
    result.with_context(|| format!("Failed to write {output}"))?;

    tracing::info!("Converted {} to {}", input, output);
    Ok(())
}

/// Pool the tracks of `sources` and create a dynamic playlist over them
///
/// Returns the name the new playlist was registered under.
fn filter(
    registry: &mut PlaylistRegistry,
    query: &str,
    sources: &[String],
    name: &str,
) -> anyhow::Result<String> {
    let mut pool: Vec<TrackRef> = Vec::new();
    for source in sources {
        for loaded in load(registry, source)? {
            if let Some(playlist) = registry.get(&loaded) {
                pool.extend(playlist.tracks().iter().cloned());
            }
        }
    }
    registry.extend_pool(pool);

    let created = registry.create_dynamic(name, query).name().to_string();
    log_events(registry);
    tracing::info!("{} matches {} pooled tracks", created, registry.pool().len());
    Ok(created)
}

fn print_playlist(playlist: &Playlist) {
    println!(
        "{} ({} tracks, {})",
        playlist.name(),
        playlist.len(),
        format_time(playlist.time())
    );
    for (index, track) in playlist.tracks().iter().enumerate() {
        let label = match (track.artist.is_empty(), track.title.is_empty()) {
            (true, true) => track.path.clone(),
            (true, false) => track.title.clone(),
            _ => format!("{} - {}", track.artist, track.title),
        };
        println!(
            "{:>4}. {} [{}]",
            index + 1,
            label,
            format_time(track.duration)
        );
    }
}

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up
fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

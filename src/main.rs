mod cli;

use trackscan::{config, listing};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag.
    // Logs go to stderr so stdout stays parseable.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "trackscan=debug,ts_probe=trace,ts_av=debug,ts_core=debug".to_string()
        } else {
            "trackscan=info,ts_probe=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List {
            file,
            json,
            no_external,
        } => list_tracks(&file, cli.config.as_deref(), json, !no_external),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("trackscan {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn list_tracks(file: &Path, config_path: Option<&Path>, json: bool, external: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let lister = listing::build_lister(&config, external);
    tracing::info!(file = %file.display(), strategies = ?lister.names(), "listing audio tracks");

    let tracks = lister.tracks(file);

    if json {
        println!("{}", serde_json::to_string_pretty(&tracks)?);
        return Ok(());
    }

    if tracks.is_empty() {
        println!("No audio tracks found");
        return Ok(());
    }

    for track in &tracks {
        println!("{}: {}", track.index, track.label);
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let registry = ts_av::ToolRegistry::discover(&config.tools);
    let tools = registry.check_all();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All optional tools are available!");
    } else {
        println!("Some tools are missing. The built-in Matroska parser will be used instead.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    let limits = listing::scan_limits(&config.scan);
    println!("  Prefix bytes: {}", limits.prefix_len);
    println!("  Max skippable element: {}", limits.max_skip_len);
    println!("  ffprobe enabled: {}", config.tools.ffprobe);
    println!("  Tool timeout: {}s", config.tools.timeout_secs);

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!("Warnings:");
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    Ok(())
}

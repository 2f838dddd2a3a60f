#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{path::PathBuf, process};

mod commands;
mod interact;

use commands::Commands;

use matfill::{config::Area, Config};

use clap::{Args, Parser};
use eyre::{Context, Result};
use log::{error, trace};

fn main() {
    if let Err(err) = try_main() {
        error!("{:#}", err);
        process::exit(2);
    }
}

fn try_main() -> Result<()> {
    let Cli {
        command,
        global_opts:
            GlobalOpts {
                config,
                base_url,
                area,
                verbosity,
                quiet,
            },
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let mut config = if let Some(path) = config {
        trace!("'config' option used with value of '{}'", path.display());
        Config::from_path(&path)
            .wrap_err_with(|| format!("Cannot load the config file '{}'", path.display()))?
    } else {
        trace!("'config' option not used - using the default config");
        Config::default()
    };

    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if let Some(area) = area {
        config.area = area;
    }

    let message = command.execute(&config)?;
    if !quiet {
        println!("{message}");
    }
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new()
        .module(module_path!())
        .verbosity(verbosity)
        .init()
        .wrap_err("Cannot set up the logger")
}

#[derive(Parser)]
#[clap(name = "matfill")]
#[clap(about = "Fill in a study material form by ISBN or DOI lookup in the terminal")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// A TOML config file with the lookup endpoints and form panels
    #[clap(short, long, parse(from_os_str), global = true)]
    config: Option<PathBuf>,

    /// Overrides the base url of the lookup endpoints
    #[clap(short, long, global = true)]
    base_url: Option<String>,

    /// Overrides the deployment area of the lookup endpoints: 'public' or 'teacher'
    #[clap(short, long, global = true)]
    area: Option<Area>,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}

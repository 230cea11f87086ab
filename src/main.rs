// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! VODON command line.
//!
//! Opens a project with headless media, places the master clock and active
//! source as requested, and prints what each source slot would show.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use vodon::io::media::HeadlessMedia;
use vodon::io::serialization;
use vodon::models::settings::Settings;
use vodon::models::source::SourceId;
use vodon::timeline::MediaHandle;
use vodon::ReviewSession;

#[derive(Debug, Parser)]
#[command(name = "vodon", version, about = "Synchronized multi-source video review")]
struct Args {
    /// Project file (.yaml, .yml or .json)
    project: PathBuf,

    /// Settings file (.yaml, .yml or .json)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Master-clock time in seconds
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// Source to enlarge
    #[arg(long)]
    active: Option<String>,

    /// Write the project back out (format by extension)
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => serialization::import_settings(path)?,
        None => Settings::default(),
    };
    let project = serialization::import_project(&args.project)?;
    if let Some((start, end)) = project.coverage() {
        log::info!("Master timeline covers {start:.3}s - {end:.3}s");
    }

    let mut session = ReviewSession::from_project(project, settings, |_| {
        Some(Box::new(HeadlessMedia::new()) as Box<dyn MediaHandle>)
    })?;

    session.set_active_source(args.active.map(SourceId::new));
    session.set_current_time(args.at);

    println!("t = {:.3}s", session.state().current_time);
    for view in session.views() {
        let bookmarks = session.bookmarks().for_source(&view.id).count();
        println!(
            "{:<16} {:<20} {:?} (local {:.3}s, {} bookmark(s))",
            view.id.as_str(),
            view.name,
            view.visibility,
            view.local_time,
            bookmarks
        );
    }

    let project = session.close();
    if let Some(path) = &args.export {
        serialization::export_project(&project, path)?;
    }

    Ok(())
}

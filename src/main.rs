// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{info, warn};

use keypiano::audio::{default_device_name, list_devices, SilentOutput, ToneOutput, ToneSink};
use keypiano::config::{LoggingSettings, PianoConfig};
use keypiano::control::{ControlAction, InputRouter};
use keypiano::timing::{SystemClock, ThreadWaiter};
use keypiano::ui::App;

fn print_usage() {
    println!("keypiano - Console Piano");
    println!();
    println!("Usage: keypiano [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <PATH>        Load settings from a TOML or YAML file");
    println!("  --log <PATH>           Write log output to PATH");
    println!("  --silent               Run without an audio device");
    println!("  --write-config <PATH>  Save the effective settings as TOML and exit");
    println!("  --list-devices         List available audio output devices");
    println!("  --help                 Show this help message");
}

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    log: Option<PathBuf>,
    write_config: Option<PathBuf>,
    silent: bool,
    list_devices: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config = Some(PathBuf::from(path));
            }
            "--log" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--log requires a file path"))?;
                options.log = Some(PathBuf::from(path));
            }
            "--write-config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--write-config requires a file path"))?;
                options.write_config = Some(PathBuf::from(path));
            }
            "--silent" => options.silent = true,
            "--list-devices" => options.list_devices = true,
            "--help" | "-h" => options.help = true,
            other => anyhow::bail!("Unknown option: {}", other),
        }
    }

    Ok(options)
}

fn print_devices() {
    let devices = list_devices();
    let default = default_device_name();

    if devices.is_empty() {
        println!("No audio output devices found");
        return;
    }

    println!("Audio output devices:");
    for (i, name) in devices.iter().enumerate() {
        let marker = if default.as_deref() == Some(name.as_str()) { " (default)" } else { "" };
        println!("  {}: {}{}", i, name, marker);
    }
}

fn init_logging(settings: &LoggingSettings, path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_max_level(settings.level())
        .with_ansi(false)
        .init();

    Ok(())
}

fn open_sink(config: &PianoConfig, silent: bool) -> Box<dyn ToneSink> {
    if silent {
        info!("audio disabled");
        return Box::new(SilentOutput);
    }

    match ToneOutput::new(config.audio.to_audio_config()) {
        Ok(output) => {
            info!(latency_ms = ?output.latency_ms(), "audio output ready");
            Box::new(output)
        }
        Err(e) => {
            warn!("audio unavailable, continuing silently: {}", e);
            Box::new(SilentOutput)
        }
    }
}

fn run(config: PianoConfig, silent: bool) -> Result<()> {
    let sink = open_sink(&config, silent);
    let mut router = InputRouter::with_settings(
        sink,
        SystemClock::new(),
        ThreadWaiter,
        config.playback.octave(),
        config.playback.tone_duration(),
    );

    let mut app = App::new(config.ui.title.clone(), config.ui.frame_rate)
        .context("Failed to set up terminal")?;
    app.state_mut().sync(&router);
    info!(
        octave = %router.octave(),
        tone_ms = router.tone_duration().as_millis() as u64,
        "session started"
    );

    loop {
        app.draw()?;

        let Some(symbol) = app.poll_symbol()? else {
            continue;
        };

        if router.classify(symbol) == ControlAction::PlayRecording
            && !router.session().last_recording().is_empty()
        {
            app.state_mut().begin_playback();
            app.draw()?;
        }

        let event = router.dispatch_with(symbol, |note| {
            app.state_mut().playback_note(note);
            if let Err(e) = app.draw() {
                warn!("redraw during playback failed: {}", e);
            }
        });

        if event.is_quit() {
            break;
        }

        let state = app.state_mut();
        state.apply(&event);
        state.sync(&router);
    }

    info!(takes = router.session().take_count(), "session ended");
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage();
        return Ok(());
    }

    if options.list_devices {
        print_devices();
        return Ok(());
    }

    let mut config = match &options.config {
        Some(path) => PianoConfig::load(path)?,
        None => PianoConfig::default(),
    };

    if let Some(path) = &options.write_config {
        config.save(path)?;
        println!("Settings written to {}", path.display());
        return Ok(());
    }

    if options.log.is_some() {
        config.logging.file = options.log.clone();
    }
    if let Some(path) = &config.logging.file {
        init_logging(&config.logging, path)?;
    }

    run(config, options.silent)
}

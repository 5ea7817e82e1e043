//! Quad Breaker entry point
//!
//! Headless native driver: builds a level from a seed, dumps it as ASCII,
//! and optionally lets the autopilot play a demo run.

use std::env;
use std::path::PathBuf;
use std::process;

use quad_breaker::Settings;
use quad_breaker::consts::*;
use quad_breaker::procgen::{Grid, PaintPattern, SymmetryMode};
use quad_breaker::sim::{GamePhase, Session, TickInput, tick};

fn usage() -> ! {
    eprintln!(
        "usage: quad-breaker [seed] [options]\n\
         \n\
         options:\n\
           --symmetry <mirror-h|mirror-v|mirror-both|chaos>\n\
           --paint <bottom-to-top|left-to-right|zebra|center-out>\n\
           --demo <seconds>       run the autopilot for a while\n\
           --settings <path>      load settings from a JSON file"
    );
    process::exit(2);
}

fn main() {
    env_logger::init();

    let mut seed: i64 = 777;
    let mut demo_secs: u32 = 0;
    let mut settings_path: Option<PathBuf> = None;
    let mut symmetry: Option<SymmetryMode> = None;
    let mut paint: Option<PaintPattern> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--symmetry" => {
                symmetry = args.next().as_deref().and_then(SymmetryMode::from_str);
                if symmetry.is_none() {
                    usage();
                }
            }
            "--paint" => {
                paint = args.next().as_deref().and_then(PaintPattern::from_str);
                if paint.is_none() {
                    usage();
                }
            }
            "--demo" => match args.next().and_then(|s| s.parse().ok()) {
                Some(secs) => demo_secs = secs,
                None => usage(),
            },
            "--settings" => match args.next() {
                Some(path) => settings_path = Some(PathBuf::from(path)),
                None => usage(),
            },
            "-h" | "--help" => usage(),
            other => match other.parse() {
                Ok(value) => seed = value,
                Err(_) => usage(),
            },
        }
    }

    let mut settings = settings_path
        .map(|p| Settings::load_from(&p))
        .unwrap_or_default();
    if let Some(mode) = symmetry {
        settings.symmetry = mode;
    }
    if let Some(pattern) = paint {
        settings.paint = pattern;
    }

    log::info!(
        "building level: seed={seed} symmetry={} paint={}",
        settings.symmetry.as_str(),
        settings.paint.as_str()
    );
    let mut session = Session::new(seed, &settings);

    println!(
        "seed {seed} / {} / {} destructible bricks",
        settings.symmetry.as_str(),
        session.bricks_remaining
    );
    print_grid(&session.grid);

    if demo_secs > 0 {
        run_demo(&mut session, demo_secs);
    }
}

/// Dump the grid as ASCII: '.' empty, 'X' obstacle, tier initial otherwise
fn print_grid(grid: &Grid) {
    for row in 0..GRID_ROWS {
        let mut line = String::with_capacity(GRID_COLS);
        for col in 0..GRID_COLS {
            line.push(match grid.get(col, row) {
                Some(brick) if !brick.kind.destructible => 'X',
                Some(brick) => brick
                    .kind
                    .name
                    .chars()
                    .next()
                    .map(|c| c.to_ascii_uppercase())
                    .unwrap_or('?'),
                None => '.',
            });
        }
        println!("  {line}");
    }
}

/// Let the autopilot play; prints a summary when time runs out or the run
/// ends
fn run_demo(session: &mut Session, secs: u32) {
    println!("autopilot demo, {secs}s...");
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    for _ in 0..secs.saturating_mul(120) {
        tick(session, &input, SIM_DT);
        if session.phase == GamePhase::GameOver {
            break;
        }
    }
    if session.phase == GamePhase::GameOver {
        // Field is hidden behind the game-over summary
        session.set_bricks_visible(false);
    }
    println!(
        "demo over: score={} level={} lives={} bricks_left={}",
        session.score, session.level_index, session.lives, session.bricks_remaining
    );
}

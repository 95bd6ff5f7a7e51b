//! `board-place` — run one node placement pass over a canvas snapshot.
//!
//! Reads a snapshot JSON (`{"nodes": [...], "pending": [...], "context": {...}}`),
//! prints the resulting placement plan as JSON. With `--lint`, prints the
//! crowding diagnostics of the board after the plan is applied instead.

use anyhow::{Context, Result};
use board_core::{CanvasSnapshot, LayoutConfig, lint_canvas};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "board-place", version, about = "Place pending idea-board nodes")]
struct Args {
    /// Snapshot JSON file; `-` reads stdin.
    snapshot: PathBuf,

    /// Layout constants override (partial JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print crowding diagnostics for the board after placement.
    #[arg(long)]
    lint: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
            .context("failed to read snapshot from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn run(args: &Args) -> Result<String> {
    let config = match &args.config {
        Some(path) => LayoutConfig::from_json(&read_input(path)?).map_err(anyhow::Error::msg)?,
        None => LayoutConfig::default(),
    };
    let snapshot = CanvasSnapshot::from_json(&read_input(&args.snapshot)?)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("in {}", args.snapshot.display()))?;

    let plan = snapshot.plan(&config);
    log::info!(
        "placed {} node(s) onto a board of {}",
        plan.placements.len(),
        snapshot.nodes.len()
    );

    let value = if args.lint {
        let mut board = snapshot.nodes.clone();
        board.extend(plan.into_nodes(snapshot.pending.clone()));
        serde_json::to_value(lint_canvas(&board, &config))?
    } else {
        serde_json::to_value(&plan)?
    };

    let out = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(out)
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("board-place: {e:#}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const BOARD: &str = r#"{
        "nodes": [
            { "id": "intro", "position": { "x": 0, "y": 0 }, "size": { "w": 340, "h": 200 },
              "data": { "type": "video-card", "videoId": "v-intro", "ownership": "own" } }
        ],
        "pending": [
            { "id": "traffic", "data": { "type": "traffic-source", "sourceVideoId": "v-intro" } }
        ]
    }"#;

    /// Write `contents` to a file unique to this test run.
    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("board-place-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn args(snapshot: PathBuf) -> Args {
        Args {
            snapshot,
            config: None,
            lint: false,
            pretty: false,
        }
    }

    fn run_json(args: &Args) -> Value {
        serde_json::from_str(&run(args).unwrap()).unwrap()
    }

    #[test]
    fn prints_plan_for_snapshot() {
        let out = run_json(&args(temp_file("plan.json", BOARD)));
        let placement = &out["placements"][0];
        assert_eq!(placement["id"], "traffic");
        assert_eq!(placement["strategy"], "child");
        assert_eq!(placement["position"]["y"], 220.0);
    }

    #[test]
    fn config_file_overrides_gap() {
        let mut a = args(temp_file("gap-board.json", BOARD));
        a.config = Some(temp_file("gap-config.json", r#"{ "placementGap": 40 }"#));
        let out = run_json(&a);
        assert_eq!(out["placements"][0]["position"]["y"], 240.0);
    }

    #[test]
    fn invalid_config_is_reported() {
        let mut a = args(temp_file("bad-board.json", BOARD));
        a.config = Some(temp_file("bad-config.json", r#"{ "maxRing": 4294967295 }"#));
        let err = run(&a).unwrap_err();
        assert!(format!("{err:#}").contains("maxRing"), "unexpected error: {err:#}");
    }

    #[test]
    fn lint_covers_committed_nodes() {
        let mut a = args(temp_file("lint-clean.json", BOARD));
        a.lint = true;
        // The child sits exactly one gap below its parent.
        assert_eq!(run_json(&a), Value::Array(Vec::new()));

        let crowded = BOARD.replace(
            r#""nodes": ["#,
            r#""nodes": [
            { "id": "stray", "position": { "x": 100, "y": 300 }, "data": { "type": "generic" } },"#,
        );
        let mut a = args(temp_file("lint-crowded.json", &crowded));
        a.lint = true;
        a.pretty = true;
        let out = run_json(&a);
        let diags = out.as_array().unwrap();
        assert!(
            diags
                .iter()
                .any(|d| d["rule"] == "overlap" && d["node_id"] == "stray" && d["other_id"] == "traffic"),
            "no overlap with the placed child in {out}"
        );
    }

    #[test]
    fn missing_snapshot_names_the_file() {
        let err = run(&args(PathBuf::from("/nonexistent/board.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/board.json"));
    }
}

use anyhow::Context;
use brewdoc_types::{BatchRecord, RecipeRecord};
use clap::{Parser, Subcommand};
use fs_err as fs;
use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Bless golden fixtures (overwrite expected.md outputs).
    BlessFixtures,
    /// Decode every fixture recipe and batch, reporting the first bad field of each.
    ValidateFixtures {
        #[arg(long, default_value = "tests/fixtures")]
        dir: PathBuf,
    },
    /// Render one fixture to stdout with note dates in UTC.
    Sample {
        #[arg(default_value = "pale_ale")]
        case: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::BlessFixtures => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "brewdoc-render", "--test", "golden_fixtures"])
                .env("BREWDOC_BLESS", "1")
                .status()
                .context("run golden fixture blessing")?;
            if !status.success() {
                anyhow::bail!("bless-fixtures failed");
            }
        }
        Command::ValidateFixtures { dir } => {
            let failures = validate_fixtures(&dir)?;
            if failures > 0 {
                anyhow::bail!("{failures} fixture file(s) failed to decode");
            }
        }
        Command::Sample { case } => {
            let case_dir = Path::new("tests/fixtures").join(&case);
            let mut args = vec![
                "run".to_string(),
                "-q".to_string(),
                "-p".to_string(),
                "brewdoc".to_string(),
                "--".to_string(),
                "render".to_string(),
                case_dir.join("recipe.json").display().to_string(),
                "--utc".to_string(),
            ];
            let batch = case_dir.join("batch.json");
            if batch.exists() {
                args.push("--batch-json".to_string());
                args.push(batch.display().to_string());
            } else {
                args.push("--no-notes".to_string());
            }
            let status = ProcessCommand::new("cargo")
                .args(&args)
                .status()
                .context("run brewdoc render")?;
            if !status.success() {
                anyhow::bail!("sample failed");
            }
        }
    }
    Ok(())
}

fn validate_fixtures(dir: &Path) -> anyhow::Result<usize> {
    let mut cases: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    cases.sort();

    let mut failures = 0;
    for case in cases {
        let recipe = case.join("recipe.json");
        if recipe.exists() {
            let json = fs::read_to_string(&recipe)?;
            match RecipeRecord::from_json(&json) {
                Ok(r) => println!("ok   {} ({})", recipe.display(), r.name),
                Err(e) => {
                    println!("FAIL {}: {}", recipe.display(), e);
                    failures += 1;
                }
            }
        }

        let batch = case.join("batch.json");
        if batch.exists() {
            let json = fs::read_to_string(&batch)?;
            match BatchRecord::from_json(&json) {
                Ok(b) => println!("ok   {} ({} notes)", batch.display(), b.notes.len()),
                Err(e) => {
                    println!("FAIL {}: {}", batch.display(), e);
                    failures += 1;
                }
            }
        }
    }
    Ok(failures)
}

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
    },
    /// Create a sample project tree with a .gitignore to try the resolver on
    Demo {
        /// Directory to create the tree in
        #[arg(long, default_value = "demo-tree")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest { profile, release } => run_nextest(profile, release)?,
        Commands::Demo { dir } => create_demo_tree(dir)?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn create_demo_tree(dir: PathBuf) -> Result<()> {
    if dir.exists() {
        anyhow::bail!("{} already exists", dir.display());
    }

    fs::create_dir_all(dir.join("src"))?;
    fs::create_dir_all(dir.join("build/classes"))?;
    fs::create_dir_all(dir.join("docs/guide"))?;
    fs::write(dir.join("src/Main.java"), "class Main {}\n")?;
    fs::write(dir.join("build/Main.class"), "")?;
    fs::write(dir.join("build/classes/Util.class"), "")?;
    fs::write(dir.join("docs/guide/intro.md"), "# intro\n")?;
    fs::write(dir.join("notes.txt"), "scratch\n")?;
    fs::write(
        dir.join(".gitignore"),
        "*.class\nbuild/\ndocs/**/*.md\nnotes.txt\n",
    )?;

    println!("demo tree created at {}", dir.display());
    println!(
        "try: cargo run -p ignorenav -- resolve {}",
        dir.join(".gitignore").display()
    );
    Ok(())
}

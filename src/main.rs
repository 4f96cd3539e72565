use clap::{Args, Parser, Subcommand};
use secrules::adapters::target;
use secrules::prompt::Prompter;
use secrules::templates::{Category, CATEGORIES};
use secrules::{
    generate, load_config, load_config_from_file, logging, project_config_path, remove, resolve,
    save_config_to_file, Config, DirectoryStore, EmbeddedStore, Error, GenerationReport,
    OutputMode, Overrides, RemovalReport, RunConfiguration, TargetFailure, TargetId,
    TemplateStore,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

#[derive(Parser)]
#[command(name = "secrules")]
#[command(version)]
#[command(about = "Generate security rules for AI coding assistants")]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write security rules into the instruction files of the selected assistants
    Generate(GenerateArgs),
    /// Remove every generated rule file and owned section
    Remove {
        /// Show what would be removed without changing anything
        #[arg(long)]
        dry_run: bool,
        /// Project root (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// List supported assistants and rule categories
    List {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Assistant to generate for (repeatable): claude, gemini, agents, copilot, cursor, windsurf
    #[arg(short, long = "target", value_name = "TARGET")]
    targets: Vec<String>,
    /// Rule category id to include (repeatable, defaults to all)
    #[arg(short, long = "category", value_name = "ID")]
    categories: Vec<String>,
    /// Inline rules or write one file per category where supported
    #[arg(short, long, value_enum)]
    mode: Option<OutputMode>,
    /// Framework label used in the rules, overriding detection
    #[arg(short, long)]
    framework: Option<String>,
    /// Directory of <category>.md files replacing the built-in templates
    #[arg(long, value_name = "DIR")]
    templates: Option<PathBuf>,
    /// Read saved defaults from this file instead of the usual locations
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Show the files that would change without writing them
    #[arg(long)]
    dry_run: bool,
    /// Ask for any value not given on the command line
    #[arg(short, long)]
    interactive: bool,
    /// Save the resolved selection to .secrules.json in the project root
    #[arg(long)]
    save_defaults: bool,
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate(args) => {
            let root = project_root(args.dir.as_deref());
            match run_generate(&root, args) {
                Ok(report) => print_generation(&report),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
        Commands::Remove { dry_run, dir } => {
            let root = project_root(dir.as_deref());
            match remove(&root, dry_run) {
                Ok(report) => {
                    print_removal(&report);
                    if let Err(e) = report.into_result() {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("Error removing security rules: {}", e);
                    process::exit(1);
                }
            }
        }
        Commands::List { json } => {
            if json {
                match list_json() {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    }
                }
            } else {
                print_list();
            }
        }
    }
}

fn project_root(dir: Option<&Path>) -> PathBuf {
    match dir {
        Some(dir) => dir.to_path_buf(),
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error getting current directory: {}", e);
                process::exit(1);
            }
        },
    }
}

fn run_generate(root: &Path, args: GenerateArgs) -> secrules::Result<GenerationReport> {
    let saved = match &args.config {
        Some(path) => load_config_from_file(path)?,
        None => load_config(root)?,
    };

    let templates_dir = args.templates.clone().or_else(|| {
        saved
            .templates_dir
            .as_ref()
            .map(|dir| if dir.is_relative() { root.join(dir) } else { dir.clone() })
    });
    let overrides = Overrides {
        targets: known_targets(&args.targets),
        categories: args.categories,
        mode: args.mode,
        framework: args.framework,
        templates_dir: templates_dir.clone(),
        dry_run: args.dry_run,
    };

    let mut run = resolve(root, &overrides, &saved);
    if args.interactive {
        ask_missing(&mut run, &overrides)
            .map_err(|e| Error::Io {
                action: "failed to read answer from",
                path: PathBuf::from("<stdin>"),
                source: e,
            })?;
    }

    let store: Box<dyn TemplateStore> = match &templates_dir {
        Some(dir) => Box::new(DirectoryStore::new(dir)),
        None => Box::new(EmbeddedStore),
    };
    let report = generate(root, &run, store.as_ref())?;

    if !report.failures.is_empty() {
        print_generation(&report);
        print_failures(&report.failures);
    }
    let report = report.into_result()?;

    if args.save_defaults && !run.dry_run {
        let path = project_config_path(root);
        save_config_to_file(&defaults_from(&run, overrides.templates_dir), &path)?;
        println!("Saved defaults to {}", path.display());
    }
    Ok(report)
}

fn known_targets(ids: &[String]) -> Vec<TargetId> {
    ids.iter()
        .filter_map(|id| {
            let parsed = TargetId::parse(&id.trim().to_lowercase());
            if parsed.is_none() {
                debug!(target_id = %id, "ignoring unknown target");
            }
            parsed
        })
        .collect()
}

/// Prompts for every value the command line left open.
fn ask_missing(run: &mut RunConfiguration, given: &Overrides) -> io::Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    if given.targets.is_empty() {
        run.targets = prompter.targets(&run.targets)?;
    }
    if given.categories.is_empty() {
        run.categories = prompter.categories(&run.categories)?;
    }
    let has_choice = run
        .targets
        .iter()
        .any(|&id| target(id).supports_merge() && target(id).supports_directory_mode());
    if given.mode.is_none() && has_choice {
        run.mode = prompter.mode(run.mode)?;
    }
    if given.framework.is_none() {
        run.framework = prompter.framework(&run.framework)?;
    }
    Ok(())
}

fn defaults_from(run: &RunConfiguration, templates_dir: Option<PathBuf>) -> Config {
    Config {
        targets: Some(run.targets.iter().map(|t| t.to_string()).collect()),
        categories: Some(run.categories.clone()),
        mode: Some(run.mode),
        framework: Some(run.framework.clone()),
        templates_dir,
    }
}

fn print_generation(report: &GenerationReport) {
    if report.dry_run {
        println!("Dry run: no files were written");
    }
    for change in report.changes() {
        println!(
            "  {:<9} {} ({} bytes)",
            change.action.label(),
            change.display_path(&report.root),
            change.bytes()
        );
    }
    if report.failures.is_empty() {
        let verb = if report.dry_run { "Would generate" } else { "Generated" };
        println!(
            "{} security rules for {} target(s) in {} file(s)",
            verb,
            report.targets.len(),
            report.file_count()
        );
    }
}

fn print_failures(failures: &[TargetFailure]) {
    for failure in failures {
        eprintln!(
            "Skipped {}: cannot update {}: {}",
            failure.target,
            failure.path.display(),
            failure.error
        );
    }
}

fn print_removal(report: &RemovalReport) {
    print_failures(&report.failures);
    if report.changes.is_empty() {
        if report.failures.is_empty() {
            println!("No generated security rules found");
        }
        return;
    }
    if report.dry_run {
        println!("Dry run: no files were changed");
    }
    for change in &report.changes {
        println!("  {:<9} {}", change.action.label(), change.display_path(&report.root));
    }
    let verb = if report.dry_run { "Would remove" } else { "Removed" };
    println!(
        "{} generated security rules from {} file(s)",
        verb,
        report.changes.len()
    );
}

fn print_list() {
    println!("Targets:");
    for id in TargetId::ALL {
        let t = target(id);
        let mut outputs = Vec::new();
        if let Some(file) = t.single_file {
            outputs.push(file.to_string());
        }
        if let Some(dir) = t.directory {
            outputs.push(format!("{}/*{}", dir.path, dir.extension));
        }
        println!("  {:<9} {:<28} {}", id.as_str(), t.name, outputs.join(", "));
    }
    println!();
    println!("Categories:");
    for c in CATEGORIES {
        println!("  {} {:<22} {}", c.display_code(), c.id, c.title);
    }
}

fn list_json() -> serde_json::Result<String> {
    let targets: Vec<serde_json::Value> = TargetId::ALL
        .into_iter()
        .map(|id| {
            let t = target(id);
            serde_json::json!({
                "id": id.as_str(),
                "name": t.name,
                "file": t.single_file,
                "directory": t.directory.map(|d| d.path),
                "extension": t.directory.map(|d| d.extension),
            })
        })
        .collect();
    let categories: Vec<serde_json::Value> = CATEGORIES
        .iter()
        .map(|c: &Category| {
            serde_json::json!({
                "id": c.id,
                "code": c.display_code(),
                "title": c.title,
                "group": c.group,
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({
        "targets": targets,
        "categories": categories,
    }))
}

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use posefit::api::{
    anneal_once, check_pose, dislikes, edge_stretches, search, AnnealCfg, NoopObserver, SearchCfg,
    Solution,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod format;
mod provenance;
mod step;

use step::StepObserver;

#[derive(Parser)]
#[command(name = "posefit")]
#[command(about = "Fit a rigid figure into a lattice hole by force-directed annealing")]
struct Cmd {
    /// Optional free-form label; propagated to provenance sidecars and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

/// Annealer overrides shared by `search` and `anneal`.
#[derive(Args, Clone, Copy)]
struct AnnealArgs {
    /// Step size multiplier (preset default when absent)
    #[arg(long)]
    nudge: Option<f64>,
    /// Iteration budget per run (preset default when absent)
    #[arg(long)]
    budget: Option<u64>,
    /// Master seed; drawn at random and logged when absent
    #[arg(long)]
    seed: Option<u64>,
}

impl AnnealArgs {
    fn apply(self, mut cfg: AnnealCfg) -> AnnealCfg {
        if let Some(f) = self.nudge {
            cfg.nudge_factor = f;
        }
        if let Some(b) = self.budget {
            cfg.budget = b;
        }
        cfg
    }

    fn seed(self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[derive(Subcommand)]
enum Action {
    /// Parallel restart search; writes the best solution if one is found
    Search {
        /// Problem document; repeat the flag to search several in one run
        #[arg(long, required = true)]
        problem: Vec<PathBuf>,
        /// Solution file, or a directory receiving `<stem>.json` when
        /// several problems are given
        #[arg(long)]
        out: PathBuf,
        /// Parallel annealers per round
        #[arg(long, default_value_t = 8)]
        workers: usize,
        /// Restart rounds
        #[arg(long, default_value_t = 20)]
        rounds: usize,
        #[command(flatten)]
        anneal: AnnealArgs,
    },
    /// One deep annealing run, optionally stepping frame by frame
    Anneal {
        #[arg(long)]
        problem: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Pause after every iteration and print a frame summary
        #[arg(long)]
        step: bool,
        #[command(flatten)]
        anneal: AnnealArgs,
    },
    /// Check a solution file against a problem and print its score
    Validate {
        #[arg(long)]
        problem: PathBuf,
        #[arg(long)]
        solution: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Search {
            problem,
            out,
            workers,
            rounds,
            anneal,
        } => {
            let cfg = SearchCfg {
                workers,
                rounds,
                seed: anneal.seed(),
                anneal: anneal.apply(AnnealCfg::restart()),
            };
            if let Err(reason) = cfg.validate() {
                bail!("invalid search configuration: {reason}");
            }
            run_batch(&problem, &out, cfg, cmd.tag)
        }
        Action::Anneal {
            problem,
            out,
            step,
            anneal,
        } => run_anneal(
            &problem,
            out.as_deref(),
            anneal.apply(AnnealCfg::deep()),
            anneal.seed(),
            step,
            cmd.tag,
        ),
        Action::Validate { problem, solution } => validate(&problem, &solution),
        Action::Report => report(cmd.tag),
    }
}

/// Where the solution for `problem` goes: `out` itself for a single problem,
/// `out/<stem>.json` in a batch.
fn solution_path(out: &Path, problem: &Path, batch: bool) -> PathBuf {
    if !batch {
        return out.to_path_buf();
    }
    let mut name = problem
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "solution".into());
    name.push(".json");
    out.join(name)
}

/// Search every problem in turn. A failing problem is logged and skipped;
/// the batch reports an error at the end if any failed.
fn run_batch(problems: &[PathBuf], out: &Path, cfg: SearchCfg, tag: Option<String>) -> Result<()> {
    let batch = problems.len() > 1;
    let mut failed = 0usize;
    for problem_path in problems {
        let target = solution_path(out, problem_path, batch);
        if let Err(e) = run_search(problem_path, &target, cfg, tag.clone()) {
            if !batch {
                return Err(e);
            }
            let error = format!("{e:#}");
            tracing::error!(problem = %problem_path.display(), %error, "search failed");
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{failed} of {} problems failed", problems.len());
    }
    Ok(())
}

fn run_search(problem_path: &Path, out: &Path, cfg: SearchCfg, tag: Option<String>) -> Result<()> {
    let problem = format::read_problem(problem_path)?;
    tracing::info!(
        problem = %problem_path.display(),
        verts = problem.verts.len(),
        edges = problem.edges.len(),
        hole = problem.hole.len(),
        lattice = problem.points_in_hole.len(),
        workers = cfg.workers,
        rounds = cfg.rounds,
        seed = cfg.seed,
        nudge = cfg.anneal.nudge_factor,
        budget = cfg.anneal.budget,
        tag = ?tag,
        "search"
    );
    match search(&problem, &cfg) {
        Some(best) => {
            tracing::info!(dislikes = best.dislikes, "best solution");
            let params = serde_json::json!({
                "command": "search",
                "problem": problem_path.to_string_lossy(),
                "workers": cfg.workers,
                "rounds": cfg.rounds,
                "seed": cfg.seed,
                "nudge_factor": cfg.anneal.nudge_factor,
                "budget": cfg.anneal.budget,
            });
            emit(out, &best, params, tag)
        }
        None => {
            tracing::warn!("no valid pose found; nothing written");
            Ok(())
        }
    }
}

fn run_anneal(
    problem_path: &Path,
    out: Option<&Path>,
    cfg: AnnealCfg,
    seed: u64,
    stepping: bool,
    tag: Option<String>,
) -> Result<()> {
    if let Err(reason) = cfg.validate() {
        bail!("invalid anneal configuration: {reason}");
    }
    let problem = format::read_problem(problem_path)?;
    tracing::info!(
        problem = %problem_path.display(),
        seed,
        nudge = cfg.nudge_factor,
        budget = cfg.budget,
        stepping,
        tag = ?tag,
        "anneal"
    );
    let solution = if stepping {
        let mut observer = StepObserver::new(io::stdin().lock(), io::stdout());
        anneal_once(&problem, cfg, seed, &mut observer)
    } else {
        anneal_once(&problem, cfg, seed, &mut NoopObserver)
    };
    match (solution, out) {
        (Some(s), Some(out)) => {
            let params = serde_json::json!({
                "command": "anneal",
                "problem": problem_path.to_string_lossy(),
                "seed": seed,
                "nudge_factor": cfg.nudge_factor,
                "budget": cfg.budget,
            });
            emit(out, &s, params, tag)
        }
        (Some(s), None) => {
            println!("{}", serde_json::to_string(&format::SolutionDoc::from(&s))?);
            Ok(())
        }
        (None, _) => Ok(()),
    }
}

fn emit(
    out: &Path,
    solution: &Solution,
    mut params: serde_json::Value,
    tag: Option<String>,
) -> Result<()> {
    format::write_solution(out, solution)?;
    params["dislikes"] = solution.dislikes.into();
    let sidecar = provenance::write_sidecar(out, provenance::Payload::new(params, tag))?;
    tracing::info!(out = %out.display(), provenance = %sidecar.display(), "wrote solution");
    Ok(())
}

fn validate(problem_path: &Path, solution_path: &Path) -> Result<()> {
    let problem = format::read_problem(problem_path)?;
    let pose = format::read_pose(solution_path)?;
    tracing::info!(
        problem = %problem_path.display(),
        solution = %solution_path.display(),
        "validate"
    );
    match check_pose(&problem, &pose) {
        Ok(()) => {
            let worst = edge_stretches(&problem, &pose)
                .into_iter()
                .fold(0.0f64, f64::max);
            println!(
                "valid: dislikes={} max_stretch={worst:.6} ep={:.6}",
                dislikes(&problem, &pose),
                problem.ep
            );
            Ok(())
        }
        Err(violation) => bail!("invalid pose: {violation}"),
    }
}

fn report(tag: Option<String>) -> Result<()> {
    let search = SearchCfg::default();
    let (restart, deep) = (AnnealCfg::restart(), AnnealCfg::deep());
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "crate_version": posefit::VERSION,
        "tag": tag,
        "defaults": {
            "search": { "workers": search.workers, "rounds": search.rounds },
            "restart": { "nudge_factor": restart.nudge_factor, "budget": restart.budget },
            "deep": { "nudge_factor": deep.nudge_factor, "budget": deep.budget }
        }
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

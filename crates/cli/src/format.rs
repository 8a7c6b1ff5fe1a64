//! Problem and solution documents.
//!
//! Problem: `{"hole": [[x,y],..], "figure": {"vertices": [[x,y],..],
//! "edges": [[s,e],..]}, "epsilon": n}`; unknown fields are ignored.
//! Solution: `{"vertices": [[x,y],..]}`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use posefit::api::{Edge, Point, Problem, Solution};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FigureDoc {
    pub vertices: Vec<[i64; 2]>,
    pub edges: Vec<[usize; 2]>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProblemDoc {
    pub hole: Vec<[i64; 2]>,
    pub figure: FigureDoc,
    pub epsilon: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SolutionDoc {
    pub vertices: Vec<[i64; 2]>,
}

fn to_point([x, y]: [i64; 2], what: &str, k: usize) -> Result<Point> {
    let x = i16::try_from(x).with_context(|| format!("{what} {k}: x={x} does not fit in 16 bits"))?;
    let y = i16::try_from(y).with_context(|| format!("{what} {k}: y={y} does not fit in 16 bits"))?;
    Ok(Point::new(x, y))
}

fn to_points(raw: &[[i64; 2]], what: &str) -> Result<Vec<Point>> {
    raw.iter()
        .enumerate()
        .map(|(k, &p)| to_point(p, what, k))
        .collect()
}

impl ProblemDoc {
    pub fn to_problem(&self) -> Result<Problem> {
        let verts = to_points(&self.figure.vertices, "figure vertex")?;
        let hole = to_points(&self.hole, "hole vertex")?;
        let edges = self
            .figure
            .edges
            .iter()
            .map(|&[s, e]| Edge::new(s, e))
            .collect();
        Problem::new(verts, edges, hole, self.epsilon).context("building problem")
    }
}

impl SolutionDoc {
    pub fn to_pose(&self) -> Result<Vec<Point>> {
        to_points(&self.vertices, "pose vertex")
    }
}

impl From<&Solution> for SolutionDoc {
    fn from(s: &Solution) -> Self {
        Self {
            vertices: s
                .assigned
                .iter()
                .map(|p| [i64::from(p.x), i64::from(p.y)])
                .collect(),
        }
    }
}

pub fn read_problem<P: AsRef<Path>>(path: P) -> Result<Problem> {
    let path = path.as_ref();
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let doc: ProblemDoc =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))?;
    doc.to_problem()
        .with_context(|| format!("invalid problem {}", path.display()))
}

pub fn read_pose<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let doc: SolutionDoc =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))?;
    doc.to_pose()
}

pub fn write_solution<P: AsRef<Path>>(path: P, solution: &Solution) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let doc = SolutionDoc::from(solution);
    fs::write(path, serde_json::to_vec(&doc)?)
        .with_context(|| format!("writing {}", path.display()))
}

//! Interactive stepping observer for a single annealing run.
//!
//! After each frame it prints one summary line and blocks until a line is read.
//! `q` (or end of input) stops stepping; the run then continues unobserved.

use std::io::{BufRead, Write};

use posefit::api::{point_in_polygon, Frame, Observer, VecExt};

pub struct StepObserver<R, W> {
    input: R,
    output: W,
    active: bool,
}

impl<R: BufRead, W: Write> StepObserver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            active: true,
        }
    }

    fn step(&mut self, frame: &Frame<'_>) -> std::io::Result<bool> {
        let outside = frame
            .qpose
            .iter()
            .filter(|p| !point_in_polygon(**p, frame.hole))
            .count();
        let (max_net, max_total) = frame.forces.iter().fold((0.0f64, 0.0f64), |(n, t), f| {
            (n.max(f.net.mag()), t.max(f.total))
        });
        writeln!(
            self.output,
            "iter {:>8}  outside {:>3}/{}  max|net| {:>8.3}  max total {:>8.3}  [enter: next, q: run]",
            frame.iteration,
            outside,
            frame.qpose.len(),
            max_net,
            max_total
        )?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        Ok(read > 0 && line.trim() != "q")
    }
}

impl<R: BufRead, W: Write> Observer for StepObserver<R, W> {
    fn on_frame(&mut self, frame: &Frame<'_>) {
        if !self.active {
            return;
        }
        match self.step(frame) {
            Ok(keep) => self.active = keep,
            Err(e) => {
                tracing::warn!(error = %e, "stepping disabled");
                self.active = false;
            }
        }
    }
}

// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Capacitated facility location by large neighborhood search.
//!
//! The solver starts from a greedy first-fit solution and then repeatedly
//! picks a random facility together with its nearest neighbors, rebuilds the
//! attendance of every customer served there as a small 0/1 program, solves
//! it exactly through an [`optimizer::Optimizer`] and merges the result only
//! if it strictly lowers the total cost.
//!
//! ```no_run
//! use facloc_model::prelude::ProblemLoader;
//! use facloc_solver::prelude::*;
//! use std::time::Duration;
//!
//! let problem = ProblemLoader::new().from_path("instances/fl_3_4.txt").unwrap();
//! let model = InstanceModel::from_problem(&problem).unwrap();
//! let config = LnsConfig::default().with_time_limit(Duration::from_secs(5));
//! let mut optimizer = EnumerationOptimizer::new();
//! let outcome = LnsSearch::new(config).run_seeded(&model, &mut optimizer).unwrap();
//! println!("{}", outcome.solution);
//! ```

pub mod engine;
pub mod lns;
pub mod model;
pub mod monitor;
pub mod opening;
pub mod optimizer;
pub mod state;

pub mod prelude {
    pub use crate::engine::{
        ExactError, ExactSearch, IncumbentHandle, LnsConfig, LnsSearch, SearchError, SearchOutcome,
        SearchPhase, SearchStats,
    };
    pub use crate::lns::{
        DecodeError, Neighborhood, NeighborhoodSelector, RejectReason, SolutionUpdater,
        Subproblem, UpdateOutcome,
    };
    pub use crate::model::{InstanceModel, ModelBuildError};
    pub use crate::monitor::{
        CompositeSearchMonitor, InterruptMonitor, IterationLimitMonitor, LogMonitor,
        SearchMonitor, StopToken, TimeLimitMonitor,
    };
    pub use crate::opening::{GreedyError, GreedyOpening};
    #[cfg(feature = "highs")]
    pub use crate::optimizer::HighsOptimizer;
    pub use crate::optimizer::{
        BinaryProgram, EnumerationOptimizer, Optimizer, OptimizerOutcome, OptimizerStatus,
        ScriptedOptimizer,
    };
    pub use crate::state::{AttendancePatch, SolverState, ValueDriftError};
}

//! Code for formulating and solving the inventory-balancing optimisation.
//!
//! One nonnegative inventory-level variable is created for every
//! (product, location, period) combination, dense over the full Cartesian
//! product of the index sets rather than just the triples with recorded
//! demand. Balance constraints pin variables to recorded demand; capacity
//! constraints bound each location's combined inventory per period.
use crate::demand::{PeriodID, ProductID};
use crate::location::LocationID;
use crate::model::{Model, ModelError, check_location_coverage};
use anyhow::{Result, anyhow};
use highs::{HighsModelStatus, RowProblem as Problem, Sense};
use indexmap::IndexMap;
use itertools::iproduct;

/// A decision variable in the optimisation
///
/// Note that this type does **not** include the value of the variable; it just
/// refers to a particular column of the problem.
type Variable = highs::Col;

/// A map for easy lookup of variables in the problem.
///
/// The entries are ordered (see [`IndexMap`]). We use this data structure for
/// two things:
///
/// 1. To look up variables when defining constraints
/// 2. To keep track of which (product, location, period) combination each
///    variable corresponds to, for when we are reading the results of the
///    optimisation.
#[derive(Default)]
pub struct VariableMap(IndexMap<(ProductID, LocationID, PeriodID), Variable>);

impl VariableMap {
    /// Get the [`Variable`] corresponding to the given parameters.
    fn get(
        &self,
        product_id: &ProductID,
        location_id: &LocationID,
        period: &PeriodID,
    ) -> Variable {
        let key = (product_id.clone(), location_id.clone(), period.clone());

        *self
            .0
            .get(&key)
            .expect("No variable found for given params")
    }
}

/// A fully formulated inventory problem, ready to be handed to the solver
pub struct InventoryProblem {
    problem: Problem,
    variables: VariableMap,
}

/// The outcome of a solve attempt.
///
/// Infeasibility and unboundedness are valid modelling outcomes the caller must
/// be able to inspect, so they are reported as values rather than errors;
/// genuine solver failures surface as errors instead.
pub enum SolveOutcome {
    /// An optimal solution was found
    Optimal(Solution),
    /// No assignment of inventory levels satisfies the constraints
    Infeasible,
    /// The objective can be decreased without bound
    Unbounded,
    /// The solver hit the configured time limit
    TimedOut,
}

/// The solution to the inventory optimisation problem
pub struct Solution {
    solution: highs::Solution,
    variables: VariableMap,
    objective_value: f64,
}

impl Solution {
    /// The total holding cost of the optimal inventory levels
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Iterate over the optimal inventory level for every variable, in the
    /// order the variables were created
    pub fn iter_levels(&self) -> impl Iterator<Item = (&ProductID, &LocationID, &PeriodID, f64)> {
        self.variables
            .0
            .keys()
            .zip(self.solution.columns().iter().copied())
            .map(|((product_id, location_id, period), level)| {
                (product_id, location_id, period, level)
            })
    }
}

/// Formulate the optimisation problem for the given model.
///
/// # Arguments
///
/// * `model` - The model
///
/// # Returns
///
/// An [`InventoryProblem`] ready to solve, or a [`ModelError`] if the model is
/// degenerate or a location parameter is missing.
pub fn build_problem(model: &Model) -> Result<InventoryProblem, ModelError> {
    // Degenerate index sets and missing location parameters must be caught here
    // rather than surfacing as a solver failure
    for (dimension, is_empty) in [
        ("products", model.indices.products.is_empty()),
        ("periods", model.indices.periods.is_empty()),
        ("locations", model.indices.locations.is_empty()),
    ] {
        if is_empty {
            return Err(ModelError::EmptyIndexSet(dimension));
        }
    }
    check_location_coverage(&model.indices, &model.location_parameters)?;

    let mut problem = Problem::default();
    let variables = add_variables(&mut problem, model);
    add_balance_constraints(&mut problem, &variables, model);
    add_capacity_constraints(&mut problem, &variables, model);

    Ok(InventoryProblem { problem, variables })
}

impl InventoryProblem {
    /// The number of decision variables in the problem
    pub fn num_variables(&self) -> usize {
        self.variables.0.len()
    }

    /// The number of constraints in the problem
    pub fn num_constraints(&self) -> usize {
        self.problem.num_rows()
    }

    /// Submit the problem to the HiGHS solver.
    ///
    /// Blocks until the solver returns. No retries are attempted.
    ///
    /// # Arguments
    ///
    /// * `time_limit` - Maximum solve time in seconds, if any
    ///
    /// # Returns
    ///
    /// The [`SolveOutcome`], or an error if the solver itself failed.
    pub fn solve(self, time_limit: Option<f64>) -> Result<SolveOutcome> {
        let mut highs_model = self.problem.optimise(Sense::Minimise);
        if let Some(limit) = time_limit {
            highs_model.set_option("time_limit", limit);
        }

        let solved = highs_model
            .try_solve()
            .map_err(|status| anyhow!("Solver error: {status:?}"))?;

        match solved.status() {
            HighsModelStatus::Optimal => {
                let objective_value = solved.objective_value();
                Ok(SolveOutcome::Optimal(Solution {
                    solution: solved.get_solution(),
                    variables: self.variables,
                    objective_value,
                }))
            }
            HighsModelStatus::Infeasible => Ok(SolveOutcome::Infeasible),
            HighsModelStatus::Unbounded => Ok(SolveOutcome::Unbounded),
            // The objective is bounded below by zero, so in practice this
            // status can only mean infeasible for this formulation
            HighsModelStatus::UnboundedOrInfeasible => Ok(SolveOutcome::Infeasible),
            HighsModelStatus::ReachedTimeLimit => Ok(SolveOutcome::TimedOut),
            status => Err(anyhow!("Could not solve: {status:?}")),
        }
    }
}

/// Add one nonnegative inventory-level variable per (product, location, period).
///
/// The objective coefficient of each variable is the holding cost of its
/// location, so the minimisation objective is assembled as the variables are
/// created.
fn add_variables(problem: &mut Problem, model: &Model) -> VariableMap {
    let mut variables = VariableMap::default();

    let indices = &model.indices;
    for (product_id, location_id, period) in
        iproduct!(&indices.products, &indices.locations, &indices.periods)
    {
        let coeff = model
            .location_parameters
            .get(location_id)
            .expect("No parameters found for location")
            .holding_cost;
        let var = problem.add_column(coeff, 0.0..);
        let key = (product_id.clone(), location_id.clone(), period.clone());
        let existing = variables.0.insert(key, var).is_some();
        assert!(!existing, "Duplicate entry for var");
    }

    variables
}

/// Pin the variable for each triple with recorded demand to the aggregated
/// demand quantity.
///
/// Triples absent from the demand table get no balance constraint at all:
/// their variables remain free above the zero lower bound. Absence means "no
/// recorded demand", not a demand of zero.
fn add_balance_constraints(problem: &mut Problem, variables: &VariableMap, model: &Model) {
    let indices = &model.indices;
    for (location_id, period, product_id) in
        iproduct!(&indices.locations, &indices.periods, &indices.products)
    {
        let key = (product_id.clone(), period.clone(), location_id.clone());
        let Some(&quantity) = model.demand.get(&key) else {
            continue;
        };

        let var = variables.get(product_id, location_id, period);
        problem.add_row(quantity..=quantity, [(var, 1.0)]);
    }
}

/// Bound the combined inventory across all products at each location and
/// period by the location's holding capacity.
///
/// One constraint is emitted per (location, period) pair.
fn add_capacity_constraints(problem: &mut Problem, variables: &VariableMap, model: &Model) {
    let indices = &model.indices;
    let mut terms = Vec::new();
    for (location_id, period) in iproduct!(&indices.locations, &indices.periods) {
        let capacity = model
            .location_parameters
            .get(location_id)
            .expect("No parameters found for location")
            .holding_capacity;

        terms.extend(
            indices
                .products
                .iter()
                .map(|product_id| (variables.get(product_id, location_id, period), 1.0)),
        );
        problem.add_row(..=capacity, terms.drain(0..));
    }
}

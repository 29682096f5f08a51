//! Contract for pluggable local-search moves
//!
//! A search loop applies a sequence of operators to a candidate route, keeps only improving
//! results and stops once no operator improves anymore. The loop and the concrete moves
//! (swap, relocate, 2-opt, ...) live outside this crate; each move is its own type
//! implementing [`LocalSearchOperator`].

/// Outcome of applying one operator
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Improvement {
    /// Whether the candidate was changed for the better
    pub improved: bool,
    /// Signed change of the objective value (negative when a cost decreased)
    pub delta: f64,
}

impl Improvement {
    /// No change was applied
    pub const NONE: Improvement = Improvement {
        improved: false,
        delta: 0.0,
    };

    pub fn improved(delta: f64) -> Self {
        Self {
            improved: true,
            delta,
        }
    }
}

/// A named move over a problem definition `P` and a candidate solution `R`
///
/// `apply` may only modify the candidate when it reports an improvement.
pub trait LocalSearchOperator<P, R> {
    fn name(&self) -> &str;

    fn apply(&self, problem: &P, candidate: &mut R) -> Improvement;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Visits with time windows, solved as an ordering of visit indices
    struct Problem {
        travel: Vec<Vec<f64>>,
        windows: Vec<(f64, f64)>,
    }

    impl Problem {
        fn cost(&self, order: &[usize]) -> Option<f64> {
            let mut clock = 0.0;
            let mut total = 0.0;
            for pair in order.windows(2) {
                let leg = self.travel[pair[0]][pair[1]];
                clock += leg;
                total += leg;
                let (open, close) = self.windows[pair[1]];
                if clock > close {
                    return None;
                }
                clock = clock.max(open);
            }
            Some(total)
        }
    }

    /// Exchanges two adjacent visits, keeping the first one fixed
    struct AdjacentSwap;

    impl LocalSearchOperator<Problem, Vec<usize>> for AdjacentSwap {
        fn name(&self) -> &str {
            "adjacent-swap"
        }

        fn apply(&self, problem: &Problem, candidate: &mut Vec<usize>) -> Improvement {
            let Some(current) = problem.cost(candidate) else {
                return Improvement::NONE;
            };
            for i in 1..candidate.len().saturating_sub(1) {
                let mut trial = candidate.clone();
                trial.swap(i, i + 1);
                if let Some(cost) = problem.cost(&trial) {
                    if cost < current {
                        *candidate = trial;
                        return Improvement::improved(cost - current);
                    }
                }
            }
            Improvement::NONE
        }
    }

    fn create_problem() -> Problem {
        Problem {
            travel: vec![
                vec![0.0, 10.0, 1.0],
                vec![10.0, 0.0, 1.0],
                vec![1.0, 1.0, 0.0],
            ],
            windows: vec![(0.0, 100.0), (0.0, 100.0), (0.0, 100.0)],
        }
    }

    #[test]
    fn test_operator_reports_improvement() {
        let problem = create_problem();
        let mut order = vec![0, 1, 2];
        let result = AdjacentSwap.apply(&problem, &mut order);
        assert!(result.improved);
        assert_eq!(result.delta, -9.0);
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_hill_climbing_terminates() {
        let problem = create_problem();
        let operators: Vec<Box<dyn LocalSearchOperator<Problem, Vec<usize>>>> =
            vec![Box::new(AdjacentSwap)];
        let mut order = vec![0, 1, 2];

        let mut rounds = 0;
        loop {
            let improved = operators
                .iter()
                .any(|op| op.apply(&problem, &mut order).improved);
            if !improved {
                break;
            }
            rounds += 1;
        }

        assert_eq!(rounds, 1);
        assert_eq!(operators[0].name(), "adjacent-swap");
        assert_eq!(problem.cost(&order), Some(2.0));
    }

    #[test]
    fn test_infeasible_candidate_is_left_alone() {
        let mut problem = create_problem();
        problem.windows[2] = (0.0, 0.5);
        let mut order = vec![0, 1, 2];
        assert_eq!(AdjacentSwap.apply(&problem, &mut order), Improvement::NONE);
        assert_eq!(order, vec![0, 1, 2]);
    }
}

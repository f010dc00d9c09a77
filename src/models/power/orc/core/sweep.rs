use rayon::prelude::*;
use tracing::debug;

use crate::support::thermo::PropertyOracle;

use super::{CriticalTemperatureCache, HeatSourceInput, PerformanceResult, match_to_heat_source};

/// Matches every input on the rayon thread pool.
///
/// Returns one entry per input, in input order. Infeasible points are `None`
/// and never abort the batch.
pub fn sweep<O: PropertyOracle + ?Sized>(
    oracle: &O,
    cache: &CriticalTemperatureCache,
    inputs: &[HeatSourceInput],
) -> Vec<Option<PerformanceResult>> {
    let results: Vec<_> = inputs
        .par_iter()
        .map(|input| match_to_heat_source(oracle, cache, input))
        .collect();

    debug!(
        points = inputs.len(),
        feasible = results.iter().filter(|result| result.is_some()).count(),
        "heat-source sweep finished"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::power::orc::core::{
        CyclePosition,
        test_support::{heat_source, oracle},
    };

    #[test]
    fn results_keep_input_order_and_skip_infeasible_points() {
        let oracle = oracle();
        let cache = CriticalTemperatureCache::new();
        let inputs: Vec<_> = [325.0, 333.15, 373.15, 320.0, 350.0]
            .into_iter()
            .map(heat_source)
            .collect();

        let results = sweep(&oracle, &cache, &inputs);

        let feasible: Vec<_> = results.iter().map(Option::is_some).collect();
        assert_eq!(feasible, [false, true, true, false, true]);

        for (input, result) in inputs.iter().zip(&results) {
            if let Some(result) = result {
                assert_eq!(result.source.inlet_temperature, input.inlet_temperature);
                assert!(
                    result.solution.states.get(CyclePosition::TurbineInlet).temperature
                        < input.inlet_temperature
                );
            }
        }
    }

    #[test]
    fn sweep_agrees_with_single_matches() {
        let oracle = oracle();
        let cache = CriticalTemperatureCache::new();
        let inputs = [heat_source(340.0), heat_source(360.0)];

        let results = sweep(&oracle, &cache, &inputs);
        for (input, result) in inputs.iter().zip(results) {
            assert_eq!(result, match_to_heat_source(&oracle, &cache, input));
        }
    }

    #[test]
    fn empty_batch() {
        assert!(sweep(&oracle(), &CriticalTemperatureCache::new(), &[]).is_empty());
    }
}

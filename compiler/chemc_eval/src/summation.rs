use chemc_table::ElementTable;
use log::warn;

use crate::error::{EvalError, EvalResult};
use crate::expansion::Expansion;

/// Sum the atomic numbers of every atom occurrence in `expansion`.
///
/// Symbols missing from `table` contribute 0. That only happens when the
/// expansion was produced against a different table.
pub fn sum_atomic_numbers(expansion: &Expansion, table: &ElementTable) -> EvalResult<u64> {
    expansion
        .tally()
        .iter()
        .try_fold(0u64, |total, (symbol, &count)| {
            let Some(number) = table.lookup(symbol) else {
                warn!("'{symbol}' is not in the element table, counting it as 0");
                return Ok(total);
            };
            u64::from(number)
                .checked_mul(count)
                .and_then(|protons| total.checked_add(protons))
                .ok_or(EvalError::SumOverflow)
        })
}

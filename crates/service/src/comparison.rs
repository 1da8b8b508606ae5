//! Quote comparison for the dashboard

use qmon_types::Amount;
use serde::Serialize;
use std::cmp::Ordering;

/// Which of the two recorded quotes is larger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Highest {
	ReturnAmount,
	MarketPrice,
	Equal,
	/// Neither quote is a positive number
	Neither,
}

/// Big-integer comparison; missing or unparsable amounts count as zero
pub fn compare_amounts(return_amount: Option<&Amount>, market_price: Option<&Amount>) -> Highest {
	let zero = Amount::new("0");
	let return_amount = return_amount.unwrap_or(&zero);
	let market_price = market_price.unwrap_or(&zero);

	if return_amount.cmp_numeric(&zero) == Ordering::Equal
		&& market_price.cmp_numeric(&zero) == Ordering::Equal
	{
		return Highest::Neither;
	}

	match return_amount.cmp_numeric(market_price) {
		Ordering::Greater => Highest::ReturnAmount,
		Ordering::Less => Highest::MarketPrice,
		Ordering::Equal => Highest::Equal,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn amount(value: &str) -> Amount {
		Amount::new(value)
	}

	#[test]
	fn test_numeric_not_lexical() {
		assert_eq!(compare_amounts(Some(&amount("100")), Some(&amount("150"))), Highest::MarketPrice);
		assert_eq!(compare_amounts(Some(&amount("9")), Some(&amount("10"))), Highest::MarketPrice);
		assert_eq!(compare_amounts(Some(&amount("1000")), Some(&amount("999"))), Highest::ReturnAmount);
	}

	#[test]
	fn test_missing_values() {
		assert_eq!(compare_amounts(None, None), Highest::Neither);
		assert_eq!(compare_amounts(Some(&amount("0")), Some(&amount("garbage"))), Highest::Neither);
		assert_eq!(compare_amounts(None, Some(&amount("5"))), Highest::MarketPrice);
		assert_eq!(compare_amounts(Some(&amount("7")), Some(&amount("7"))), Highest::Equal);
	}
}

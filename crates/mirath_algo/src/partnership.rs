//! Musharakah / Mudarabah split arithmetic.
//!
//! Profit follows the agreed ratio; loss follows capital. In a Mudarabah the
//! manager contributes labor only and bears no monetary loss.

use mirath_core::errors::CoreError;
use mirath_core::money::Decimal;

/// Joint-venture inputs: two capital contributions, the agreed profit
/// percentage for partner A, and the amount to project (treated once as a
/// profit and once as a loss).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MusharakahInputs {
    pub capital_a: Decimal,
    pub capital_b: Decimal,
    pub profit_ratio_a_pct: u8,
    pub amount: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MusharakahSplit {
    pub capital_ratio_a: Decimal,
    pub capital_ratio_b: Decimal,
    pub profit_a: Decimal,
    pub profit_b: Decimal,
    pub loss_a: Decimal,
    pub loss_b: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MudarabahSplit {
    pub profit_investor: Decimal,
    pub profit_manager: Decimal,
    pub loss_investor: Decimal,
    pub loss_manager: Decimal,
}

fn pct(p: u8) -> Result<Decimal, CoreError> {
    if p > 100 {
        return Err(CoreError::DomainOutOfRange("profit ratio percent"));
    }
    Ok(Decimal::new(i64::from(p), 2))
}

fn non_negative(v: Decimal, what: &'static str) -> Result<Decimal, CoreError> {
    if v.is_sign_negative() && !v.is_zero() {
        return Err(CoreError::DomainOutOfRange(what));
    }
    Ok(v)
}

/// Split a Musharakah projection: profit by the agreed ratio, loss strictly
/// by capital contribution.
pub fn split_musharakah(inp: &MusharakahInputs) -> Result<MusharakahSplit, CoreError> {
    non_negative(inp.capital_a, "musharakah capital")?;
    non_negative(inp.capital_b, "musharakah capital")?;
    non_negative(inp.amount, "musharakah amount")?;
    let share_a = pct(inp.profit_ratio_a_pct)?;
    let share_b = Decimal::ONE - share_a;

    let total_capital = inp
        .capital_a
        .checked_add(inp.capital_b)
        .ok_or(CoreError::Overflow("musharakah capital"))?;
    if total_capital.is_zero() {
        return Err(CoreError::DomainOutOfRange("musharakah capital"));
    }
    let capital_ratio_a = inp
        .capital_a
        .checked_div(total_capital)
        .ok_or(CoreError::Overflow("musharakah ratio"))?;
    let capital_ratio_b = inp
        .capital_b
        .checked_div(total_capital)
        .ok_or(CoreError::Overflow("musharakah ratio"))?;

    let mul = |a: Decimal, b: Decimal, what: &'static str| {
        a.checked_mul(b).ok_or(CoreError::Overflow(what))
    };
    Ok(MusharakahSplit {
        capital_ratio_a,
        capital_ratio_b,
        profit_a: mul(inp.amount, share_a, "musharakah profit")?,
        profit_b: mul(inp.amount, share_b, "musharakah profit")?,
        loss_a: mul(inp.amount, capital_ratio_a, "musharakah loss")?,
        loss_b: mul(inp.amount, capital_ratio_b, "musharakah loss")?,
    })
}

/// Split a Mudarabah projection between investor (rabb al-mal) and manager
/// (mudarib). Loss lands wholly on the investor's capital.
pub fn split_mudarabah(
    profit_ratio_investor_pct: u8,
    amount: Decimal,
) -> Result<MudarabahSplit, CoreError> {
    non_negative(amount, "mudarabah amount")?;
    let share_inv = pct(profit_ratio_investor_pct)?;
    let share_mgr = Decimal::ONE - share_inv;

    Ok(MudarabahSplit {
        profit_investor: amount
            .checked_mul(share_inv)
            .ok_or(CoreError::Overflow("mudarabah profit"))?,
        profit_manager: amount
            .checked_mul(share_mgr)
            .ok_or(CoreError::Overflow("mudarabah profit"))?,
        loss_investor: amount,
        loss_manager: Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn musharakah_profit_by_agreement_loss_by_capital() {
        let s = split_musharakah(&MusharakahInputs {
            capital_a: dec!(75000),
            capital_b: dec!(25000),
            profit_ratio_a_pct: 60,
            amount: dec!(20000),
        })
        .unwrap();
        assert_eq!(s.capital_ratio_a, dec!(0.75));
        assert_eq!(s.capital_ratio_b, dec!(0.25));
        assert_eq!(s.profit_a, dec!(12000));
        assert_eq!(s.profit_b, dec!(8000));
        assert_eq!(s.loss_a, dec!(15000));
        assert_eq!(s.loss_b, dec!(5000));
    }

    #[test]
    fn musharakah_rejects_zero_capital_and_bad_ratio() {
        let mut inp = MusharakahInputs {
            capital_a: dec!(0),
            capital_b: dec!(0),
            profit_ratio_a_pct: 50,
            amount: dec!(1000),
        };
        assert!(split_musharakah(&inp).is_err());
        inp.capital_a = dec!(1000);
        inp.profit_ratio_a_pct = 101;
        assert!(split_musharakah(&inp).is_err());
    }

    #[test]
    fn mudarabah_manager_bears_no_monetary_loss() {
        let s = split_mudarabah(60, dec!(25000)).unwrap();
        assert_eq!(s.profit_investor, dec!(15000));
        assert_eq!(s.profit_manager, dec!(10000));
        assert_eq!(s.loss_investor, dec!(25000));
        assert_eq!(s.loss_manager, Decimal::ZERO);
    }
}

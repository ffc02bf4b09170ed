//! Zakat assessment: nisab threshold check plus the 2.5% levy.

use core::str::FromStr;

use mirath_core::errors::CoreError;
use mirath_core::money::Decimal;

/// Gold nisab weight in grams.
pub const NISAB_GOLD_GRAMS: u32 = 85;
/// Silver nisab weight in grams.
pub const NISAB_SILVER_GRAMS: u32 = 595;

/// Which metal anchors the nisab threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NisabStandard {
    Gold,
    Silver,
}

impl NisabStandard {
    pub fn as_token(self) -> &'static str {
        match self {
            NisabStandard::Gold => "gold",
            NisabStandard::Silver => "silver",
        }
    }
}

impl FromStr for NisabStandard {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gold" => Ok(NisabStandard::Gold),
            "silver" => Ok(NisabStandard::Silver),
            _ => Err(CoreError::InvalidToken),
        }
    }
}

impl core::fmt::Display for NisabStandard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Zakatable asset figures, all in the same currency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZakatAssets {
    pub cash: Decimal,
    pub gold_silver: Decimal,
    pub investments: Decimal,
    pub liabilities: Decimal,
}

/// Full assessment, kept verbose so reports can show both thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZakatAssessment {
    pub total_assets: Decimal,
    pub net_assets: Decimal,
    pub nisab_gold: Decimal,
    pub nisab_silver: Decimal,
    pub threshold: Decimal,
    pub standard: NisabStandard,
    pub eligible: bool,
    pub payable: Decimal,
}

fn non_negative(v: Decimal, what: &'static str) -> Result<Decimal, CoreError> {
    if v.is_sign_negative() && !v.is_zero() {
        return Err(CoreError::DomainOutOfRange(what));
    }
    Ok(v)
}

/// Assess zakat liability. Net assets clamp at zero when liabilities exceed
/// holdings; the levy applies only at or above the selected threshold.
pub fn assess(
    assets: &ZakatAssets,
    gold_price_per_gram: Decimal,
    silver_price_per_gram: Decimal,
    standard: NisabStandard,
) -> Result<ZakatAssessment, CoreError> {
    non_negative(assets.cash, "zakat cash")?;
    non_negative(assets.gold_silver, "zakat gold/silver")?;
    non_negative(assets.investments, "zakat investments")?;
    non_negative(assets.liabilities, "zakat liabilities")?;
    non_negative(gold_price_per_gram, "gold price per gram")?;
    non_negative(silver_price_per_gram, "silver price per gram")?;

    let total_assets = assets
        .cash
        .checked_add(assets.gold_silver)
        .and_then(|t| t.checked_add(assets.investments))
        .ok_or(CoreError::Overflow("zakat assets"))?;
    let net_assets = total_assets
        .checked_sub(assets.liabilities)
        .ok_or(CoreError::Overflow("zakat net assets"))?
        .max(Decimal::ZERO);

    let nisab_gold = gold_price_per_gram
        .checked_mul(Decimal::from(NISAB_GOLD_GRAMS))
        .ok_or(CoreError::Overflow("gold nisab"))?;
    let nisab_silver = silver_price_per_gram
        .checked_mul(Decimal::from(NISAB_SILVER_GRAMS))
        .ok_or(CoreError::Overflow("silver nisab"))?;
    let threshold = match standard {
        NisabStandard::Gold => nisab_gold,
        NisabStandard::Silver => nisab_silver,
    };

    let eligible = net_assets >= threshold;
    let payable = if eligible {
        // 2.5% of net zakatable assets.
        net_assets
            .checked_mul(Decimal::new(25, 3))
            .ok_or(CoreError::Overflow("zakat payable"))?
    } else {
        Decimal::ZERO
    };

    Ok(ZakatAssessment {
        total_assets,
        net_assets,
        nisab_gold,
        nisab_silver,
        threshold,
        standard,
        eligible,
        payable,
    })
}

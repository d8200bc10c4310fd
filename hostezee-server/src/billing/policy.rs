//! Tax policy value objects
//!
//! Standard checkout and bill-merge apply different rates (5%/10% vs
//! 18%/10%). Both are kept as explicit policies passed into the
//! calculator rather than branches inside it, so the divergence is
//! visible at every call site.

use rust_decimal::Decimal;

/// Percentage rates applied by the tax/surcharge calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxPolicy {
    /// GST percentage (applied per revenue stream at checkout, flat at merge)
    pub gst_rate: Decimal,
    /// Service charge percentage on the full subtotal
    pub service_charge_rate: Decimal,
}

impl TaxPolicy {
    /// Standard single-booking checkout: GST 5%, service charge 10%
    pub const CHECKOUT: TaxPolicy = TaxPolicy {
        gst_rate: Decimal::from_parts(5, 0, 0, false, 0),
        service_charge_rate: Decimal::from_parts(10, 0, 0, false, 0),
    };

    /// Multi-booking bill merge: GST 18%, service charge 10%
    pub const MERGE: TaxPolicy = TaxPolicy {
        gst_rate: Decimal::from_parts(18, 0, 0, false, 0),
        service_charge_rate: Decimal::from_parts(10, 0, 0, false, 0),
    };

    /// GST rate as a fraction (0.05 for 5%)
    pub fn gst_fraction(&self) -> Decimal {
        self.gst_rate / Decimal::ONE_HUNDRED
    }

    /// Service charge rate as a fraction
    pub fn service_charge_fraction(&self) -> Decimal {
        self.service_charge_rate / Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rates() {
        assert_eq!(TaxPolicy::CHECKOUT.gst_rate, Decimal::new(5, 0));
        assert_eq!(TaxPolicy::CHECKOUT.service_charge_rate, Decimal::new(10, 0));
        assert_eq!(TaxPolicy::MERGE.gst_rate, Decimal::new(18, 0));
        assert_eq!(TaxPolicy::MERGE.service_charge_rate, Decimal::new(10, 0));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(
            TaxPolicy::CHECKOUT.gst_fraction(),
            Decimal::from_str_exact("0.05").unwrap()
        );
        assert_eq!(
            TaxPolicy::MERGE.gst_fraction(),
            Decimal::from_str_exact("0.18").unwrap()
        );
    }
}

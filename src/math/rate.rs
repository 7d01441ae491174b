//! Ray-scaled lending rate and its basis point view

use {
    crate::math::common::*,
    odra::casper_types::U256,
    core::fmt,
};

/// Annual lending rate as reported by the pool, scaled by 10^27
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Eq, Ord)]
pub struct Rate(pub U256);

impl Rate {
    /// Zero (0%)
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// Wrap a raw ray value
    pub fn from_ray(ray: U256) -> Self {
        Self(ray)
    }

    /// Create a rate from basis points (500 = 5%)
    pub fn from_basis_points<T: Into<U256>>(bps: T) -> Self {
        Self(bps.into() * Self::ray_per_basis_point())
    }

    /// Raw ray value
    pub fn to_ray(&self) -> U256 {
        self.0
    }

    /// Convert to basis points, truncating any remainder below one basis point
    pub fn to_basis_points(&self) -> U256 {
        self.0 / Self::ray_per_basis_point()
    }

    /// True when the rate is at or above `threshold_bps`
    pub fn meets_threshold(&self, threshold_bps: u64) -> bool {
        self.to_basis_points() >= U256::from(threshold_bps)
    }

    fn ray_per_basis_point() -> U256 {
        U256::from(RAY_PER_BASIS_POINT)
    }
}

/// Percent with two decimals, e.g. `5.00%`
impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bps = self.to_basis_points();
        let per_cent = U256::from(BPS_PER_PERCENT);
        let whole = bps / per_cent;
        let fraction = (bps % per_cent).as_u64();
        write!(f, "{}.{:02}%", whole, fraction)
    }
}

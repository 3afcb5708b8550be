//! Configuration surface for product-construction variant selection.

/// Which successor engine the product graph instantiates.
///
/// `FSLTL` from the reference's `{SOG, SLOG, DSOG, FSLTL}` selector is
/// deliberately absent: it names a different construction not covered by
/// this crate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProductVariant {
    /// The degenerate SLOG construction without weaker-self-loop saturation
    /// (`F` is always `false`), i.e. the plain SOG product.
    PlainSog,
    /// The Symbolic Linear-time Observation Graph: saturation-based
    /// successor aggregates, no divergence handling.
    Slog,
    /// The Divergence-aware SOG: divergence detection, a distinguished
    /// divergence meta-state, and per-SCC AP splitting.
    Dsog,
}

impl Default for ProductVariant {
    fn default() -> Self {
        Self::Slog
    }
}

/// Options controlling the product construction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ProductOptions {
    /// Which successor engine to instantiate.
    pub variant: ProductVariant,
    /// For [`ProductVariant::Slog`], whether to compute the weaker-self-loop
    /// AP set `F` and saturate with it (§4.3 step 2-3). Has no effect for
    /// [`ProductVariant::PlainSog`] (always off) or [`ProductVariant::Dsog`]
    /// (not applicable).
    pub slog_weaker_selfloop: bool,
}

impl Default for ProductOptions {
    fn default() -> Self {
        Self {
            variant: ProductVariant::default(),
            slog_weaker_selfloop: true,
        }
    }
}

impl ProductOptions {
    /// Options selecting the plain SOG degenerate construction.
    pub fn plain_sog() -> Self {
        Self {
            variant: ProductVariant::PlainSog,
            slog_weaker_selfloop: false,
        }
    }

    /// Options selecting SLOG with weaker-self-loop saturation enabled.
    pub fn slog() -> Self {
        Self {
            variant: ProductVariant::Slog,
            slog_weaker_selfloop: true,
        }
    }

    /// Options selecting DSOG.
    pub fn dsog() -> Self {
        Self {
            variant: ProductVariant::Dsog,
            slog_weaker_selfloop: false,
        }
    }
}

use crate::entropy_coding::VariancePolicy;

/// What to do with a context that is never followed by anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnobservedContext {
    /// Leave the context without a code (`Undefined`).
    #[default]
    Skip,
    /// Code it with the pooled distribution of all successor symbols.
    FallbackOrder0,
}

/// Knobs for building order-0 and order-1 codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub variance: VariancePolicy,
    pub unobserved: UnobservedContext,
}

impl Options {
    pub fn with_variance(mut self, variance: VariancePolicy) -> Self {
        self.variance = variance;
        self
    }

    pub fn with_unobserved(mut self, unobserved: UnobservedContext) -> Self {
        self.unobserved = unobserved;
        self
    }
}

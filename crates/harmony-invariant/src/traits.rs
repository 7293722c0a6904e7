//! Properties shared by every invariant check

/// Intrinsic properties of an invariant check
pub trait InvariantProperties {
    /// Minimum number of aligned samples needed for a conclusive verdict
    fn minimum_samples(&self) -> usize;

    /// Name of the invariant
    fn method_name(&self) -> &str;

    /// Check if the invariant can be evaluated on `size` samples
    fn can_handle_size(&self, size: usize) -> bool {
        size >= self.minimum_samples()
    }
}

/// Display label for the synthetic portfolio produced by a snapshot merge.
pub const JOINT_PORTFOLIO_LABEL: &str = "Joint Portfolio";

/// Quantity threshold below which a position is treated as zero.
pub const QUANTITY_THRESHOLD: &str = "0.00000001";

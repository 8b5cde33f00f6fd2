/// How many directory levels below the root get expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthLimit {
    #[default]
    Unlimited,
    Levels(u32),
}

impl DepthLimit {
    /// Negative values mean unlimited.
    pub fn from_signed(levels: i64) -> Self {
        if levels < 0 {
            Self::Unlimited
        } else {
            Self::Levels(u32::try_from(levels).unwrap_or(u32::MAX))
        }
    }

    pub fn is_exhausted(self) -> bool {
        matches!(self, Self::Levels(0))
    }

    /// Budget left for the children of a directory expanded with `self`.
    pub fn descend(self) -> Self {
        match self {
            Self::Unlimited => Self::Unlimited,
            Self::Levels(levels) => Self::Levels(levels.saturating_sub(1)),
        }
    }
}

impl From<i64> for DepthLimit {
    fn from(levels: i64) -> Self {
        Self::from_signed(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-1, DepthLimit::Unlimited)]
    #[case(i64::MIN, DepthLimit::Unlimited)]
    #[case(0, DepthLimit::Levels(0))]
    #[case(3, DepthLimit::Levels(3))]
    #[case(i64::MAX, DepthLimit::Levels(u32::MAX))]
    fn converts_signed_levels(#[case] levels: i64, #[case] expected: DepthLimit) {
        assert_eq!(DepthLimit::from(levels), expected);
    }

    #[test]
    fn unlimited_never_exhausts() {
        let mut depth = DepthLimit::Unlimited;
        for _ in 0..1000 {
            assert!(!depth.is_exhausted());
            depth = depth.descend();
        }
    }

    #[test]
    fn levels_count_down_to_zero() {
        let depth = DepthLimit::Levels(2);
        assert!(!depth.is_exhausted());
        assert!(!depth.descend().is_exhausted());
        assert!(depth.descend().descend().is_exhausted());
        assert_eq!(DepthLimit::Levels(0).descend(), DepthLimit::Levels(0));
    }
}
